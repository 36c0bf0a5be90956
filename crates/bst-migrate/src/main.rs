use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use bst_migrate_core::{
    init_tracing, ConsoleNotifier, MigrateConfig, MigrationNotifier, Migrator, DEFAULT_EXTENSION,
};
use clap::{Arg, ArgAction, Command};
use tracing::debug;

fn cli() -> Command {
    Command::new("bst-migrate")
        .version(bst_migrate_core::VERSION)
        .about("Migrate print() calls to template syntax in Beanstalk test files")
        .arg(
            Arg::new("directories")
                .value_name("DIRECTORY")
                .help("Directories to process (e.g., tests/cases/success tests/cases/failure)")
                .required(true)
                .num_args(1..)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Show what would be changed without modifying files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ext")
                .long("ext")
                .value_name("EXT")
                .help("Extension of the files to migrate")
                .default_value(DEFAULT_EXTENSION),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the final report as JSON on stdout (progress goes to stderr)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging and per-rule statistics")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<ExitCode> {
    let matches = cli().get_matches();

    let directories: Vec<PathBuf> = matches
        .get_many::<PathBuf>("directories")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let dry_run = matches.get_flag("dry-run");
    let json = matches.get_flag("json");
    let verbose = matches.get_flag("verbose");
    let extension = matches
        .get_one::<String>("ext")
        .map(String::as_str)
        .unwrap_or(DEFAULT_EXTENSION);

    // Initialize logging
    init_tracing(verbose);

    let config = MigrateConfig::new()
        .with_extension(extension)
        .dry_run(dry_run);
    debug!(?config, roots = directories.len(), "starting migration");

    let notifier: Arc<dyn MigrationNotifier> = if json {
        Arc::new(ConsoleNotifier::stderr())
    } else {
        Arc::new(ConsoleNotifier::new())
    };

    let mut migrator = match Migrator::with_notifier(config, notifier.clone()) {
        Ok(migrator) => migrator,
        Err(err) => {
            notifier.on_error(&format!("Error: {err}"));
            return Ok(ExitCode::from(2));
        }
    };
    let report = migrator.run(&directories);

    if json {
        println!("{}", report.to_json()?);
    } else {
        notifier.on_output(&report.to_string());
        if verbose {
            notifier.on_output("\nRule statistics:");
            for line in report.rule_summary() {
                notifier.on_output(&line);
            }
        }
    }

    // Any diagnostic, soft or hard, fails the run
    Ok(ExitCode::from(report.exit_code()))
}
