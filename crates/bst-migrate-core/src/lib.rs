//! # bst-migrate core
//!
//! Line-oriented migration of Beanstalk test sources from the legacy
//! `print(...)` call form to the bracketed template form `[...]`:
//! - Ordered regex rewrite rules applied one line at a time
//! - Whole-file migration with per-line diagnostics
//! - Recursive discovery of `.bst` files under one or more roots
//! - A final report whose diagnostics decide the process exit status
//!
//! The migration is textual. Nothing here parses Beanstalk, so anything the
//! rules cannot prove safe is left for a human and flagged in the report.

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod migrator;
pub mod notifier;
pub mod report;
pub mod rewriter;
pub mod rules;
pub mod session;
pub mod walker;

// Re-export commonly used types
pub use config::{MigrateConfig, DEFAULT_EXTENSION};
pub use error::{MigrateError, Result};
pub use migrator::{MigratedFile, Migrator};
pub use notifier::{ConsoleNotifier, MigrationNotifier, RecordingNotifier};
pub use report::MigrationReport;
pub use rewriter::LineRewriter;
pub use rules::{default_rules, RewriteRule, RuleOutcome, RuleStats, LEGACY_CALL};
pub use session::{Diagnostic, MigrationSession};

use tracing_subscriber::EnvFilter;

/// Crate version, shown by `--version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the migrator.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are logged unless
/// `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "bst_migrate_core=debug,bst_migrate=debug"
    } else {
        "bst_migrate_core=warn,bst_migrate=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second initialisation (tests, embedding) is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
