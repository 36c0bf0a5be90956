/*!
# Migrator

Drives a run: walks each root, migrates every matching file line by line,
writes changed files back (unless in dry-run mode) and collects everything
the final report needs.
*/

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::MigrateConfig;
use crate::error::Result;
use crate::notifier::{ConsoleNotifier, MigrationNotifier};
use crate::report::MigrationReport;
use crate::rewriter::LineRewriter;
use crate::rules::LEGACY_CALL;
use crate::session::{Diagnostic, MigrationSession};
use crate::walker;

/// Width of the separator lines in console output
pub(crate) const RULE_WIDTH: usize = 60;

/// One file after migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratedFile {
    pub original: String,
    pub migrated: String,
    /// At least one line differs from the original
    pub changed: bool,
}

pub struct Migrator {
    config: MigrateConfig,
    rewriter: LineRewriter,
    session: MigrationSession,
    notifier: Arc<dyn MigrationNotifier>,
}

impl Migrator {
    /// Migrator printing to the console
    pub fn new(config: MigrateConfig) -> Result<Self> {
        Self::with_notifier(config, Arc::new(ConsoleNotifier::new()))
    }

    pub fn with_notifier(
        config: MigrateConfig,
        notifier: Arc<dyn MigrationNotifier>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rewriter: LineRewriter::new()?,
            session: MigrationSession::new(),
            notifier,
        })
    }

    pub fn session(&self) -> &MigrationSession {
        &self.session
    }

    /// Migrate a single line
    pub fn migrate_line(&mut self, line: &str, line_number: usize, path: &Path) -> String {
        self.rewriter
            .rewrite_line(line, line_number, path, &mut self.session)
    }

    /// Migrate already-loaded file content, keeping each line's terminator.
    ///
    /// Returns whether any line changed, and the new content.
    pub fn migrate_content(&mut self, content: &str, path: &Path) -> (bool, String) {
        let mut migrated = String::with_capacity(content.len());
        let mut changed = false;

        for (index, line) in content.split_inclusive('\n').enumerate() {
            let new_line = self.migrate_line(line, index + 1, path);
            if new_line != line {
                changed = true;
            }
            migrated.push_str(&new_line);
        }

        (changed, migrated)
    }

    /// Read and migrate one file without writing it.
    ///
    /// A read failure is recorded as a diagnostic and yields `None`.
    pub fn migrate_file(&mut self, path: &Path) -> Option<MigratedFile> {
        let original = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read file");
                self.session.record(Diagnostic::ReadFailure {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                });
                return None;
            }
        };

        let (changed, migrated) = self.migrate_content(&original, path);
        debug!(path = %path.display(), changed, "migrated file");

        Some(MigratedFile {
            original,
            migrated,
            changed,
        })
    }

    /// Migrate every matching file under `directory`.
    ///
    /// A missing directory, or one without matching files, is reported and
    /// skipped.
    pub fn migrate_directory(&mut self, directory: &Path) {
        if !directory.exists() {
            warn!(directory = %directory.display(), "directory does not exist");
            self.notifier.on_output(&format!(
                "Error: Directory {} does not exist",
                directory.display()
            ));
            return;
        }

        let extension = self.config.extension.clone();

        // Roots are directories; a file given as a root holds no matches.
        let discovery = if directory.is_dir() {
            walker::discover(directory, &extension)
        } else {
            walker::Discovery::default()
        };
        for (path, message) in discovery.failures {
            self.session
                .record(Diagnostic::WalkFailure { path, message });
        }

        if discovery.files.is_empty() {
            self.notifier.on_output(&format!(
                "No .{} files found in {}",
                extension,
                directory.display()
            ));
            return;
        }

        info!(directory = %directory.display(), files = discovery.files.len(), "migrating directory");
        self.notifier.on_output(&format!(
            "Found {} .{} files in {}",
            discovery.files.len(),
            extension,
            directory.display()
        ));
        self.notifier
            .on_output(&format!("Mode: {}", self.config.mode_label()));
        self.notifier.on_output(&"-".repeat(RULE_WIDTH));

        for path in &discovery.files {
            let Some(file) = self.migrate_file(path) else {
                continue;
            };

            if file.changed {
                self.session.record_changed_file();
                self.notifier
                    .on_output(&format!("✓ Migrated: {}", path.display()));

                if !self.config.dry_run {
                    self.write_file(path, &file.migrated);
                }
            } else if file.original.contains(LEGACY_CALL) {
                self.notifier
                    .on_output(&format!("⚠ Skipped (no changes): {}", path.display()));
            }
        }
    }

    /// Process each root in order and build the final report
    pub fn run<P: AsRef<Path>>(&mut self, directories: &[P]) -> MigrationReport {
        for directory in directories {
            let directory = directory.as_ref();
            self.notifier
                .on_output(&format!("\nProcessing directory: {}", directory.display()));
            self.migrate_directory(directory);
        }

        self.report()
    }

    /// Snapshot of the run so far
    pub fn report(&self) -> MigrationReport {
        MigrationReport {
            files_modified: self.session.file_count(),
            migrations: self.session.migration_count(),
            dry_run: self.config.dry_run,
            diagnostics: self.session.diagnostics().to_vec(),
            rule_stats: self.rewriter.stats().to_vec(),
        }
    }

    fn write_file(&mut self, path: &Path, content: &str) {
        match fs::write(path, content) {
            Ok(()) => info!(path = %path.display(), "wrote migrated file"),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to write file");
                self.session.record(Diagnostic::WriteFailure {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                });
            }
        }
    }
}
