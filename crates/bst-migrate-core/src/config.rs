use crate::error::{MigrateError, Result};

/// Extension of Beanstalk source files
pub const DEFAULT_EXTENSION: &str = "bst";

/// Migration run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateConfig {
    /// Extension (without the leading dot) of the files to migrate
    pub extension: String,
    /// Compute and report changes without writing any file
    pub dry_run: bool,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            dry_run: false,
        }
    }
}

impl MigrateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file extension to process. A leading dot is dropped.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.strip_prefix('.').unwrap_or(&extension).to_string();
        self
    }

    /// Enable preview mode
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Human readable name of the run mode, as printed per directory
    pub fn mode_label(&self) -> &'static str {
        if self.dry_run {
            "DRY RUN"
        } else {
            "LIVE MIGRATION"
        }
    }

    pub fn validate(&self) -> Result<()> {
        let ext = &self.extension;
        if ext.is_empty() {
            return Err(MigrateError::InvalidExtension(ext.clone(), "must not be empty"));
        }
        if ext.starts_with('.') {
            return Err(MigrateError::InvalidExtension(
                ext.clone(),
                "must not start with a dot",
            ));
        }
        if ext.contains(['/', '\\']) {
            return Err(MigrateError::InvalidExtension(
                ext.clone(),
                "must not contain a path separator",
            ));
        }
        Ok(())
    }
}
