use thiserror::Error;

/// Errors raised while setting up a migration.
///
/// Failures during the run itself (unreadable files, failed writes, lines the
/// rules cannot handle) never surface here; they become [`Diagnostic`]s.
///
/// [`Diagnostic`]: crate::session::Diagnostic
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Invalid pattern for rule '{rule}': {source}")]
    Pattern {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid file extension '{0}': {1}")]
    InvalidExtension(String, &'static str),
}

impl MigrateError {
    pub fn pattern(rule: &'static str, source: regex::Error) -> Self {
        Self::Pattern { rule, source }
    }
}

/// Result type for migration setup
pub type Result<T> = std::result::Result<T, MigrateError>;
