use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Something the operator should look at after the run.
///
/// Every variant counts against the exit status; there is no severity split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A fallback rewrite whose result may not be a valid template
    ManualReview {
        path: PathBuf,
        line: usize,
        text: String,
    },
    /// A line still holding a legacy call that no rule could rewrite
    Unmigrated {
        path: PathBuf,
        line: usize,
        text: String,
    },
    ReadFailure { path: PathBuf, message: String },
    WriteFailure { path: PathBuf, message: String },
    WalkFailure { path: PathBuf, message: String },
}

impl Diagnostic {
    pub fn manual_review(path: impl Into<PathBuf>, line: usize, original: &str) -> Self {
        Self::ManualReview {
            path: path.into(),
            line,
            text: original.trim().to_string(),
        }
    }

    pub fn unmigrated(path: impl Into<PathBuf>, line: usize, original: &str) -> Self {
        Self::Unmigrated {
            path: path.into(),
            line,
            text: original.trim().to_string(),
        }
    }

    /// 1-based line number, for line-level diagnostics
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ManualReview { line, .. } | Self::Unmigrated { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::ManualReview { path, .. }
            | Self::Unmigrated { path, .. }
            | Self::ReadFailure { path, .. }
            | Self::WriteFailure { path, .. }
            | Self::WalkFailure { path, .. } => path,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManualReview { path, line, text } => write!(
                f,
                "{}:{}: Complex expression may need manual review: {}",
                path.display(),
                line,
                text
            ),
            Self::Unmigrated { path, line, text } => write!(
                f,
                "{}:{}: Could not auto-migrate: {}",
                path.display(),
                line,
                text
            ),
            Self::ReadFailure { path, message } => {
                write!(f, "{}: Error reading file: {}", path.display(), message)
            }
            Self::WriteFailure { path, message } => {
                write!(f, "{}: Error writing file: {}", path.display(), message)
            }
            Self::WalkFailure { path, message } => {
                write!(f, "{}: Error walking directory: {}", path.display(), message)
            }
        }
    }
}

/// Counters and diagnostics for one invocation.
///
/// Lives for the duration of a run and is only ever printed.
#[derive(Debug, Default)]
pub struct MigrationSession {
    migration_count: u64,
    file_count: u64,
    diagnostics: Vec<Diagnostic>,
}

impl MigrationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// One line rewritten
    pub fn record_migration(&mut self) {
        self.migration_count += 1;
    }

    /// One file found to differ after migration
    pub fn record_changed_file(&mut self) {
        self.file_count += 1;
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn migration_count(&self) -> u64 {
        self.migration_count
    }

    pub fn file_count(&self) -> u64 {
        self.file_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
