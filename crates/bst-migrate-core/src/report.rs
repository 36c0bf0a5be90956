use std::fmt;

use serde::Serialize;

use crate::migrator::RULE_WIDTH;
use crate::rules::RuleStats;
use crate::session::Diagnostic;

/// Final outcome of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationReport {
    pub files_modified: u64,
    /// Lines rewritten, across all files
    pub migrations: u64,
    pub dry_run: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub rule_stats: Vec<RuleStats>,
}

impl MigrationReport {
    /// No diagnostics of any kind were recorded
    pub fn success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Process exit status: 0 when clean, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        if self.success() {
            0
        } else {
            1
        }
    }

    /// One line per rule with its hit counts and what it does
    pub fn rule_summary(&self) -> Vec<String> {
        self.rule_stats
            .iter()
            .map(|stats| {
                format!(
                    "  {:<20} tried {:>5}  rewrote {:>5}  {}",
                    stats.rule_name, stats.applications, stats.transformations, stats.description
                )
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(f)?;
        writeln!(f, "{heavy}")?;
        writeln!(f, "MIGRATION REPORT")?;
        writeln!(f, "{heavy}")?;
        writeln!(f, "Files modified: {}", self.files_modified)?;
        writeln!(f, "Print calls migrated: {}", self.migrations)?;

        if self.diagnostics.is_empty() {
            writeln!(f, "\nNo errors or warnings!")?;
        } else {
            writeln!(f, "\nWarnings/Errors: {}", self.diagnostics.len())?;
            writeln!(f, "{light}")?;
            for diagnostic in &self.diagnostics {
                writeln!(f, "  {diagnostic}")?;
            }
        }

        write!(f, "{heavy}")
    }
}
