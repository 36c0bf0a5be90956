use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::rules::{default_rules, RewriteRule, RuleOutcome, RuleStats, LEGACY_CALL};
use crate::session::{Diagnostic, MigrationSession};

/// Applies the rewrite rules to single lines.
///
/// At most one rule changes a given line; the first rule (in priority order)
/// that does wins.
pub struct LineRewriter {
    rules: Vec<Box<dyn RewriteRule>>,
    stats: Vec<RuleStats>,
}

impl LineRewriter {
    /// Rewriter with the built-in rules
    pub fn new() -> Result<Self> {
        Ok(Self::with_rules(default_rules()?))
    }

    /// Rewriter with a custom rule set, sorted by priority (higher first)
    pub fn with_rules(mut rules: Vec<Box<dyn RewriteRule>>) -> Self {
        rules.sort_by_key(|rule| std::cmp::Reverse(rule.priority()));
        let stats = rules
            .iter()
            .map(|rule| RuleStats::new(rule.name().to_string(), rule.description().to_string()))
            .collect();
        Self { rules, stats }
    }

    /// Per-rule statistics, in rule order
    pub fn stats(&self) -> &[RuleStats] {
        &self.stats
    }

    /// Rewrite one line.
    ///
    /// `line_number` is 1-based and, like `path`, only used for diagnostics.
    /// Counters and diagnostics go to `session`.
    pub fn rewrite_line(
        &mut self,
        line: &str,
        line_number: usize,
        path: &Path,
        session: &mut MigrationSession,
    ) -> String {
        // Every rule pattern starts with the literal call.
        if !line.contains(LEGACY_CALL) {
            return line.to_string();
        }

        for (rule, stats) in self.rules.iter().zip(self.stats.iter_mut()) {
            stats.applications += 1;

            match rule.apply(line) {
                RuleOutcome::Unchanged => continue,
                RuleOutcome::Rewritten(rewritten) => {
                    stats.transformations += 1;
                    session.record_migration();
                    debug!(rule = rule.name(), path = %path.display(), line = line_number, "rewrote line");
                    return rewritten;
                }
                RuleOutcome::NeedsReview(rewritten) => {
                    stats.transformations += 1;
                    session.record_migration();
                    session.record(Diagnostic::manual_review(path, line_number, line));
                    debug!(rule = rule.name(), path = %path.display(), line = line_number, "rewrote line, needs review");
                    return rewritten;
                }
            }
        }

        session.record(Diagnostic::unmigrated(path, line_number, line));
        debug!(path = %path.display(), line = line_number, "no rule matched");
        line.to_string()
    }
}
