/*!
# Rewrite Rules

Rules that turn a legacy `print(...)` call into template syntax. Each rule
looks at a single line and either leaves it alone or rewrites every matching
call on it. The [`LineRewriter`](crate::rewriter::LineRewriter) tries them in
priority order and stops at the first one that changes the line.
*/

use regex::Regex;
use serde::Serialize;

use crate::error::{MigrateError, Result};

/// The call form being migrated away from
pub const LEGACY_CALL: &str = "print(";

/// Characters that mark an argument as an expression rather than a value
const EXPRESSION_OPERATORS: [char; 6] = ['+', '-', '*', '/', '(', ')'];

/// Result of applying one rule to one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule did not match, or matching left the line as it was
    Unchanged,
    /// The line was rewritten
    Rewritten(String),
    /// The line was rewritten, but the result is not guaranteed to be correct
    NeedsReview(String),
}

/// A single textual rewrite rule
pub trait RewriteRule: Send + Sync {
    /// Human-readable name for this rule
    fn name(&self) -> &'static str;

    /// Detailed description of what this rule does
    fn description(&self) -> &'static str;

    /// Priority for rule ordering (higher priority runs first)
    fn priority(&self) -> u32 {
        100
    }

    /// Apply the rule to one line, terminator included
    fn apply(&self, line: &str) -> RuleOutcome;
}

/// A plain substitution: every match of `pattern` is replaced by `replacement`
pub struct RegexRule {
    name: &'static str,
    description: &'static str,
    priority: u32,
    pattern: Regex,
    replacement: &'static str,
}

impl RegexRule {
    pub fn new(
        name: &'static str,
        description: &'static str,
        pattern: &str,
        replacement: &'static str,
    ) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| MigrateError::pattern(name, e))?;
        Ok(Self {
            name,
            description,
            priority: 100,
            pattern,
            replacement,
        })
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// `print([template])` → `[template]`
    ///
    /// Has to run before the others, which would otherwise match inside an
    /// argument that is already a template.
    pub fn template_argument() -> Result<Self> {
        Ok(Self::new(
            "TemplateArgument",
            "Unwraps print([...]) whose argument is already a template",
            r"print\(\[(.*?)\]\)",
            "[${1}]",
        )?
        .with_priority(400))
    }

    /// `print("string")` → `["string"]`, escapes inside the string allowed
    pub fn string_literal() -> Result<Self> {
        Ok(Self::new(
            "StringLiteral",
            "Wraps a quoted string argument in a template",
            r#"print\("((?:[^"\\]|\\.)*)"\)"#,
            r#"["${1}"]"#,
        )?
        .with_priority(300))
    }

    /// `print(variable)` → `[variable]`
    ///
    /// Lowercase identifiers only: method calls, field access and indexing
    /// must fall through to the fallback or to manual review.
    pub fn identifier() -> Result<Self> {
        Ok(Self::new(
            "Identifier",
            "Wraps a bare lowercase identifier argument in a template",
            r"print\(([a-z_][a-z0-9_]*)\)",
            "[${1}]",
        )?
        .with_priority(200))
    }
}

impl RewriteRule for RegexRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn apply(&self, line: &str) -> RuleOutcome {
        if !self.pattern.is_match(line) {
            return RuleOutcome::Unchanged;
        }

        let rewritten = self.pattern.replace_all(line, self.replacement);
        if rewritten == line {
            RuleOutcome::Unchanged
        } else {
            RuleOutcome::Rewritten(rewritten.into_owned())
        }
    }
}

/// Catch-all for `print(expression)` at the end of a line.
///
/// Only fires when the call is followed by nothing but whitespace, a `--`
/// comment, or the end of the line, and only when the first call's argument
/// contains an operator or parenthesis. The rewrite is not checked for
/// well-formedness, so every hit needs review.
pub struct ExpressionFallbackRule {
    priority: u32,
    pattern: Regex,
}

impl ExpressionFallbackRule {
    const NAME: &'static str = "ExpressionFallback";

    pub fn new() -> Result<Self> {
        // Group 2 stands in for a lookahead and is written back unchanged.
        let pattern = Regex::new(r"print\((.*?)\)(\s*(?:--|$))")
            .map_err(|e| MigrateError::pattern(Self::NAME, e))?;
        Ok(Self {
            priority: 100,
            pattern,
        })
    }
}

impl RewriteRule for ExpressionFallbackRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Unwraps print(expression) at end of line into a template, flagged for review"
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn apply(&self, line: &str) -> RuleOutcome {
        let Some(captures) = self.pattern.captures(line) else {
            return RuleOutcome::Unchanged;
        };

        let content = captures.get(1).map_or("", |m| m.as_str());
        if !content.contains(EXPRESSION_OPERATORS) {
            return RuleOutcome::Unchanged;
        }

        let rewritten = self.pattern.replace_all(line, "[${1}]${2}");
        if rewritten == line {
            RuleOutcome::Unchanged
        } else {
            RuleOutcome::NeedsReview(rewritten.into_owned())
        }
    }
}

/// The built-in rules, highest priority first
pub fn default_rules() -> Result<Vec<Box<dyn RewriteRule>>> {
    let mut rules: Vec<Box<dyn RewriteRule>> = vec![
        Box::new(RegexRule::template_argument()?),
        Box::new(RegexRule::string_literal()?),
        Box::new(RegexRule::identifier()?),
        Box::new(ExpressionFallbackRule::new()?),
    ];
    rules.sort_by_key(|rule| std::cmp::Reverse(rule.priority()));
    Ok(rules)
}

/// Rule execution statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleStats {
    pub rule_name: String,
    pub description: String,
    /// Lines the rule was tried on
    pub applications: u64,
    /// Lines the rule rewrote
    pub transformations: u64,
}

impl RuleStats {
    pub fn new(rule_name: String, description: String) -> Self {
        Self {
            rule_name,
            description,
            applications: 0,
            transformations: 0,
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.applications == 0 {
            0.0
        } else {
            (self.transformations as f64) / (self.applications as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rewritten(outcome: RuleOutcome) -> String {
        match outcome {
            RuleOutcome::Rewritten(line) => line,
            other => panic!("Expected Rewritten, got {other:?}"),
        }
    }

    #[test]
    fn test_template_argument() {
        let rule = RegexRule::template_argument().unwrap();
        assert_eq!(rewritten(rule.apply("print([Hello, name])\n")), "[Hello, name]\n");
        assert_eq!(
            rewritten(rule.apply("  print([a]) print([b])")),
            "  [a] [b]",
            "every call on the line is rewritten"
        );
        assert_eq!(rule.apply("print(\"x\")"), RuleOutcome::Unchanged);
    }

    #[test]
    fn test_template_argument_is_non_greedy() {
        let rule = RegexRule::template_argument().unwrap();
        assert_eq!(rewritten(rule.apply("print([a]) x])")), "[a] x])");
    }

    #[test]
    fn test_string_literal() {
        let rule = RegexRule::string_literal().unwrap();
        assert_eq!(rewritten(rule.apply("print(\"hi\")\n")), "[\"hi\"]\n");
        assert_eq!(
            rewritten(rule.apply(r#"print("say \"hi\"")"#)),
            r#"["say \"hi\""]"#
        );
        assert_eq!(rewritten(rule.apply(r#"print("a\\b\n")"#)), r#"["a\\b\n"]"#);
        assert_eq!(rewritten(rule.apply(r#"print("")"#)), r#"[""]"#);
    }

    #[test]
    fn test_string_literal_rejects_concatenation() {
        let rule = RegexRule::string_literal().unwrap();
        assert_eq!(rule.apply(r#"print("a" + b)"#), RuleOutcome::Unchanged);
    }

    #[test]
    fn test_identifier() {
        let rule = RegexRule::identifier().unwrap();
        assert_eq!(rewritten(rule.apply("print(x)\n")), "[x]\n");
        assert_eq!(rewritten(rule.apply("print(_total_2)")), "[_total_2]");

        for line in ["print(Name)", "print(foo.bar)", "print(foo())", "print(2x)", "print(a b)"] {
            assert_eq!(rule.apply(line), RuleOutcome::Unchanged, "{line}");
        }
    }

    #[test]
    fn test_fallback_needs_review() {
        let rule = ExpressionFallbackRule::new().unwrap();
        assert_eq!(
            rule.apply("print(a + b)\n"),
            RuleOutcome::NeedsReview("[a + b]\n".to_string())
        );
        assert_eq!(
            rule.apply("print(\"n: \" + n) -- show it\n"),
            RuleOutcome::NeedsReview("[\"n: \" + n] -- show it\n".to_string())
        );
        assert_eq!(
            rule.apply("print(x - 1)   "),
            RuleOutcome::NeedsReview("[x - 1]   ".to_string())
        );
    }

    #[test]
    fn test_fallback_requires_end_of_line() {
        let rule = ExpressionFallbackRule::new().unwrap();
        assert_eq!(rule.apply("print(a + b); x = 1"), RuleOutcome::Unchanged);
    }

    #[test]
    fn test_fallback_requires_operator() {
        let rule = ExpressionFallbackRule::new().unwrap();
        assert_eq!(rule.apply("print(Name)\n"), RuleOutcome::Unchanged);
        assert_eq!(rule.apply("print(foo.bar)"), RuleOutcome::Unchanged);
    }

    #[test]
    fn test_fallback_extends_to_last_paren() {
        let rule = ExpressionFallbackRule::new().unwrap();
        assert_eq!(
            rule.apply("print(foo.bar())"),
            RuleOutcome::NeedsReview("[foo.bar()]".to_string())
        );
    }

    #[test]
    fn test_default_rules_order() {
        let rules = default_rules().unwrap();
        let names: Vec<_> = rules.iter().map(|rule| rule.name()).collect();
        assert_eq!(
            names,
            vec!["TemplateArgument", "StringLiteral", "Identifier", "ExpressionFallback"]
        );
    }

    #[test]
    fn test_rule_stats_success_rate() {
        let mut stats = RuleStats::new(
            "Identifier".to_string(),
            "Unwraps print(name) for a lowercase identifier".to_string(),
        );
        assert_eq!(stats.success_rate(), 0.0);
        stats.applications = 4;
        stats.transformations = 1;
        assert_eq!(stats.success_rate(), 0.25);
    }
}
