// Validation for CODEOWNERS rules files

use crate::parser;
use globset::Glob;
use owo_colors::OwoColorize;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct LintIssue {
    pub severity: Severity,
    /// 1-based line number
    pub line: usize,
    pub code: &'static str,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Default)]
pub struct LintResult {
    pub issues: Vec<LintIssue>,
}

impl LintResult {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    fn push(&mut self, severity: Severity, line: usize, code: &'static str, message: String, suggestion: Option<String>) {
        self.issues.push(LintIssue { severity, line, code, message, suggestion });
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn with_code(&self, code: &str) -> Vec<&LintIssue> {
        self.issues.iter().filter(|i| i.code == code).collect()
    }

    pub fn print(&self, file: &str) {
        if self.issues.is_empty() {
            println!("{} {}", "✅".bright_green(), "All checks passed!".green().bold());
            return;
        }

        let errors: Vec<_> = self.issues.iter().filter(|i| i.severity == Severity::Error).collect();
        if !errors.is_empty() {
            println!("{} {} errors", "✗".bright_red(), errors.len().to_string().red().bold());
            println!();
            for issue in errors {
                println!("  {} {}:{}", "•".bright_red(), file.bright_white(), issue.line);
                println!("    {}", issue.message.red());
                if let Some(ref suggestion) = issue.suggestion {
                    println!("    {} {}", "→".bright_blue(), suggestion.bright_blue());
                }
                println!();
            }
        }

        let warnings: Vec<_> = self.issues.iter().filter(|i| i.severity == Severity::Warning).collect();
        if !warnings.is_empty() {
            println!("{} {} warnings", "▸ ".bright_yellow(), warnings.len().to_string().yellow().bold());
            println!();
            for issue in warnings {
                println!("  {} {}:{}", "•".bright_yellow(), file.bright_white(), issue.line);
                println!("    {}", issue.message.yellow());
                if let Some(ref suggestion) = issue.suggestion {
                    println!("    {} {}", "→".bright_blue(), suggestion.bright_blue());
                }
                println!();
            }
        }

        for issue in self.issues.iter().filter(|i| i.severity == Severity::Info) {
            println!("  {} {}:{} {}", "→".bright_blue(), file.bright_white(), issue.line, issue.message.bright_blue());
        }

        println!("{}", "─".repeat(60).bright_black());
        let summary = format!("Found {} errors, {} warnings", self.error_count(), self.warning_count());
        if self.has_errors() {
            println!("{}", summary.red());
        } else {
            println!("{}", summary.yellow());
        }
    }
}

fn owner_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(@[A-Za-z0-9][A-Za-z0-9-]*(/[A-Za-z0-9][A-Za-z0-9._-]*)?|[^@\s]+@[^@\s]+\.[^@\s]+)$")
            .expect("owner pattern is valid")
    })
}

pub fn is_valid_owner(owner: &str) -> bool {
    owner_regex().is_match(owner)
}

/// Check every entry of a rules file
pub fn lint_text(text: &str) -> LintResult {
    let mut result = LintResult::new();
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    parser::for_each_top_level_entry(text, |entry| {
        let line = entry.line + 1;

        if let Some(first) = first_seen.get(&entry.text) {
            result.push(
                Severity::Warning,
                line,
                "duplicate-entry",
                format!("Entry '{}' duplicates line {}", entry.text, first),
                Some(format!("Remove line {}", line)),
            );
        } else {
            first_seen.insert(entry.text.clone(), line);
        }

        if let Err(e) = Glob::new(&entry.pattern) {
            result.push(
                Severity::Error,
                line,
                "invalid-pattern",
                format!("Invalid pattern '{}': {}", entry.pattern, e.kind()),
                None,
            );
        }

        if entry.owners.is_empty() {
            result.push(
                Severity::Info,
                line,
                "no-owners",
                format!("'{}' has no owners and will be unowned", entry.pattern),
                None,
            );
        }

        for owner in entry.owners.iter().filter(|o| !is_valid_owner(o)) {
            result.push(
                Severity::Warning,
                line,
                "invalid-owner",
                format!("Owner '{}' is not a @user, @org/team or email address", owner),
                Some(format!("Did you mean '@{}'?", owner.trim_start_matches('@'))),
            );
        }
    });

    result
}
