//! Lint module for request file checking
//!
//! Runs static checks over parsed commands:
//! - JSON body problems on `SEND` blocks
//! - `RECEIVE` parameters outside the service limits
//! - Targets that do not look like queue URLs

use crate::types::command::Command;
use serde::{Deserialize, Serialize};

pub mod checks;
pub mod config;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintLevel {
    /// Running the command would fail or be rejected by the queue service
    Error,
    /// The command runs, but probably not the way it was meant to
    Warning,
}

impl LintLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A finding tied to one line of the request file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintIssue {
    pub level: LintLevel,
    /// Check that raised it: `body`, `receive` or `target`
    pub category: String,
    /// 1-based, as editors and the CLI print it
    pub line: usize,
    pub message: String,
}

impl LintIssue {
    /// `line_index` is the 0-based index the parser reports
    pub fn new(
        level: LintLevel,
        category: &str,
        line_index: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            category: category.to_string(),
            line: line_index + 1,
            message: message.into(),
        }
    }
}

/// Findings for a whole document, with per-level tallies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LintResult {
    pub issues: Vec<LintIssue>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl LintResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: LintIssue) {
        match issue.level {
            LintLevel::Error => self.error_count += 1,
            LintLevel::Warning => self.warning_count += 1,
        }
        self.issues.push(issue);
    }

    /// True when at least one command would fail to run
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Lint commands with default configuration
pub fn lint(commands: &[Command]) -> LintResult {
    let config = config::LintConfig::default();
    lint_with_config(commands, &config)
}

/// Lint commands with custom configuration
pub fn lint_with_config(commands: &[Command], config: &config::LintConfig) -> LintResult {
    let mut result = LintResult::new();

    if config.body.enabled {
        checks::body::check(commands, &mut result, config);
    }

    if config.receive.enabled {
        checks::receive::check(commands, &mut result, config);
    }

    if config.target.enabled {
        checks::target::check(commands, &mut result, config);
    }

    // Issues sorted by position regardless of which check found them
    result.issues.sort_by_key(|issue| issue.line);
    result
}
