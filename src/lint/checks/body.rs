//! Body checking implementation

use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::types::command::{Command, CommandKind};

const CATEGORY: &str = "body";

/// Check `SEND` bodies and surface parse warnings
pub fn check(commands: &[Command], result: &mut LintResult, config: &LintConfig) {
    for command in commands {
        for warning in &command.warnings {
            result.add_issue(LintIssue::new(
                LintLevel::Warning,
                CATEGORY,
                warning.line(),
                warning.to_string(),
            ));
        }

        if config.body.require_body && command.kind == CommandKind::Send && command.body.is_none()
        {
            result.add_issue(LintIssue::new(
                LintLevel::Error,
                CATEGORY,
                command.range.start_line,
                format!("'{}' has no valid JSON body to send", command.title()),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn body_check_missing_body() {
        let commands = parse("SEND https://q/a\n###", "default", "us-east-1");
        let mut result = LintResult::new();

        check(&commands, &mut result, &LintConfig::default());

        assert_eq!(result.error_count, 1);
        assert_eq!(result.issues[0].line, 1);
        assert!(result.issues[0].message.contains("no valid JSON body"));
    }

    #[test]
    fn body_check_malformed_body_reports_warning_and_error() {
        let commands = parse("SEND https://q/a\n{\"a\": }\n###", "default", "us-east-1");
        let mut result = LintResult::new();

        check(&commands, &mut result, &LintConfig::default());

        assert_eq!(result.warning_count, 1);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.issues[0].line, 2);
        assert!(result.issues[0].message.contains("malformed JSON body"));
    }

    #[test]
    fn body_check_optional_body() {
        let commands = parse("SEND https://q/a\n###", "default", "us-east-1");
        let mut result = LintResult::new();
        let mut config = LintConfig::default();
        config.body.require_body = false;

        check(&commands, &mut result, &config);

        assert!(result.is_clean());
    }
}
