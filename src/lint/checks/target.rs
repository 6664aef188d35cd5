//! Target checking implementation

use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::types::command::Command;

/// Check that every target looks like a queue URL
pub fn check(commands: &[Command], result: &mut LintResult, config: &LintConfig) {
    for command in commands {
        let looks_like_url = config.target.schemes.iter().any(|scheme| {
            command
                .target
                .strip_prefix(scheme.as_str())
                .and_then(|rest| rest.strip_prefix("://"))
                .is_some_and(|rest| !rest.is_empty())
        });

        if !looks_like_url {
            result.add_issue(LintIssue::new(
                LintLevel::Warning,
                "target",
                command.range.start_line,
                format!("Target '{}' is not a queue URL", command.target),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn target_check_plain_name() {
        let commands = parse("PURGE orders\n###\nPURGE https://q/orders", "p", "r");
        let mut result = LintResult::new();

        check(&commands, &mut result, &LintConfig::default());

        assert_eq!(result.warning_count, 1);
        assert_eq!(result.issues[0].line, 1);
        assert!(result.issues[0].message.contains("'orders'"));
    }

    #[test]
    fn target_check_scheme_without_host() {
        let commands = parse("PURGE https://", "p", "r");
        let mut result = LintResult::new();

        check(&commands, &mut result, &LintConfig::default());

        assert_eq!(result.warning_count, 1);
    }
}
