//! Receive parameter checking implementation

use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::types::command::{Command, CommandKind};

const CATEGORY: &str = "receive";

/// Check `RECEIVE` parameters against the configured limits
pub fn check(commands: &[Command], result: &mut LintResult, config: &LintConfig) {
    let limits = &config.receive;

    for command in commands
        .iter()
        .filter(|command| command.kind == CommandKind::Receive)
    {
        let line = command.range.start_line;

        if let Some(count) = command.max_messages
            && !(limits.min_max_messages..=limits.max_max_messages).contains(&count)
        {
            result.add_issue(LintIssue::new(
                LintLevel::Error,
                CATEGORY,
                line,
                format!(
                    "max-messages {} is outside {}..={}",
                    count, limits.min_max_messages, limits.max_max_messages
                ),
            ));
        }

        if let Some(seconds) = command.visibility_timeout_seconds
            && seconds > limits.max_visibility_timeout
        {
            result.add_issue(LintIssue::new(
                LintLevel::Error,
                CATEGORY,
                line,
                format!(
                    "visibility-timeout {}s exceeds {}s",
                    seconds, limits.max_visibility_timeout
                ),
            ));
        }

        if let Some(seconds) = command.wait_time_seconds
            && seconds > limits.max_wait_time
        {
            result.add_issue(LintIssue::new(
                LintLevel::Error,
                CATEGORY,
                line,
                format!("wait-time {}s exceeds {}s", seconds, limits.max_wait_time),
            ));
        }
    }
}
