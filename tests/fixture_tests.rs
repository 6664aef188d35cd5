//! Fixture tests - a realistic request file through parse, lint, outline and plan

use queuepad::application::{Invocation, QueueRequest};
use queuepad::lint::{self, LintLevel};
use queuepad::outline::{self, SymbolKind};
use queuepad::{CommandKind, Settings, SourceRange, parse_with};
use serde_json::json;

const ORDERS: &str = include_str!("fixtures/orders.queue");

#[cfg(test)]
mod fixture_tests {
    use super::*;

    fn commands() -> Vec<queuepad::Command> {
        let settings = Settings::from_json(r#"{ "defaultProfile": "dev" }"#).unwrap();
        parse_with(ORDERS, &settings.defaults())
    }

    /// Fixture: every block is recognised with the right range
    #[test]
    fn fixture_commands_and_ranges() {
        let commands = commands();

        let summary: Vec<(CommandKind, SourceRange)> =
            commands.iter().map(|c| (c.kind, c.range)).collect();
        assert_eq!(
            summary,
            vec![
                (CommandKind::Send, SourceRange::new(2, 10)),
                (CommandKind::Receive, SourceRange::new(12, 16)),
                (CommandKind::Receive, SourceRange::new(19, 21)),
                (CommandKind::Send, SourceRange::new(23, 26)),
                (CommandKind::Purge, SourceRange::new(27, 28)),
            ]
        );

        assert_eq!(commands[0].profile, "ops");
        assert_eq!(
            commands[0].body,
            Some(json!({"orderId": 1001, "items": [{"sku": "A-1", "qty": 2}]}))
        );

        assert_eq!(commands[1].profile, "dev");
        assert_eq!(commands[1].max_messages, Some(5));
        assert_eq!(commands[1].visibility_timeout_seconds, Some(60));
        assert_eq!(commands[1].wait_time_seconds, Some(10));

        // The unterminated body swallows the delimiter and is cut at the next header
        assert_eq!(commands[3].body, None);
        assert_eq!(commands[3].warnings.len(), 1);
        assert_eq!(commands[3].warnings[0].line(), 24);
    }

    /// Fixture: lint flags the oversized receive and the broken body
    #[test]
    fn fixture_lint() {
        let result = lint::lint(&commands());

        let issues: Vec<(usize, LintLevel, &str)> = result
            .issues
            .iter()
            .map(|issue| (issue.line, issue.level, issue.category.as_str()))
            .collect();
        assert_eq!(
            issues,
            vec![
                (20, LintLevel::Error, "receive"),
                (24, LintLevel::Error, "body"),
                (25, LintLevel::Warning, "body"),
            ]
        );
        assert_eq!(result.error_count, 2);
        assert_eq!(result.warning_count, 1);
    }

    /// Fixture: outline has one lens per command and nests body keys
    #[test]
    fn fixture_outline() {
        let commands = commands();

        let lens_lines: Vec<usize> = outline::code_lenses(&commands)
            .iter()
            .map(|lens| lens.line)
            .collect();
        assert_eq!(lens_lines, vec![2, 12, 19, 23, 27]);

        let symbols = outline::document_symbols(&commands);
        let send = &symbols[0];
        let children: Vec<(&str, SymbolKind)> = send
            .children
            .iter()
            .map(|c| (c.name.as_str(), c.kind))
            .collect();
        assert_eq!(
            children,
            vec![
                ("profile", SymbolKind::Parameter),
                ("region", SymbolKind::Parameter),
                ("body", SymbolKind::Body),
            ]
        );

        let body = &send.children[2];
        assert_eq!(body.range, SourceRange::new(6, 9));
        let keys: Vec<&str> = body.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(keys, vec!["items", "orderId"]);
    }

    /// Fixture: requests carry the receive defaults and the serialized body
    #[test]
    fn fixture_plan() {
        let commands = commands();

        let send = Invocation::try_from(&commands[0]).unwrap();
        assert_eq!(send.context.profile, "ops");
        match send.request {
            QueueRequest::SendMessage { message_body, .. } => {
                let round_trip: serde_json::Value = serde_json::from_str(&message_body).unwrap();
                assert_eq!(Some(round_trip), commands[0].body);
            }
            other => panic!("Expected SendMessage, got {other:?}"),
        }

        let receive = Invocation::try_from(&commands[2]).unwrap();
        assert_eq!(
            receive.request,
            QueueRequest::ReceiveMessage {
                queue_url: commands[2].target.clone(),
                max_messages: 25,
                visibility_timeout: 30,
                wait_time_seconds: 0,
            }
        );

        assert!(Invocation::try_from(&commands[3]).is_err());
    }
}
