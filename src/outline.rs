//! Editor affordances built from parsed commands
//!
//! - Code lenses: one "run" action per command, on its header line
//! - Document symbols: a tree of commands, their parameter lines and body keys

use crate::types::command::{Command, ParameterEntry, SourceRange};
use serde::{Deserialize, Serialize};

/// Inline "run" action anchored at a command's header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLens {
    /// 0-based line of the command header
    pub line: usize,
    pub title: String,
    /// Position of the command in the parsed list
    pub command_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolKind {
    Command,
    Parameter,
    Body,
    Field,
}

/// Node of the document outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSymbol {
    pub name: String,
    pub detail: Option<String>,
    pub kind: SymbolKind,
    pub range: SourceRange,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentSymbol>,
}

/// One run action per command
pub fn code_lenses(commands: &[Command]) -> Vec<CodeLens> {
    commands
        .iter()
        .enumerate()
        .map(|(index, command)| CodeLens {
            line: command.range.start_line,
            title: format!("Run {}", command.kind),
            command_index: index,
        })
        .collect()
}

/// Build the outline of parsed commands
pub fn document_symbols(commands: &[Command]) -> Vec<DocumentSymbol> {
    commands
        .iter()
        .map(|command| {
            let mut children: Vec<DocumentSymbol> =
                command.parameters.iter().map(parameter_symbol).collect();
            if let Some(symbol) = body_symbol(command) {
                children.push(symbol);
            }

            DocumentSymbol {
                name: command.title(),
                detail: Some(format!("{} / {}", command.profile, command.region)),
                kind: SymbolKind::Command,
                range: command.range,
                children,
            }
        })
        .collect()
}

fn parameter_symbol(entry: &ParameterEntry) -> DocumentSymbol {
    DocumentSymbol {
        name: entry.key.name().to_string(),
        detail: Some(entry.value.clone()),
        kind: SymbolKind::Parameter,
        range: SourceRange::new(entry.line, entry.line),
        children: Vec::new(),
    }
}

fn body_symbol(command: &Command) -> Option<DocumentSymbol> {
    let (body, range) = (command.body.as_ref()?, command.body_range?);

    let children = match body {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(key, value)| field_symbol(key.clone(), value, range))
            .collect(),
        serde_json::Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| field_symbol(format!("[{index}]"), value, range))
            .collect(),
        _ => Vec::new(),
    };

    Some(DocumentSymbol {
        name: "body".to_string(),
        detail: None,
        kind: SymbolKind::Body,
        range,
        children,
    })
}

fn field_symbol(name: String, value: &serde_json::Value, range: SourceRange) -> DocumentSymbol {
    DocumentSymbol {
        name,
        detail: Some(value_type(value).to_string()),
        kind: SymbolKind::Field,
        range,
        children: Vec::new(),
    }
}

fn value_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const DOCUMENT: &str = r#"SEND https://q/orders
profile: ops
{
  "id": 7,
  "tags": ["a"]
}
###
RECEIVE https://q/orders
max-messages: 4
region: eu-west-1
###
PURGE https://q/orders
max-messages: 4
"#;

    #[test]
    fn code_lenses_one_per_command() {
        let commands = parse(DOCUMENT, "default", "us-east-1");
        let lenses = code_lenses(&commands);

        assert_eq!(
            lenses,
            vec![
                CodeLens {
                    line: 0,
                    title: "Run SEND".to_string(),
                    command_index: 0
                },
                CodeLens {
                    line: 7,
                    title: "Run RECEIVE".to_string(),
                    command_index: 1
                },
                CodeLens {
                    line: 11,
                    title: "Run PURGE".to_string(),
                    command_index: 2
                },
            ]
        );
    }

    #[test]
    fn document_symbols_tree() {
        let commands = parse(DOCUMENT, "default", "us-east-1");
        let symbols = document_symbols(&commands);

        assert_eq!(symbols.len(), 3);

        let send = &symbols[0];
        assert_eq!(send.name, "SEND https://q/orders");
        assert_eq!(send.detail.as_deref(), Some("ops / us-east-1"));
        assert_eq!(send.range, SourceRange::new(0, 6));
        let names: Vec<&str> = send.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["profile", "body"]);

        let body = &send.children[1];
        assert_eq!(body.range, SourceRange::new(2, 5));
        let fields: Vec<(&str, Option<&str>)> = body
            .children
            .iter()
            .map(|c| (c.name.as_str(), c.detail.as_deref()))
            .collect();
        assert_eq!(fields, vec![("id", Some("number")), ("tags", Some("array"))]);

        let receive = &symbols[1];
        let params: Vec<(&str, usize)> = receive
            .children
            .iter()
            .map(|c| (c.name.as_str(), c.range.start_line))
            .collect();
        assert_eq!(params, vec![("max-messages", 8), ("region", 9)]);

        // Receive-only keys are inert under PURGE
        assert!(symbols[2].children.is_empty());
    }

    #[test]
    fn document_symbols_skip_malformed_body() {
        let text = "SEND https://q/a\n{\"broken\": }\n###";
        let commands = parse(text, "default", "us-east-1");
        let symbols = document_symbols(&commands);

        assert!(symbols[0].children.is_empty());
    }

    #[test]
    fn document_symbols_ignore_text_inside_replaced_body() {
        let text = "SEND https://q/a\n{\nregion: eu\n}\n{\"ok\": 1}\n###";
        let commands = parse(text, "default", "us-east-1");
        assert_eq!(commands[0].region, "us-east-1");

        let symbols = document_symbols(&commands);
        let names: Vec<&str> = symbols[0]
            .children
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["body"]);
        assert_eq!(symbols[0].children[0].range, SourceRange::new(4, 4));
    }
}
