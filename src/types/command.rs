//! Parsed command records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Queue operation a command block requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    /// Send one message with the block's JSON body
    Send,
    /// Receive messages from the target queue
    Receive,
    /// Delete every message in the target queue
    Purge,
}

impl CommandKind {
    /// Match a header keyword. Keywords are case-sensitive.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "SEND" => Some(Self::Send),
            "RECEIVE" => Some(Self::Receive),
            "PURGE" => Some(Self::Purge),
            _ => None,
        }
    }

    /// The header keyword for this kind
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Send => "SEND",
            Self::Receive => "RECEIVE",
            Self::Purge => "PURGE",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Keys accepted on parameter lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterKey {
    Profile,
    Region,
    MaxMessages,
    VisibilityTimeout,
    WaitTime,
}

impl ParameterKey {
    pub const ALL: [ParameterKey; 5] = [
        ParameterKey::Profile,
        ParameterKey::Region,
        ParameterKey::MaxMessages,
        ParameterKey::VisibilityTimeout,
        ParameterKey::WaitTime,
    ];

    /// Key as written before the colon
    pub fn name(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Region => "region",
            Self::MaxMessages => "max-messages",
            Self::VisibilityTimeout => "visibility-timeout",
            Self::WaitTime => "wait-time",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// Whether a block of `kind` accepts this key
    pub fn applies_to(self, kind: CommandKind) -> bool {
        match self {
            Self::Profile | Self::Region => true,
            Self::MaxMessages | Self::VisibilityTimeout | Self::WaitTime => {
                kind == CommandKind::Receive
            }
        }
    }
}

/// A parameter line the parser applied to its command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterEntry {
    pub key: ParameterKey,
    pub value: String,
    /// 0-based line of the `key: value` text
    pub line: usize,
}

/// Inclusive span of 0-based line indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRange {
    pub start_line: usize,
    pub end_line: usize,
}

impl SourceRange {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    pub fn contains(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// Recoverable problem found while scanning a command block
///
/// Warnings never stop a command from being emitted; they ride along with it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ParseWarning {
    #[error("malformed JSON body starting at line {}: {}", .line + 1, .message)]
    MalformedBody { line: usize, message: String },
    #[error("invalid integer '{}' for '{}' at line {}", .value, .key, .line + 1)]
    InvalidNumber {
        key: String,
        value: String,
        line: usize,
    },
}

impl ParseWarning {
    /// 0-based line the warning points at
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedBody { line, .. } | Self::InvalidNumber { line, .. } => *line,
        }
    }
}

/// A sealed command block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub kind: CommandKind,
    /// Queue address the operation runs against
    pub target: String,
    pub profile: String,
    pub region: String,
    /// JSON payload of a `SEND` block, absent when missing or malformed
    pub body: Option<serde_json::Value>,
    /// Message attributes passthrough; no syntax populates it yet
    pub attributes: Option<serde_json::Value>,
    pub max_messages: Option<u32>,
    pub visibility_timeout_seconds: Option<u32>,
    pub wait_time_seconds: Option<u32>,
    pub range: SourceRange,
    /// Lines of the last JSON body accumulated for this command
    pub body_range: Option<SourceRange>,
    /// Applied parameter lines in source order; later lines win
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
}

impl Command {
    /// Header line, as shown in outlines and logs
    pub fn title(&self) -> String {
        format!("{} {}", self.kind, self.target)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
