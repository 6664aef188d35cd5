//! # queuepad
//!
//! Parses line-oriented queue request files into command descriptors, and
//! runs them against a pluggable queue service.
//!
//! ## Request files
//!
//! ```text
//! SEND https://sqs.us-east-1.amazonaws.com/123456789012/orders
//! profile: ops
//! {"id": 42}
//! ###
//! RECEIVE https://sqs.us-east-1.amazonaws.com/123456789012/orders
//! max-messages: 5
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use queuepad::{CommandKind, parse};
//!
//! let text = "RECEIVE https://q/orders\nmax-messages: 5\n###";
//! let commands = parse(text, "default", "us-east-1");
//!
//! assert_eq!(commands.len(), 1);
//! assert_eq!(commands[0].kind, CommandKind::Receive);
//! assert_eq!(commands[0].max_messages, Some(5));
//! assert_eq!(commands[0].profile, "default");
//! ```

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod lint;
pub mod outline;
pub mod parser;
pub mod types;

pub use application::{CommandRunner, Invocation, QueueRequest, QueueResponse, QueueService};
pub use config::Settings;
pub use infrastructure::InMemoryQueueService;
pub use lint::{LintResult, lint};
pub use parser::{Defaults, parse, parse_with};
pub use types::{Command, CommandKind, ParameterKey, ParseWarning, SourceRange};
