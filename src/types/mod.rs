//! Core types for the queuepad library
//!
//! - Command: a sealed command block with its source range
//! - ParseWarning: recoverable diagnostics attached to a command

pub mod command;

pub use command::{
    Command, CommandKind, ParameterEntry, ParameterKey, ParseWarning, SourceRange,
};
