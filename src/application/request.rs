//! Mapping from parsed commands to queue-service requests

use crate::application::errors::RequestError;
use crate::types::command::{Command, CommandKind};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_MESSAGES: u32 = 10;
pub const DEFAULT_VISIBILITY_TIMEOUT: u32 = 30;
pub const DEFAULT_WAIT_TIME_SECONDS: u32 = 0;

/// Credentials profile and region a request runs under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub profile: String,
    pub region: String,
}

/// A single queue-service call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation")]
pub enum QueueRequest {
    SendMessage {
        queue_url: String,
        message_body: String,
        message_attributes: Option<serde_json::Value>,
    },
    ReceiveMessage {
        queue_url: String,
        max_messages: u32,
        visibility_timeout: u32,
        wait_time_seconds: u32,
    },
    PurgeQueue {
        queue_url: String,
    },
}

impl QueueRequest {
    pub fn queue_url(&self) -> &str {
        match self {
            Self::SendMessage { queue_url, .. }
            | Self::ReceiveMessage { queue_url, .. }
            | Self::PurgeQueue { queue_url } => queue_url,
        }
    }
}

/// A request together with the context it runs under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub context: RequestContext,
    pub request: QueueRequest,
}

impl TryFrom<&Command> for QueueRequest {
    type Error = RequestError;

    fn try_from(command: &Command) -> Result<Self, Self::Error> {
        let queue_url = command.target.clone();

        match command.kind {
            CommandKind::Send => {
                let body = command.body.as_ref().ok_or_else(|| RequestError::MissingBody {
                    target: command.target.clone(),
                    line: command.range.start_line + 1,
                })?;
                Ok(Self::SendMessage {
                    queue_url,
                    message_body: serde_json::to_string(body)?,
                    message_attributes: command.attributes.clone(),
                })
            }
            CommandKind::Receive => Ok(Self::ReceiveMessage {
                queue_url,
                max_messages: command.max_messages.unwrap_or(DEFAULT_MAX_MESSAGES),
                visibility_timeout: command
                    .visibility_timeout_seconds
                    .unwrap_or(DEFAULT_VISIBILITY_TIMEOUT),
                wait_time_seconds: command
                    .wait_time_seconds
                    .unwrap_or(DEFAULT_WAIT_TIME_SECONDS),
            }),
            CommandKind::Purge => Ok(Self::PurgeQueue { queue_url }),
        }
    }
}

impl TryFrom<&Command> for Invocation {
    type Error = RequestError;

    fn try_from(command: &Command) -> Result<Self, Self::Error> {
        Ok(Self {
            context: RequestContext {
                profile: command.profile.clone(),
                region: command.region.clone(),
            },
            request: QueueRequest::try_from(command)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn receive_defaults_fill_missing_parameters() {
        let commands = parse("RECEIVE https://q/a\nwait-time: 5", "default", "us-east-1");
        let request = QueueRequest::try_from(&commands[0]).unwrap();

        assert_eq!(
            request,
            QueueRequest::ReceiveMessage {
                queue_url: "https://q/a".to_string(),
                max_messages: 10,
                visibility_timeout: 30,
                wait_time_seconds: 5,
            }
        );
    }

    #[test]
    fn send_serializes_body() {
        let commands = parse(
            "SEND https://q/a\nprofile: ops\n{\"n\": [1, 2]}",
            "default",
            "us-east-1",
        );
        let invocation = Invocation::try_from(&commands[0]).unwrap();

        assert_eq!(invocation.context.profile, "ops");
        assert_eq!(invocation.context.region, "us-east-1");
        assert_eq!(
            invocation.request,
            QueueRequest::SendMessage {
                queue_url: "https://q/a".to_string(),
                message_body: r#"{"n":[1,2]}"#.to_string(),
                message_attributes: None,
            }
        );
    }

    #[test]
    fn send_without_body_is_rejected() {
        let commands = parse("\n\nSEND https://q/a\n###", "default", "us-east-1");
        let result = QueueRequest::try_from(&commands[0]);

        assert!(matches!(
            result,
            Err(RequestError::MissingBody { line: 3, .. })
        ));
    }

    #[test]
    fn purge_only_needs_target() {
        let commands = parse("PURGE https://q/a", "default", "us-east-1");
        let request = QueueRequest::try_from(&commands[0]).unwrap();

        assert_eq!(request.queue_url(), "https://q/a");
        assert!(matches!(request, QueueRequest::PurgeQueue { .. }));
    }
}
