//! Queue-service seam
//!
//! Hosts implement [`QueueService`] over their transport of choice; the crate
//! itself only ships an in-memory implementation.

use crate::application::errors::{ExecuteError, ServiceError};
use crate::application::request::Invocation;
use crate::types::command::Command;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A message returned by a receive call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedMessage {
    pub message_id: String,
    pub receipt_handle: String,
    pub body: String,
}

/// Outcome of a queue-service call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum QueueResponse {
    Sent { message_id: String },
    Received { messages: Vec<ReceivedMessage> },
    Purged,
}

/// Queue service the parsed commands run against
#[async_trait]
pub trait QueueService: Send + Sync {
    /// Perform one request
    async fn call(&self, invocation: &Invocation) -> Result<QueueResponse, ServiceError>;
}

/// Map `command` to a request and run it
pub async fn execute<S>(service: &S, command: &Command) -> Result<QueueResponse, ExecuteError>
where
    S: QueueService + ?Sized,
{
    let invocation = Invocation::try_from(command)?;
    log::info!(
        "Running '{}' as {} in {}",
        command.title(),
        invocation.context.profile,
        invocation.context.region
    );

    let response = service.call(&invocation).await?;
    Ok(response)
}
