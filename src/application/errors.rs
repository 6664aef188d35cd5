//! Application errors

/// A command could not be turned into a request
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("SEND to '{target}' at line {line} has no valid JSON body")]
    MissingBody { target: String, line: usize },
    #[error("Failed to serialize message body: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors reported by a queue-service implementation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Queue not found: {queue_url}")]
    QueueNotFound { queue_url: String },
    #[error("Request rejected: {message}")]
    Rejected { message: String },
    #[error("Queue service unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Errors from running a command end to end
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Run for line {line} was cancelled")]
    Cancelled { line: usize },
}
