//! Application layer - Running parsed commands
//!
//! Maps commands to queue-service requests and runs them through the
//! [`service::QueueService`] seam.

pub mod errors;
pub mod request;
pub mod runner;
pub mod service;

pub use errors::{ExecuteError, RequestError, ServiceError};
pub use request::{Invocation, QueueRequest, RequestContext};
pub use runner::{CommandRunner, RunHandle, RunKey};
pub use service::{QueueResponse, QueueService, ReceivedMessage, execute};
