//! In-memory queue service for tests and dry runs

use crate::application::errors::ServiceError;
use crate::application::request::{Invocation, QueueRequest};
use crate::application::service::{QueueResponse, QueueService, ReceivedMessage};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct StoredMessage {
    message_id: String,
    body: String,
    receive_count: u32,
    hidden_until: Option<Instant>,
}

impl StoredMessage {
    fn is_visible(&self, now: Instant) -> bool {
        self.hidden_until.is_none_or(|until| until <= now)
    }
}

/// Queue service that keeps messages in process memory
///
/// Queues must be created up front; requests against unknown URLs fail with
/// [`ServiceError::QueueNotFound`].
pub struct InMemoryQueueService {
    queues: Mutex<HashMap<String, VecDeque<StoredMessage>>>,
    next_message: AtomicU64,
    latency: Option<Duration>,
}

impl InMemoryQueueService {
    pub fn new() -> Self {
        Self {
            queues: Mutex::new(HashMap::new()),
            next_message: AtomicU64::new(1),
            latency: None,
        }
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_queue(self, queue_url: impl Into<String>) -> Self {
        self.create_queue(queue_url);
        self
    }

    pub fn create_queue(&self, queue_url: impl Into<String>) {
        self.queues().entry(queue_url.into()).or_default();
    }

    /// Bodies currently stored in a queue, visible or not
    pub fn message_bodies(&self, queue_url: &str) -> Vec<String> {
        self.queues()
            .get(queue_url)
            .map(|queue| queue.iter().map(|message| message.body.clone()).collect())
            .unwrap_or_default()
    }

    fn queues(&self) -> MutexGuard<'_, HashMap<String, VecDeque<StoredMessage>>> {
        self.queues
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn apply(&self, request: &QueueRequest) -> Result<QueueResponse, ServiceError> {
        let mut queues = self.queues();
        let queue = queues
            .get_mut(request.queue_url())
            .ok_or_else(|| ServiceError::QueueNotFound {
                queue_url: request.queue_url().to_string(),
            })?;

        match request {
            QueueRequest::SendMessage { message_body, .. } => {
                let id = self.next_message.fetch_add(1, Ordering::Relaxed);
                let message_id = format!("msg-{id}");
                queue.push_back(StoredMessage {
                    message_id: message_id.clone(),
                    body: message_body.clone(),
                    receive_count: 0,
                    hidden_until: None,
                });
                Ok(QueueResponse::Sent { message_id })
            }
            QueueRequest::ReceiveMessage {
                max_messages,
                visibility_timeout,
                ..
            } => {
                if !(1..=10).contains(max_messages) {
                    return Err(ServiceError::Rejected {
                        message: format!("max messages must be between 1 and 10, got {max_messages}"),
                    });
                }

                let now = Instant::now();
                let hide_for = Duration::from_secs(u64::from(*visibility_timeout));
                let messages = queue
                    .iter_mut()
                    .filter(|message| message.is_visible(now))
                    .take(*max_messages as usize)
                    .map(|message| {
                        message.receive_count += 1;
                        if !hide_for.is_zero() {
                            message.hidden_until = Some(now + hide_for);
                        }
                        ReceivedMessage {
                            message_id: message.message_id.clone(),
                            receipt_handle: format!(
                                "{}-r{}",
                                message.message_id, message.receive_count
                            ),
                            body: message.body.clone(),
                        }
                    })
                    .collect();
                Ok(QueueResponse::Received { messages })
            }
            QueueRequest::PurgeQueue { .. } => {
                queue.clear();
                Ok(QueueResponse::Purged)
            }
        }
    }
}

impl Default for InMemoryQueueService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueueService for InMemoryQueueService {
    async fn call(&self, invocation: &Invocation) -> Result<QueueResponse, ServiceError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        log::debug!(
            "In-memory call to {} as {} in {}",
            invocation.request.queue_url(),
            invocation.context.profile,
            invocation.context.region
        );
        self.apply(&invocation.request)
    }
}
