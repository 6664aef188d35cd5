//! Independent, cancellable command runs
//!
//! Each run is its own tokio task keyed by the header line of the command
//! that triggered it. Starting a run for a key that is still in flight aborts
//! the older run; runs under different keys have no ordering between them.

use crate::application::errors::ExecuteError;
use crate::application::service::{QueueResponse, QueueService, execute};
use crate::types::command::Command;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::{AbortHandle, JoinHandle};

/// 0-based header line of the command a run belongs to
pub type RunKey = usize;

type InFlight = HashMap<RunKey, (u64, AbortHandle)>;

/// Spawns command runs against a shared queue service
pub struct CommandRunner<S: ?Sized> {
    service: Arc<S>,
    in_flight: Arc<Mutex<InFlight>>,
    next_run: AtomicU64,
}

impl<S> CommandRunner<S>
where
    S: QueueService + ?Sized + 'static,
{
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            next_run: AtomicU64::new(0),
        }
    }

    /// Start running `command`. Must be called within a tokio runtime.
    pub fn run(&self, command: Command) -> RunHandle {
        let key = command.range.start_line;
        let run_id = self.next_run.fetch_add(1, Ordering::Relaxed);
        let service = Arc::clone(&self.service);
        let in_flight = Arc::clone(&self.in_flight);

        // Held across spawn so the task cannot deregister before it is registered
        let mut runs = lock(&self.in_flight);

        let task = tokio::spawn(async move {
            let _registration = Registration {
                in_flight,
                key,
                run_id,
            };
            execute(service.as_ref(), &command).await
        });

        if let Some((_, previous)) = runs.insert(key, (run_id, task.abort_handle())) {
            log::debug!("Superseding run for line {}", key + 1);
            previous.abort();
        }

        RunHandle { key, task }
    }

    /// Abort the in-flight run for `key`. Returns false when nothing was running.
    pub fn cancel(&self, key: RunKey) -> bool {
        match lock(&self.in_flight).remove(&key) {
            Some((_, handle)) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self, key: RunKey) -> bool {
        lock(&self.in_flight).contains_key(&key)
    }

    pub fn in_flight(&self) -> usize {
        lock(&self.in_flight).len()
    }
}

/// In-flight entry owned by a run's task
///
/// Removes the entry when the task finishes or unwinds, but only while the
/// entry still belongs to this run. A run aborted before its first poll was
/// already deregistered by `cancel` or by the run that superseded it.
struct Registration {
    in_flight: Arc<Mutex<InFlight>>,
    key: RunKey,
    run_id: u64,
}

impl Drop for Registration {
    fn drop(&mut self) {
        let mut runs = lock(&self.in_flight);
        if runs
            .get(&self.key)
            .is_some_and(|(id, _)| *id == self.run_id)
        {
            runs.remove(&self.key);
        }
    }
}

fn lock(runs: &Mutex<InFlight>) -> MutexGuard<'_, InFlight> {
    runs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle to a spawned run
#[derive(Debug)]
pub struct RunHandle {
    key: RunKey,
    task: JoinHandle<Result<QueueResponse, ExecuteError>>,
}

impl RunHandle {
    pub fn key(&self) -> RunKey {
        self.key
    }

    /// Wait for the run to finish
    pub async fn outcome(self) -> Result<QueueResponse, ExecuteError> {
        let Self { key, task } = self;
        match task.await {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancelled() => Err(ExecuteError::Cancelled { line: key + 1 }),
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}
