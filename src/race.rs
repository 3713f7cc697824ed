//! Timeout race for in-flight provider calls
//!
//! A provider call is spawned as soon as it is launched and raced against a
//! deadline only when the aggregator awaits it. A call that misses its deadline
//! is detached: it keeps running in the background and its result is dropped.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::providers::ProviderOutcome;

/// A provider call running on the tokio runtime
pub struct InFlight<T> {
    label: &'static str,
    handle: JoinHandle<ProviderOutcome<T>>,
}

impl<T: Send + 'static> InFlight<T> {
    /// Spawn `call` immediately
    pub fn launch<F>(label: &'static str, call: F) -> Self
    where
        F: Future<Output = ProviderOutcome<T>> + Send + 'static,
    {
        debug!("Launching {} provider call", label);
        Self {
            label,
            handle: tokio::spawn(call),
        }
    }

    /// Wait at most `deadline` for the call; on expiry the call is detached.
    pub async fn race(self, deadline: Duration) -> ProviderOutcome<T> {
        let Self { label, mut handle } = self;

        match tokio::time::timeout(deadline, &mut handle).await {
            Ok(Ok(outcome)) => {
                debug!("{} provider settled with {}", label, outcome.kind());
                outcome
            }
            Ok(Err(join_error)) => {
                warn!("{} provider task aborted: {}", label, join_error);
                ProviderOutcome::failed(format!("{label} provider task aborted: {join_error}"))
            }
            Err(_) => {
                warn!("{} provider timed out after {}ms", label, deadline.as_millis());
                detach(handle);
                ProviderOutcome::failed(format!(
                    "{label} provider timed out after {}ms",
                    deadline.as_millis()
                ))
            }
        }
    }
}

/// Drop a task handle without aborting the task.
///
/// The task runs to completion or panic on its own and nothing observes it.
/// Provider calls have no side effects, so the discarded result is irrelevant.
pub fn detach<T>(handle: JoinHandle<T>) {
    drop(handle);
}
