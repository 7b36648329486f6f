//! Periodic background work bound to a view's lifetime.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Handle to a task that runs `tick` every `period` until cancelled.
///
/// The first tick fires immediately. A tick that overruns the period makes
/// the missed ticks get skipped, so two ticks never run at once. Dropping the
/// handle aborts the task.
#[derive(Debug)]
pub struct PeriodicTask {
    name: &'static str,
    shutdown: Arc<Notify>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let shutdown = Arc::new(Notify::new());
        let signal = shutdown.clone();

        let handle = tokio::spawn(async move {
            tracing::debug!(task = name, ?period, "periodic task started");

            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = signal.notified() => break,
                    _ = interval.tick() => {
                        tokio::select! {
                            _ = signal.notified() => break,
                            _ = tick() => {}
                        }
                    }
                }
            }

            tracing::debug!(task = name, "periodic task stopped");
        });

        Self {
            name,
            shutdown,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop now; an in-flight tick is abandoned and its result discarded.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(task = self.name, "periodic task cancelled");
        }
    }

    /// Signal the task and wait for it to wind down.
    pub async fn shutdown(mut self) {
        self.shutdown.notify_one();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Proof that a count fetch was issued, ordered by issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct CountState {
    value: Option<u64>,
    applied: u64,
}

/// A counter fed by overlapping fetches where the latest-issued one wins.
///
/// Each fetch takes a [`Ticket`] before it goes out; a result is applied only
/// if its ticket is newer than the one behind the current value, so a slow
/// response can never overwrite a fresher one.
#[derive(Debug, Clone, Default)]
pub struct LiveCount {
    issued: Arc<AtomicU64>,
    state: Arc<Mutex<CountState>>,
}

impl LiveCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns whether `value` was applied.
    pub fn apply(&self, ticket: Ticket, value: u64) -> bool {
        let Ok(mut state) = self.state.lock() else {
            return false;
        };
        if ticket.0 <= state.applied {
            tracing::debug!(ticket = ticket.0, applied = state.applied, "stale count dropped");
            return false;
        }
        state.applied = ticket.0;
        state.value = Some(value);
        true
    }

    /// `None` until the first fetch lands.
    pub fn get(&self) -> Option<u64> {
        self.state.lock().ok().and_then(|state| state.value)
    }
}
