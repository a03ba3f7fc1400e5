// Poller - periodic re-fetch with stale-while-revalidate publishing
use crate::application::presenter::{present, present_payload};
use crate::application::sample_source::{FetchError, SampleSource};
use crate::domain::ui_state::UiState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PollPhase {
    Idle,
    Fetching,
}

/// What the poller publishes. While `phase` is `Fetching`, `state` still
/// holds the outcome of the previous cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSnapshot {
    pub state: UiState,
    pub phase: PollPhase,
    pub updated_at: Option<DateTime<Utc>>,
    pub cycle: u64,
}

impl Default for PollSnapshot {
    fn default() -> Self {
        Self {
            state: UiState::Loading,
            phase: PollPhase::Idle,
            updated_at: None,
            cycle: 0,
        }
    }
}

pub struct Poller {
    source: Arc<dyn SampleSource>,
    interval: Duration,
    tx: watch::Sender<PollSnapshot>,
    last_payload: Option<Value>,
}

impl Poller {
    /// Start polling `source` on a background task. The first fetch happens immediately.
    pub fn spawn(source: Arc<dyn SampleSource>, interval: Duration) -> PollerHandle {
        let (tx, rx) = watch::channel(PollSnapshot::default());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tracing::info!("Polling {} every {:?}", source.describe(), interval);

        let poller = Poller {
            source,
            interval,
            tx,
            last_payload: None,
        };
        let task = tokio::spawn(poller.run(shutdown_rx));

        PollerHandle {
            rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.interval);
        // a slow fetch pushes the schedule back instead of bursting
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = &mut shutdown => break,
                _ = self.poll_once() => {}
            }
        }

        tracing::info!("Poller for {} stopped", self.source.describe());
    }

    async fn poll_once(&mut self) {
        self.tx.send_modify(|snapshot| snapshot.phase = PollPhase::Fetching);

        let result = self.source.fetch().await;
        let state = self.next_state(result);

        self.tx.send_modify(|snapshot| {
            if snapshot.state.status() != state.status() {
                tracing::info!(
                    "Charging data state: {} -> {}",
                    snapshot.state.status(),
                    state.status()
                );
            }
            snapshot.state = state;
            snapshot.phase = PollPhase::Idle;
            snapshot.updated_at = Some(Utc::now());
            snapshot.cycle += 1;
        });
    }

    fn next_state(&mut self, result: Result<Value, FetchError>) -> UiState {
        let payload = match result {
            Ok(payload) => payload,
            Err(e) => return present(Err(e)),
        };

        if self.last_payload.as_ref() == Some(&payload) {
            let current = self.tx.borrow().state.clone();
            if matches!(current, UiState::Ready(_) | UiState::Empty) {
                tracing::debug!("Payload unchanged, keeping normalized samples");
                return current;
            }
        }

        let state = present_payload(&payload);
        self.last_payload = Some(payload);
        state
    }
}

/// Owner of a running poller. Dropping it aborts the task.
pub struct PollerHandle {
    rx: watch::Receiver<PollSnapshot>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot> {
        self.rx.clone()
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> PollSnapshot {
        self.rx.borrow().clone()
    }

    /// Stop polling and wait for the task to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Poller task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
