//! Status polling for queued VaaS changes.
//!
//! # States
//! ```text
//! Pending → Success: terminal, registration done
//! Pending → Failure: terminal, registration failed
//! Pending → Pending: keep polling
//! ```
//!
//! # Design Decisions
//! - Poll loop and deadline race in one `select!`; first to finish wins
//! - Fetch errors are transient, only the deadline ends a wait early
//! - A fetch still in flight when the deadline fires is dropped, not awaited

use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::PollingConfig;
use crate::hook::error::PollError;
use crate::vaas::{ControlPlane, PendingTask, TaskStatus};

/// Waits for a queued change to reach a terminal state.
#[derive(Debug, Clone, Copy)]
pub struct StatusPoller {
    interval: Duration,
    max_wait: Duration,
}

impl StatusPoller {
    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }

    pub fn from_config(config: &PollingConfig) -> Self {
        Self::new(config.interval(), config.max_wait())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Poll `task` until it succeeds, fails or the deadline passes.
    pub async fn await_task(
        &self,
        client: &dyn ControlPlane,
        task: &mut PendingTask,
    ) -> Result<(), PollError> {
        let started = Instant::now();

        let outcome = tokio::select! {
            result = self.poll_until_terminal(client, task) => Some(result),
            _ = time::sleep(self.max_wait) => None,
        };

        metrics::histogram!("vaas_hook_task_wait_seconds").record(started.elapsed().as_secs_f64());

        match outcome {
            Some(result) => result,
            None => {
                tracing::warn!(
                    task_uri = %task.resource_uri,
                    last_status = %task.status,
                    max_wait_secs = self.max_wait.as_secs(),
                    "VaaS registration timed out, will attempt cleanup"
                );
                Err(PollError::TimedOut(self.max_wait))
            }
        }
    }

    async fn poll_until_terminal(
        &self,
        client: &dyn ControlPlane,
        task: &mut PendingTask,
    ) -> Result<(), PollError> {
        // First check one interval after submission.
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            tracing::debug!(task_uri = %task.resource_uri, "Checking VaaS task status");
            if let Err(e) = client.task_status(task).await {
                metrics::counter!("vaas_hook_task_polls_total", "status" => "error").increment(1);
                tracing::warn!(
                    task_uri = %task.resource_uri,
                    error = %e,
                    "Error getting VaaS task status"
                );
                continue;
            }

            metrics::counter!("vaas_hook_task_polls_total", "status" => task.status.as_str())
                .increment(1);
            tracing::debug!(
                status = %task.status,
                info = task.info.as_deref().unwrap_or(""),
                "Received VaaS task status"
            );

            if !task.status.is_terminal() {
                continue;
            }
            if task.status == TaskStatus::Failure {
                return Err(PollError::Failed {
                    info: task.info.clone().unwrap_or_default(),
                });
            }
            tracing::info!(task_uri = %task.resource_uri, "VaaS configuration change applied");
            return Ok(());
        }
    }
}

impl Default for StatusPoller {
    fn default() -> Self {
        Self::from_config(&PollingConfig::default())
    }
}
