//! Event loop feeding lifecycle events to the hook.
//!
//! Events arrive as newline-delimited JSON and are handled strictly in
//! order. Handler errors are logged and do not stop the loop. When input
//! ends or shutdown is triggered, the registered backend is released.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast;

use crate::hook::{LifecycleEvent, VaasHook};

/// Counters for one run of the event loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub handled: usize,
    pub failed: usize,
    pub malformed: usize,
}

/// Read events from `input` until EOF or shutdown.
pub async fn run_events<R>(
    hook: &mut VaasHook,
    input: R,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut summary = RunSummary::default();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = shutdown.recv() => {
                tracing::info!("Event loop received shutdown signal, exiting loop");
                break;
            }
        };

        let Some(line) = line else {
            tracing::info!("Event stream closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let event: LifecycleEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed lifecycle event");
                summary.malformed += 1;
                continue;
            }
        };

        match hook.handle_event(&event).await {
            Ok(()) => summary.handled += 1,
            Err(e) => {
                tracing::error!(event = %event.kind, error = %e, "Hook failed to handle event");
                summary.failed += 1;
            }
        }
    }

    if let Err(e) = hook.release().await {
        tracing::error!(error = %e, "Failed to release VaaS backend on exit");
    }

    Ok(summary)
}
