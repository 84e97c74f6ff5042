//! Backend deregistration.

use crate::hook::error::HookError;
use crate::hook::VaasHook;
use crate::task::TaskInfo;

impl VaasHook {
    /// Delete the backend registered for this task, if any.
    pub async fn deregister(&mut self, task: &TaskInfo) -> Result<(), HookError> {
        tracing::debug!(task_id = %task.task_id, "Deregistering task from VaaS");
        self.release().await
    }

    /// Delete the registered backend. A no-op when nothing is registered.
    ///
    /// State is cleared only after VaaS accepted the deletion, so a failed
    /// attempt can be retried against the same backend.
    pub async fn release(&mut self) -> Result<(), HookError> {
        let Some(id) = self.backend_id else {
            tracing::info!("backend id not set - not deleting backend from VaaS");
            return Ok(());
        };

        tracing::info!(vaas_backend_id = %id, "Scheduling backend for deletion via VaaS");

        if let Err(source) = self.client.delete_backend(id).await {
            metrics::counter!("vaas_hook_deregistrations_total", "outcome" => "failure")
                .increment(1);
            return Err(HookError::Delete { id, source });
        }

        tracing::info!(
            vaas_backend_id = %id,
            "Successfully scheduled backend for deletion via VaaS"
        );
        metrics::counter!("vaas_hook_deregistrations_total", "outcome" => "success")
            .increment(1);
        self.backend_id = None;
        Ok(())
    }
}
