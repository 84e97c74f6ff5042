//! Backend registration.
//!
//! # Responsibilities
//! - Skip tasks without a director
//! - Resolve datacenter and director, build the backend spec
//! - Submit inline, or queued and wait for the change to apply

use crate::hook::error::HookError;
use crate::hook::VaasHook;
use crate::task::metadata::INITIAL_WEIGHT_ENV;
use crate::task::TaskInfo;
use crate::vaas::types::{director_reference, CANARY_TAG};
use crate::vaas::{BackendSpec, PendingTask, SubmitMode, VaasError};

impl VaasHook {
    /// Register the task as a backend of its director.
    pub async fn register(&mut self, task: &TaskInfo) -> Result<(), HookError> {
        let Some(director) = task.director() else {
            tracing::info!(
                task_id = %task.task_id,
                "Director not set, skipping registration in VaaS"
            );
            metrics::counter!("vaas_hook_registrations_total", "outcome" => "skipped").increment(1);
            return Ok(());
        };

        let result = self.register_with_director(task, director).await;

        let outcome = if result.is_ok() { "success" } else { "failure" };
        metrics::counter!("vaas_hook_registrations_total", "outcome" => outcome).increment(1);
        result
    }

    async fn register_with_director(
        &mut self,
        task: &TaskInfo,
        director: &str,
    ) -> Result<(), HookError> {
        tracing::info!(task_id = %task.task_id, director, "Registering backend in VaaS...");

        let dc_symbol = self.runtime.datacenter()?;
        let dc = self.client.datacenter(&dc_symbol).await?;
        let director_id = self.client.director_id(director).await?;

        let port = task.ports().first().ok_or(HookError::NoPorts)?.number;

        let spec = BackendSpec {
            address: self.runtime.address()?.to_string(),
            director: director_reference(director_id),
            weight: initial_weight(task),
            dc,
            port,
            inherit_time_profile: true,
            tags: backend_tags(task),
        };

        if task.async_registration() {
            self.submit_queued(&spec).await?;
        } else {
            self.submit_inline(&spec).await?;
        }

        if let Some(id) = self.backend_id {
            tracing::info!(vaas_backend_id = %id, "Registered backend with VaaS");
        }
        Ok(())
    }

    async fn submit_inline(&mut self, spec: &BackendSpec) -> Result<(), HookError> {
        let submission = self
            .client
            .add_backend(spec, SubmitMode::Sync)
            .await
            .map_err(HookError::Submit)?;
        self.backend_id = Some(submission.backend_id);
        Ok(())
    }

    async fn submit_queued(&mut self, spec: &BackendSpec) -> Result<(), HookError> {
        let submission = self
            .client
            .add_backend(spec, SubmitMode::Async)
            .await
            .map_err(HookError::Submit)?;

        // Kept even if the change later fails, so deregistration can clean up.
        self.backend_id = Some(submission.backend_id);

        let task_uri = submission
            .task_uri
            .ok_or(HookError::Submit(VaasError::MissingLocation))?;

        tracing::info!(
            vaas_backend_id = %submission.backend_id,
            task_uri = %task_uri,
            "Waiting for successful Varnish configuration change..."
        );

        let mut pending = PendingTask::new(task_uri);
        self.poller
            .await_task(self.client.as_ref(), &mut pending)
            .await
            .map_err(HookError::Await)
    }
}

/// Initial weight: the environment override beats the weight label.
fn initial_weight(task: &TaskInfo) -> Option<i64> {
    let mut weight = match task.weight() {
        Ok(weight) => Some(weight),
        Err(e) => {
            tracing::info!(error = %e, "VaaS backend weight not set");
            None
        }
    };

    if let Some(value) = task.env_value(INITIAL_WEIGHT_ENV) {
        match value.parse() {
            Ok(overridden) => weight = Some(overridden),
            Err(_) => tracing::debug!(value, "Ignoring non-integer {}", INITIAL_WEIGHT_ENV),
        }
    }

    weight
}

/// VaaS requires every canary instance to carry the canary tag.
fn backend_tags(task: &TaskInfo) -> Vec<String> {
    if task.is_canary() {
        vec![CANARY_TAG.to_string()]
    } else {
        Vec::new()
    }
}
