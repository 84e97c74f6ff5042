//! Scripted collaborators for hook unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::net::IpAddr;
use std::sync::Mutex;

use crate::runenv::{Environment, RuntimeError, RuntimeFacts};
use crate::vaas::{
    BackendId, BackendSpec, ControlPlane, Datacenter, PendingTask, Submission, SubmitMode,
    TaskStatus, VaasError, VaasResult,
};

pub const TASK_URI: &str = "/api/v0.1/task/abc/";

/// A recorded control-plane call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Datacenter(String),
    Director(String),
    AddBackend(BackendSpec, SubmitMode),
    Delete(BackendId),
    TaskStatus(String),
}

fn failure(body: &str) -> VaasError {
    VaasError::Status {
        status: 500,
        body: body.to_string(),
    }
}

pub fn datacenter() -> Datacenter {
    Datacenter {
        id: 1,
        name: "First DC".to_string(),
        symbol: "dc1".to_string(),
        resource_uri: None,
    }
}

/// In-memory control plane answering from a script.
#[derive(Debug)]
pub struct ScriptedControlPlane {
    pub calls: Mutex<Vec<Call>>,
    pub fail_datacenter: bool,
    pub fail_director: bool,
    pub fail_submit: bool,
    pub director_id: u64,
    pub backend_id: BackendId,
    /// Delete outcomes in order; success once exhausted.
    pub deletes: Mutex<VecDeque<bool>>,
    /// Task states in order, `None` is a fetch error; `Pending` once exhausted.
    pub statuses: Mutex<VecDeque<Option<TaskStatus>>>,
}

impl Default for ScriptedControlPlane {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_datacenter: false,
            fail_director: false,
            fail_submit: false,
            director_id: 42,
            backend_id: BackendId(1234),
            deletes: Mutex::new(VecDeque::new()),
            statuses: Mutex::new(VecDeque::new()),
        }
    }
}

impl ScriptedControlPlane {
    pub fn with_statuses(statuses: impl IntoIterator<Item = Option<TaskStatus>>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn with_deletes(deletes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            deletes: Mutex::new(deletes.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<(BackendSpec, SubmitMode)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddBackend(spec, mode) => Some((spec, mode)),
                _ => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<BackendId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Delete(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn polls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::TaskStatus(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ControlPlane for ScriptedControlPlane {
    async fn datacenter(&self, symbol: &str) -> VaasResult<Datacenter> {
        self.record(Call::Datacenter(symbol.to_string()));
        if self.fail_datacenter {
            return Err(VaasError::DatacenterNotFound(symbol.to_string()));
        }
        Ok(datacenter())
    }

    async fn director_id(&self, name: &str) -> VaasResult<u64> {
        self.record(Call::Director(name.to_string()));
        if self.fail_director {
            return Err(VaasError::DirectorNotFound(name.to_string()));
        }
        Ok(self.director_id)
    }

    async fn add_backend(&self, spec: &BackendSpec, mode: SubmitMode) -> VaasResult<Submission> {
        self.record(Call::AddBackend(spec.clone(), mode));
        if self.fail_submit {
            return Err(failure("backend rejected"));
        }
        Ok(Submission {
            backend_id: self.backend_id,
            task_uri: (mode == SubmitMode::Async).then(|| TASK_URI.to_string()),
        })
    }

    async fn delete_backend(&self, id: BackendId) -> VaasResult<()> {
        self.record(Call::Delete(id));
        let ok = self.deletes.lock().unwrap().pop_front().unwrap_or(true);
        if ok {
            Ok(())
        } else {
            Err(failure("delete failed"))
        }
    }

    async fn task_status(&self, task: &mut PendingTask) -> VaasResult<()> {
        self.record(Call::TaskStatus(task.resource_uri.clone()));
        let next = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Some(TaskStatus::Pending));
        match next {
            Some(status) => {
                task.status = status;
                if status == TaskStatus::Failure {
                    task.info = Some("varnish reload failed".to_string());
                }
                Ok(())
            }
            None => Err(failure("task lookup failed")),
        }
    }
}

/// Fixed runtime facts.
#[derive(Debug, Clone)]
pub struct StaticRuntime {
    pub address: IpAddr,
    pub datacenter: Option<String>,
}

impl Default for StaticRuntime {
    fn default() -> Self {
        Self {
            address: "10.0.0.5".parse().unwrap(),
            datacenter: Some("dc1".to_string()),
        }
    }
}

impl RuntimeFacts for StaticRuntime {
    fn address(&self) -> Result<IpAddr, RuntimeError> {
        Ok(self.address)
    }

    fn datacenter(&self) -> Result<String, RuntimeError> {
        self.datacenter.clone().ok_or(RuntimeError::MissingDatacenter)
    }

    fn environment(&self) -> Environment {
        Environment::Test
    }
}
