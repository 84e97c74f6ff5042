//! VaaS REST client.
//!
//! # Responsibilities
//! - Authenticate every call with the configured API key
//! - Resolve datacenters and directors by name
//! - Create (inline or queued) and delete backends
//! - Fetch the status of queued changes
//!
//! Every request carries a fresh `X-Request-Id` so calls can be matched
//! against VaaS access logs.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, LOCATION};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::vaas::types::{
    BackendId, BackendSpec, Datacenter, PendingTask, Submission, SubmitMode, TaskReport,
    VaasConfig, VaasError, VaasResult, API_PREFIX,
};
use crate::vaas::ControlPlane;

const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Debug, Deserialize)]
struct ObjectList<T> {
    objects: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct DirectorRef {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct CreatedBackend {
    id: u64,
}

/// HTTP client for the VaaS API.
#[derive(Clone)]
pub struct VaasClient {
    http: reqwest::Client,
    base_url: Url,
    authorization: String,
    username: String,
    timeout: Duration,
}

impl VaasClient {
    /// Create a new client. Fails on an unparsable `api_host`.
    pub fn new(config: VaasConfig) -> VaasResult<Self> {
        let base_url: Url = config.api_host.parse()?;
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        tracing::info!(
            api_host = %base_url,
            username = %config.username,
            timeout_secs = config.request_timeout_secs,
            "VaaS client initialized"
        );

        Ok(Self {
            http,
            base_url,
            authorization: format!("ApiKey {}:{}", config.username, config.api_key),
            username: config.username,
            timeout,
        })
    }

    fn endpoint(&self, resource: &str) -> VaasResult<Url> {
        Ok(self.base_url.join(API_PREFIX)?.join(resource)?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request_id = Uuid::new_v4();
        tracing::debug!(%method, %url, %request_id, "VaaS request");
        self.http
            .request(method, url)
            .header(AUTHORIZATION, &self.authorization)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string())
    }

    async fn send(&self, builder: RequestBuilder) -> VaasResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(VaasError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> VaasResult<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| VaasError::Decode(format!("{}: {}", e, text)))
    }
}

#[async_trait]
impl ControlPlane for VaasClient {
    async fn datacenter(&self, symbol: &str) -> VaasResult<Datacenter> {
        let url = self.endpoint("dc/")?;
        let response = self
            .send(self.request(Method::GET, url).query(&[("symbol", symbol)]))
            .await?;
        let list: ObjectList<Datacenter> = Self::read_json(response).await?;
        list.objects
            .into_iter()
            .next()
            .ok_or_else(|| VaasError::DatacenterNotFound(symbol.to_string()))
    }

    async fn director_id(&self, name: &str) -> VaasResult<u64> {
        let url = self.endpoint("director/")?;
        let response = self
            .send(self.request(Method::GET, url).query(&[("name", name)]))
            .await?;
        let list: ObjectList<DirectorRef> = Self::read_json(response).await?;
        list.objects
            .first()
            .map(|director| director.id)
            .ok_or_else(|| VaasError::DirectorNotFound(name.to_string()))
    }

    async fn add_backend(&self, spec: &BackendSpec, mode: SubmitMode) -> VaasResult<Submission> {
        let url = self.endpoint("backend/")?;
        let mut builder = self.request(Method::POST, url).json(spec);
        if mode == SubmitMode::Async {
            builder = builder.header("Prefer", "respond-async");
        }

        let response = self.send(builder).await?;
        let task_uri = match mode {
            SubmitMode::Sync => None,
            SubmitMode::Async => {
                if response.status() != StatusCode::ACCEPTED {
                    tracing::warn!(status = %response.status(), "VaaS did not queue async request");
                }
                // The backend exists even without a Location; the caller
                // still needs its id to delete it.
                response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string)
            }
        };

        let created: CreatedBackend = Self::read_json(response).await?;
        Ok(Submission {
            backend_id: BackendId(created.id),
            task_uri,
        })
    }

    async fn delete_backend(&self, id: BackendId) -> VaasResult<()> {
        let url = self.endpoint(&format!("backend/{}/", id))?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn task_status(&self, task: &mut PendingTask) -> VaasResult<()> {
        // Location may be absolute or relative to the API host.
        let url = self.base_url.join(&task.resource_uri)?;
        let response = self.send(self.request(Method::GET, url)).await?;
        let report: TaskReport = Self::read_json(response).await?;
        task.status = report.status;
        task.info = report.info;
        Ok(())
    }
}

impl std::fmt::Debug for VaasClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaasClient")
            .field("api_host", &self.base_url.as_str())
            .field("username", &self.username)
            .field("timeout", &self.timeout)
            .finish()
    }
}
