// Async HTTP client for the DDM set and status endpoints.
//
// Auth: HTTP Basic, `username:api_key`, injected as a default header.
// Every public call performs exactly one request and reads the response
// body to completion before returning.

use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::endpoint::{Endpoint, Resource};
use crate::error::Error;
use crate::outcome::{MutationKind, MutationOutcome};
use crate::status::StatusCategory;
use crate::transport::{self, TransportConfig};

/// Everything needed to talk to a DDM server, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub username: String,
    pub api_key: SecretString,
    pub transport: TransportConfig,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.into(),
            username: transport::DEFAULT_USERNAME.into(),
            api_key,
            transport: TransportConfig::default(),
        }
    }
}

/// Client for device-scoped DDM resources.
pub struct DdmClient {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl DdmClient {
    /// Validate the base URL and build an authenticated HTTP client.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let endpoint = Endpoint::new(&config.base_url)?;
        let headers = transport::auth_headers(&config.username, &config.api_key)?;
        let http = config.transport.build_client(headers)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Send one request and hand back the raw response.
    ///
    /// PUT goes out with an explicit empty body and `Content-Length: 0`.
    /// Transport failures are returned as-is.
    pub async fn dispatch(&self, method: Method, url: Url) -> Result<reqwest::Response, Error> {
        debug!("{method} {url}");

        let is_put = method == Method::PUT;
        let mut builder = self.http.request(method, url);
        if is_put {
            builder = builder
                .header(reqwest::header::CONTENT_LENGTH, 0)
                .body(Vec::new());
        }

        let resp = builder.send().await?;
        trace!(status = %resp.status(), "response received");
        Ok(resp)
    }

    /// Drain a response into its status and body text.
    async fn drain(resp: reqwest::Response) -> Result<(StatusCode, String), Error> {
        let status = resp.status();
        let body = resp.text().await?;
        trace!(bytes = body.len(), "response body read");
        Ok((status, body))
    }

    /// GET `url` and decode the body as JSON.
    async fn get_json(&self, url: Url) -> Result<Value, Error> {
        let resp = self.dispatch(Method::GET, url).await?;
        let (status, body) = Self::drain(resp).await?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Decode {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    // ── Set membership ───────────────────────────────────────────────

    /// Sets the device currently belongs to.
    pub async fn sets(&self, device_id: &str) -> Result<Value, Error> {
        let url = self.endpoint.resolve(Resource::EnrollmentSets, device_id)?;
        self.get_json(url).await
    }

    /// Add or remove `device_id` to/from `set` and classify the response.
    pub async fn mutate(
        &self,
        kind: MutationKind,
        device_id: &str,
        set: &str,
    ) -> Result<MutationOutcome, Error> {
        let url = self
            .endpoint
            .resolve_with_set(Resource::EnrollmentSets, device_id, set)?;
        let resp = self.dispatch(kind.method(), url).await?;
        let (status, body) = Self::drain(resp).await?;

        let outcome = MutationOutcome::interpret(kind, status, &body);
        debug!(?kind, %status, ?outcome, "membership change classified");
        Ok(outcome)
    }

    pub async fn add_to_set(&self, device_id: &str, set: &str) -> Result<MutationOutcome, Error> {
        self.mutate(MutationKind::Add, device_id, set).await
    }

    pub async fn remove_from_set(
        &self,
        device_id: &str,
        set: &str,
    ) -> Result<MutationOutcome, Error> {
        self.mutate(MutationKind::Remove, device_id, set).await
    }

    // ── Status ───────────────────────────────────────────────────────

    /// Fetch one status report for a device. Never cached.
    pub async fn status(&self, category: StatusCategory, device_id: &str) -> Result<Value, Error> {
        let url = self.endpoint.resolve(category.resource(), device_id)?;
        self.get_json(url).await
    }

    /// Like [`status`](Self::status), but from a client-facing token.
    ///
    /// Unknown tokens fail before any request is sent.
    pub async fn status_by_token(&self, token: &str, device_id: &str) -> Result<Value, Error> {
        let category: StatusCategory = token.parse()?;
        self.status(category, device_id).await
    }
}
