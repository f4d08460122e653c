//! External oracle adapter
//!
//! Uniform "ask an external service, fail soft" client shared by the three
//! orchestrators. Every failure mode (timeout, transport error, non-2xx
//! status, undecodable body, absent or empty answer field) collapses to
//! `None` at the public surface and is logged as a warning; nothing ever
//! propagates past this boundary.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default bound on each oracle call. A slow or unresponsive oracle must
/// never stall the fallback path.
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(3);

/// Oracle endpoint configuration, passed explicitly into each orchestrator
/// at construction time.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Base URL of the oracle service, e.g. "http://localhost:5000".
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl OracleConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Internal failure taxonomy; named in the warning log line, then swallowed.
#[derive(Debug, Error)]
enum OracleError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("oracle returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("oracle answer missing field: {0}")]
    MissingField(&'static str),
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    defect: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    linked_req: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    defect: &'a str,
    requirement: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    verdict: Option<String>,
}

#[derive(Serialize)]
struct AssignRequest<'a> {
    context: &'a str,
}

#[derive(Deserialize)]
struct AssignResponse {
    assignee: Option<String>,
}

/// HTTP client for the oracle service. Cheap to clone; the underlying
/// connection pool is shared.
#[derive(Debug, Clone)]
pub struct OracleClient {
    config: OracleConfig,
    http_client: reqwest::Client,
}

impl OracleClient {
    /// Build a client with the per-request timeout baked in.
    pub fn new(config: OracleConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("triage-core/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        OracleClient {
            config,
            http_client,
        }
    }

    /// Ask the oracle to link a defect to a requirement. `None` means "no
    /// usable answer" for any reason.
    pub async fn translate(&self, defect: &str) -> Option<String> {
        match self
            .post_json::<_, TranslateResponse>("translate", &TranslateRequest { defect })
            .await
            .and_then(|r| usable(r.linked_req, "linked_req"))
        {
            Ok(linked) => {
                debug!("Oracle linked defect to: {}", linked);
                Some(linked)
            }
            Err(err) => {
                warn!("Oracle translate unavailable, using local matcher: {}", err);
                None
            }
        }
    }

    /// Ask the oracle for a root-cause verdict.
    pub async fn analyze(&self, defect: &str, requirement: &str) -> Option<String> {
        match self
            .post_json::<_, AnalyzeResponse>(
                "analyze",
                &AnalyzeRequest {
                    defect,
                    requirement,
                },
            )
            .await
            .and_then(|r| usable(r.verdict, "verdict"))
        {
            Ok(verdict) => {
                debug!("Oracle verdict: {}", verdict);
                Some(verdict)
            }
            Err(err) => {
                warn!("Oracle analyze unavailable, using rule engine: {}", err);
                None
            }
        }
    }

    /// Ask the oracle for an assignee suggestion for a context hint.
    pub async fn assign(&self, context: &str) -> Option<String> {
        match self
            .post_json::<_, AssignResponse>("assign", &AssignRequest { context })
            .await
            .and_then(|r| usable(r.assignee, "assignee"))
        {
            Ok(assignee) => {
                debug!("Oracle suggested assignee: {}", assignee);
                Some(assignee)
            }
            Err(err) => {
                warn!("Oracle assign unavailable, using local scoring: {}", err);
                None
            }
        }
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, OracleError>
    where
        Req: Serialize,
        Resp: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);

        let response = self.http_client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Status(status));
        }

        Ok(response.json::<Resp>().await?)
    }
}

/// Treat absent and blank answers identically: both are "no usable answer".
fn usable(field: Option<String>, name: &'static str) -> Result<String, OracleError> {
    field
        .filter(|value| !value.trim().is_empty())
        .ok_or(OracleError::MissingField(name))
}
