//! Access gate client.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use url::Url;

/// Body the gate returns when startup is permitted.
pub const ALLOW_TOKEN: &str = "Allow";

/// Upper bound on the whole gate round-trip.
pub const GATE_TIMEOUT: Duration = Duration::from_secs(30);

/// Gate endpoint for this build.
pub fn default_gate_address() -> &'static str {
    if cfg!(debug_assertions) {
        "http://127.0.0.1:80"
    } else {
        "https://syberia-project.com"
    }
}

/// Environment fingerprint sent to the gate.
#[derive(Debug, Clone, Serialize)]
pub struct AccessRequest {
    #[serde(rename = "serviceDir")]
    pub service_dir: PathBuf,
    #[serde(rename = "dayzDir")]
    pub dayz_dir: PathBuf,
    #[serde(rename = "dbPort")]
    pub db_port: u16,
    #[serde(rename = "webPort")]
    pub web_port: u16,
}

impl AccessRequest {
    /// Directory holding the running executable.
    pub fn current_service_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default()
    }
}

/// Outcome of a gate check.
///
/// A denial and an unreachable gate are deliberately indistinguishable to the
/// caller; `Deny` only carries a reason for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(String),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// Client for the entitlement server.
#[derive(Debug, Clone)]
pub struct AccessGate {
    client: reqwest::Client,
    address: String,
}

impl AccessGate {
    /// Create a gate client for the given base address.
    pub fn new(address: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(address, GATE_TIMEOUT)
    }

    pub fn with_timeout(address: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let address = address.into();
        let mut builder = reqwest::Client::builder().timeout(timeout);
        if is_loopback(&address) {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self { client, address })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn check_url(&self) -> Result<Url, url::ParseError> {
        let base = Url::parse(&self.address)?;
        base.join("/access/check")
    }

    /// Issue the single access check.
    pub async fn check(&self, request: &AccessRequest) -> AccessDecision {
        let url = match self.check_url() {
            Ok(url) => url,
            Err(e) => return AccessDecision::Deny(format!("invalid gate address: {}", e)),
        };

        tracing::debug!(
            url = %url,
            db_port = request.db_port,
            web_port = request.web_port,
            "Checking access"
        );

        let response = match self.client.post(url).json(request).send().await {
            Ok(res) => res,
            Err(e) => {
                tracing::debug!(error = %e, "Access gate unreachable");
                return AccessDecision::Deny(format!("transport error: {}", e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return AccessDecision::Deny(format!("gate returned status {}", status));
        }

        match response.text().await {
            Ok(body) if body == ALLOW_TOKEN => AccessDecision::Allow,
            Ok(body) => AccessDecision::Deny(format!("gate returned body {:?}", body)),
            Err(e) => AccessDecision::Deny(format!("failed to read gate response: {}", e)),
        }
    }
}

fn is_loopback(address: &str) -> bool {
    match Url::parse(address).ok().and_then(|u| u.host_str().map(str::to_owned)) {
        Some(host) => host == "localhost" || host == "127.0.0.1" || host == "[::1]",
        None => false,
    }
}
