//! CIS appliance management API client.
//!
//! Talks to the appliance's REST interface (`/api/...`) over HTTPS. Every
//! call opens a fresh session: the thing this client is most often used
//! for is watching an appliance reboot, and sessions do not survive that.
//!
//! Error classification is the contract here. Transport failures and
//! server-side 5xx become `ApplianceObservation::Unreachable` so waits
//! keep polling; authentication and API-shape problems become `Err` so
//! waits abort instead of burning a whole timeout on bad credentials.

use anyhow::{Context, Result};
use reqwest::StatusCode;

use crate::application::ports::{ApplianceApi, Endpoint};
use crate::domain::appliance::{ApplianceObservation, HealthStatus};

const SESSION_HEADER: &str = "vmware-api-session-id";

/// reqwest-backed implementation of the `ApplianceApi` port.
pub struct CisClient {
    http: reqwest::Client,
    base: String,
    username: String,
    password: String,
}

impl CisClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(endpoint: &Endpoint) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(endpoint.insecure)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            base: api_base(&endpoint.url),
            username: endpoint.username.clone(),
            password: endpoint.password.clone(),
        })
    }

    /// Open a session and return its token, or an `Unreachable`
    /// observation when the endpoint itself is not answering.
    async fn login(&self) -> Result<std::result::Result<String, String>> {
        let response = match self
            .http
            .post(format!("{}/api/session", self.base))
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) if is_transient(&e) => return Ok(Err(format!("unreachable: {e}"))),
            Err(e) => return Err(e).context("requesting appliance session"),
        };
        match response.status() {
            s if s.is_success() => {
                let token: String = response
                    .json()
                    .await
                    .context("parsing appliance session token")?;
                Ok(Ok(token))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                anyhow::bail!("appliance rejected credentials (HTTP {})", response.status())
            }
            s if s.is_server_error() => Ok(Err(format!("appliance returned HTTP {s}"))),
            s => anyhow::bail!("unexpected response to session request: HTTP {s}"),
        }
    }
}

impl ApplianceApi for CisClient {
    async fn observe_health(&self) -> Result<ApplianceObservation> {
        let token = match self.login().await? {
            Ok(token) => token,
            Err(status) => return Ok(ApplianceObservation::Unreachable(status)),
        };

        let response = match self
            .http
            .get(format!("{}/api/appliance/health/system", self.base))
            .header(SESSION_HEADER, &token)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) if is_transient(&e) => {
                return Ok(ApplianceObservation::Unreachable(format!("unreachable: {e}")));
            }
            Err(e) => return Err(e).context("querying appliance health"),
        };
        match response.status() {
            s if s.is_success() => {
                let health: String = response
                    .json()
                    .await
                    .context("parsing appliance health response")?;
                Ok(ApplianceObservation::Health(HealthStatus::parse(&health)))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                anyhow::bail!("appliance rejected session (HTTP {})", response.status())
            }
            s if s.is_server_error() => {
                Ok(ApplianceObservation::Unreachable(format!("appliance returned HTTP {s}")))
            }
            s => anyhow::bail!("unexpected response from health endpoint: HTTP {s}"),
        }
    }

    async fn request_reboot(&self, reason: &str) -> Result<()> {
        let token = match self.login().await? {
            Ok(token) => token,
            Err(status) => anyhow::bail!("cannot reach appliance to request reboot: {status}"),
        };
        let response = self
            .http
            .post(format!("{}/api/appliance/shutdown?action=reboot", self.base))
            .header(SESSION_HEADER, &token)
            .json(&serde_json::json!({ "delay": 0, "reason": reason }))
            .send()
            .await
            .context("requesting appliance reboot")?;
        anyhow::ensure!(
            response.status().is_success(),
            "appliance refused reboot request (HTTP {})",
            response.status()
        );
        Ok(())
    }
}

/// The appliance API lives at the endpoint host root, not under `/sdk`.
fn api_base(url: &str) -> String {
    url.trim_end_matches('/')
        .trim_end_matches("/sdk")
        .trim_end_matches('/')
        .to_string()
}

fn is_transient(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout() || e.is_request()
}

// ── Unit tests ───────────────────────────────────────────────────────────────
