// GitHub API HTTP client.
// Handles authentication, poll interval hints, and response status checks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use reqwest::{
    Client, Method, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::{debug, warn};

use crate::error::{FocusError, Result};
use crate::state::PollState;
use crate::surface::{DesktopNotification, NotificationSurface};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const POLL_INTERVAL_HEADER: &str = "x-poll-interval";

/// Surface id of the "not configured" alert.
pub const CONFIG_ALERT_ID: &str = "gh-focus-config";

/// Per-call options.
#[derive(Debug, Default)]
pub struct CallOptions {
    /// Fail unless the server answers with exactly this status.
    pub require_status: Option<StatusCode>,
}

/// GitHub API client with authentication and poll interval tracking.
pub struct GitHubClient {
    client: Client,
    api_base: String,
    state: Arc<PollState>,
    surface: Arc<dyn NotificationSurface>,
    alerted: AtomicBool,
}

impl GitHubClient {
    /// Create a new client. The token is read from `state` on every request.
    pub fn new(
        api_base: &str,
        state: Arc<PollState>,
        surface: Arc<dyn NotificationSurface>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("gh-focus"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(FocusError::Api)?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            state,
            surface,
            alerted: AtomicBool::new(false),
        })
    }

    /// Absolute URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Get the configured token. When missing, tell the user once and fail.
    pub async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.state.token() {
            return Ok(token.to_string());
        }

        if !self.alerted.swap(true, Ordering::AcqRel) {
            let alert = DesktopNotification {
                title: "GitHub Focus is not configured".to_string(),
                message: "Run `gh-focus set-token <TOKEN>` to configure GitHub Focus".to_string(),
                event_time: Utc::now(),
            };
            if let Err(e) = self.surface.create(CONFIG_ALERT_ID, alert).await {
                warn!(error = %e, "Failed to show configuration alert");
            }
        }
        Err(FocusError::MissingToken)
    }

    /// Make a GET request.
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.request(Method::GET, url, |r| r, CallOptions::default())
            .await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &T,
    ) -> Result<Response> {
        self.request(Method::GET, url, |r| r.query(params), CallOptions::default())
            .await
    }

    /// Make an authenticated request. `build` can add a query or body.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
        options: CallOptions,
    ) -> Result<Response> {
        let token = self.access_token().await?;
        let request = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, bearer(&token)?);

        debug!(method = %method, url = %url, "GitHub request");
        let response = build(request).send().await.map_err(FocusError::Api)?;

        check_status(url, response.status(), options.require_status)?;

        if let Some(hint) = poll_interval_hint(response.headers()) {
            self.state.raise_interval(hint);
        }

        Ok(response)
    }
}

fn bearer(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| FocusError::Other(format!("Invalid token: {}", e)))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Classify a response status.
pub fn check_status(url: &str, status: StatusCode, require: Option<StatusCode>) -> Result<()> {
    if !status.is_success() {
        return Err(FocusError::Http {
            url: url.to_string(),
            status,
        });
    }
    match require {
        Some(expected) if expected != status => Err(FocusError::UnexpectedStatus {
            url: url.to_string(),
            expected,
            actual: status,
        }),
        _ => Ok(()),
    }
}

/// Read the minimum poll interval the server asks for.
pub fn poll_interval_hint(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(POLL_INTERVAL_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
