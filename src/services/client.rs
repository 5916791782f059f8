//! Copilot metrics API client
//!
//! Issues a single authenticated GET against the metrics endpoint of an
//! enterprise or organization and returns the decoded body untouched.
//! No retry: transport failures and error statuses go straight to the caller.

use crate::config::AccountType;
use crate::types::{MetricsError, Result};
use chrono::NaiveDate;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

/// GitHub REST API base URL
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Value of the `X-GitHub-Api-Version` header
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 5;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const USER_AGENT: &str = concat!("copilot-metrics/", env!("CARGO_PKG_VERSION"));

/// Everything needed to address one account's metrics endpoint
#[derive(Debug, Clone)]
pub struct MetricsRequest {
    pub account: String,
    pub account_type: AccountType,
    pub token: SecretString,
    pub api_version: String,
    pub api_base: String,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl MetricsRequest {
    pub fn new(account: impl Into<String>, account_type: AccountType, token: SecretString) -> Self {
        Self {
            account: account.into(),
            account_type,
            token,
            api_version: DEFAULT_API_VERSION.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            since: None,
            until: None,
        }
    }

    /// Full endpoint URL, e.g. `https://api.github.com/orgs/acme/copilot/metrics?since=2024-06-01`
    pub fn url(&self) -> String {
        let mut url = format!(
            "{}/{}/{}/copilot/metrics",
            self.api_base.trim_end_matches('/'),
            self.account_type.path_segment(),
            self.account
        );

        let params: Vec<String> = [("since", self.since), ("until", self.until)]
            .into_iter()
            .filter_map(|(key, date)| date.map(|d| format!("{}={}", key, d.format("%Y-%m-%d"))))
            .collect();
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        url
    }
}

/// Source of raw metrics responses
pub trait MetricsSource {
    /// Fetch the decoded JSON body for `request`
    fn fetch(&self, request: &MetricsRequest) -> Result<serde_json::Value>;
}

/// GitHub error payload (minimal fields)
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Blocking HTTP client for the GitHub Copilot metrics API
pub struct GitHubClient {
    client: reqwest::blocking::Client,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MetricsError::Transport(format!("HTTP client error: {}", e)))?;
        Ok(Self { client })
    }
}

impl MetricsSource for GitHubClient {
    fn fetch(&self, request: &MetricsRequest) -> Result<serde_json::Value> {
        let url = request.url();
        tracing::debug!(%url, api_version = %request.api_version, "fetching copilot metrics");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(API_VERSION_HEADER, &request.api_version)
            .bearer_auth(request.token.expose_secret())
            .send()
            .map_err(|e| MetricsError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| MetricsError::Transport(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "metrics request rejected");
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(MetricsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "metrics received");
        serde_json::from_str(&body)
            .map_err(|e| MetricsError::MalformedResponse(format!("invalid JSON: {}", e)))
    }
}
