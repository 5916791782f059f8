//! Startup configuration
//!
//! Built once from CLI flags (with `GITHUB_ACCOUNT` / `GITHUB_TOKEN` fallbacks)
//! and passed down explicitly.

use crate::services::client::{MetricsRequest, DEFAULT_API_BASE, DEFAULT_API_VERSION};
use crate::types::{MetricsError, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// Whether metrics are scoped to an enterprise or an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
pub enum AccountType {
    #[default]
    Enterprise,
    Organization,
}

impl AccountType {
    /// URL path segment for the metrics endpoint
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Enterprise => "enterprises",
            Self::Organization => "orgs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Enterprise => "Enterprise",
            Self::Organization => "Organization",
        }
    }
}

/// Resolved configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub account: Option<String>,
    pub account_type: AccountType,
    pub token: Option<SecretString>,
    pub api_version: String,
    pub api_base: String,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account: None,
            account_type: AccountType::default(),
            token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            since: None,
            until: None,
        }
    }
}

impl Config {
    /// Whether both an account and a credential are present
    pub fn is_complete(&self) -> bool {
        let has_account = self.account.as_deref().is_some_and(|a| !a.trim().is_empty());
        let has_token = self
            .token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().trim().is_empty());
        has_account && has_token
    }

    /// Build the metrics request, failing when the account or credential is missing
    pub fn request(&self) -> Result<MetricsRequest> {
        let account = self
            .account
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| {
                MetricsError::Config("account name is required (--account or GITHUB_ACCOUNT)".into())
            })?;

        if !is_valid_account_name(account) {
            return Err(MetricsError::Config(format!(
                "invalid account name {:?}: use letters, digits, '-' or '_'",
                account
            )));
        }

        let token = self
            .token
            .as_ref()
            .filter(|t| !t.expose_secret().trim().is_empty())
            .cloned()
            .ok_or_else(|| {
                MetricsError::Config("GitHub token is required (--token or GITHUB_TOKEN)".into())
            })?;

        if let (Some(since), Some(until)) = (self.since, self.until) {
            if since > until {
                return Err(MetricsError::Config(format!(
                    "--since {} is after --until {}",
                    since, until
                )));
            }
        }

        Ok(MetricsRequest {
            account: account.to_string(),
            account_type: self.account_type,
            token,
            api_version: self.api_version.clone(),
            api_base: self.api_base.clone(),
            since: self.since,
            until: self.until,
        })
    }
}

/// Enterprise slugs and organization logins are a single URL path segment
fn is_valid_account_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
