//! Public-API adapter
//!
//! Looks the username up against GitHub's public users endpoint. Returns
//! richer metadata (display name, activity counts) alongside existence
//! confirmation. A 404 is a clean "no profile" success; rate limiting and
//! transport errors are failures.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::debug;

use traceprint_core::{Confidence, InvestigationRequest, ProbeOutcome, ProfileCandidate};

use crate::traits::{AdapterKind, ProbeAdapter, ProbeError};

/// Public API configuration
#[derive(Debug, Clone)]
pub struct PublicApiConfig {
    /// API base URL
    pub api_base: String,
    /// Access token; raises the rate limit and gates adapter activation
    pub token: Option<String>,
    /// HTTP timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for PublicApiConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            token: std::env::var("GITHUB_TOKEN").ok(),
            http_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
    html_url: String,
    name: Option<String>,
    public_repos: u64,
    followers: u64,
    created_at: Option<String>,
}

/// Adapter for the code-hosting platform's public user lookup
pub struct PublicApiAdapter {
    config: PublicApiConfig,
}

impl PublicApiAdapter {
    pub fn new(config: PublicApiConfig) -> Self {
        Self { config }
    }

    async fn lookup(
        &self,
        username: &str,
    ) -> Result<Option<UserResponse>, ProbeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.http_timeout_secs))
            .build()
            .map_err(|e| ProbeError::Transport(format!("client build: {e}")))?;

        let url = format!(
            "{}/users/{}",
            self.config.api_base,
            urlencoding::encode(username)
        );

        let mut request = client
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "traceprint/0.1");

        if let Some(token) = &self.config.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProbeError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let user: UserResponse = response
                    .json()
                    .await
                    .map_err(|e| ProbeError::MalformedResponse(e.to_string()))?;
                Ok(Some(user))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(ProbeError::Transport(format!("HTTP {status}"))),
        }
    }
}

#[async_trait]
impl ProbeAdapter for PublicApiAdapter {
    fn name(&self) -> &'static str {
        AdapterKind::PublicApi.name()
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::PublicApi
    }

    fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.config.http_timeout_secs + 5)
    }

    async fn investigate(&self, request: &InvestigationRequest) -> ProbeOutcome {
        let started = Instant::now();
        let name = self.name();

        match self.lookup(&request.username).await {
            Ok(Some(user)) => {
                debug!("API confirmed profile for {}", user.login);
                let candidate = ProfileCandidate::new(
                    "GitHub",
                    &user.html_url,
                    Confidence::High,
                    name,
                );
                let mut outcome =
                    ProbeOutcome::success(name, vec![candidate], started.elapsed())
                        .with_metadata("public_repos", user.public_repos.into())
                        .with_metadata("followers", user.followers.into());
                if let Some(display_name) = user.name {
                    outcome = outcome.with_metadata("display_name", display_name.into());
                }
                if let Some(created_at) = user.created_at {
                    outcome = outcome.with_metadata("account_created_at", created_at.into());
                }
                outcome
            }
            Ok(None) => {
                debug!("API reports no profile for {}", request.username);
                ProbeOutcome::success(name, Vec::new(), started.elapsed())
            }
            Err(e) => ProbeOutcome::failed(name, &e.to_string(), started.elapsed()),
        }
    }
}
