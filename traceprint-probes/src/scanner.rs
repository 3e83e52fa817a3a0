//! Comprehensive-scanner adapter
//!
//! The scan service is asynchronous: a submit call starts a scan, then the
//! adapter polls a results endpoint with backoff until the scan completes or
//! the poll window expires. Window expiry returns `PartialSuccess` with
//! whatever was collected so far.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use traceprint_core::{Confidence, InvestigationRequest, ProbeOutcome, ProfileCandidate};

use crate::traits::{AdapterKind, PartialSink, ProbeAdapter, ProbeError};

/// Scanner service configuration
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Base URL of the scan service
    pub base_url: String,
    /// Initial poll interval in milliseconds
    pub poll_interval_ms: u64,
    /// Backoff cap for the poll interval, in milliseconds
    pub max_poll_interval_ms: u64,
    /// Poll window in seconds; expiry yields PartialSuccess
    pub poll_window_secs: u64,
    /// Per-request HTTP timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("TRACEPRINT_SCANNER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8500".to_string()),
            poll_interval_ms: 2000,
            max_poll_interval_ms: 10_000,
            poll_window_secs: 120,
            http_timeout_secs: 15,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    scan_id: String,
}

#[derive(Debug, Deserialize)]
struct PollResponse {
    status: ScanStatus,
    #[serde(default)]
    results: Vec<ScanHit>,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum ScanStatus {
    Queued,
    Running,
    Complete,
    Failed,
}

#[derive(Debug, Deserialize)]
struct ScanHit {
    platform: String,
    url: String,
    #[serde(default)]
    confidence: Option<f64>,
}

impl ScanHit {
    fn into_candidate(self, source: &str) -> ProfileCandidate {
        let confidence = match self.confidence {
            Some(c) if c >= 0.8 => Confidence::High,
            Some(c) if c >= 0.5 => Confidence::Medium,
            Some(_) => Confidence::Low,
            None => Confidence::Unknown,
        };
        ProfileCandidate::new(&self.platform, &self.url, confidence, source)
    }
}

/// Adapter for the locally- or remotely-hosted comprehensive scan service
pub struct ScannerAdapter {
    config: ScannerConfig,
}

impl ScannerAdapter {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    fn client(&self) -> Result<Client, ProbeError> {
        Client::builder()
            .timeout(Duration::from_secs(self.config.http_timeout_secs))
            .user_agent("traceprint/0.1")
            .build()
            .map_err(|e| ProbeError::Transport(format!("client build: {e}")))
    }

    async fn submit(&self, client: &Client, username: &str) -> Result<String, ProbeError> {
        let url = format!("{}/api/scan", self.config.base_url);
        let response = client
            .post(&url)
            .json(&serde_json::json!({ "username": username }))
            .send()
            .await
            .map_err(|e| ProbeError::Transport(format!("submit: {e}")))?;

        if !response.status().is_success() {
            return Err(ProbeError::Transport(format!(
                "submit returned HTTP {}",
                response.status()
            )));
        }

        let submitted: SubmitResponse = response
            .json()
            .await
            .map_err(|e| ProbeError::MalformedResponse(format!("submit body: {e}")))?;

        debug!("Scanner accepted scan {}", submitted.scan_id);
        Ok(submitted.scan_id)
    }

    async fn poll_once(&self, client: &Client, scan_id: &str) -> Result<PollResponse, ProbeError> {
        let url = format!("{}/api/scan/{}", self.config.base_url, scan_id);
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProbeError::Transport(format!("poll: {e}")))?;

        if !response.status().is_success() {
            return Err(ProbeError::Transport(format!(
                "poll returned HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ProbeError::MalformedResponse(format!("poll body: {e}")))
    }
}

#[async_trait]
impl ProbeAdapter for ScannerAdapter {
    fn name(&self) -> &'static str {
        AdapterKind::ComprehensiveScanner.name()
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::ComprehensiveScanner
    }

    fn default_timeout(&self) -> Duration {
        // Leave headroom over the poll window so expiry is reported as
        // PartialSuccess by this adapter, not TimedOut by the orchestrator
        Duration::from_secs(self.config.poll_window_secs + 2 * self.config.http_timeout_secs)
    }

    async fn investigate(&self, request: &InvestigationRequest) -> ProbeOutcome {
        self.investigate_incremental(request, PartialSink::default())
            .await
    }

    async fn investigate_incremental(
        &self,
        request: &InvestigationRequest,
        sink: PartialSink,
    ) -> ProbeOutcome {
        let started = Instant::now();
        let name = self.name();

        let client = match self.client() {
            Ok(c) => c,
            Err(e) => return ProbeOutcome::failed(name, &e.to_string(), started.elapsed()),
        };

        let scan_id = match self.submit(&client, &request.username).await {
            Ok(id) => id,
            Err(e) => return ProbeOutcome::failed(name, &e.to_string(), started.elapsed()),
        };

        let window = Duration::from_secs(self.config.poll_window_secs);
        let mut interval = Duration::from_millis(self.config.poll_interval_ms);
        let interval_cap = Duration::from_millis(self.config.max_poll_interval_ms);
        let mut collected: Vec<ProfileCandidate> = Vec::new();
        let mut polls: u64 = 0;

        while started.elapsed() < window {
            tokio::time::sleep(interval).await;
            polls += 1;

            match self.poll_once(&client, &scan_id).await {
                Ok(poll) => {
                    // The service reports everything found so far on each poll
                    collected = poll
                        .results
                        .into_iter()
                        .map(|hit| hit.into_candidate(name))
                        .collect();
                    // Published hits survive even if the orchestrator cancels
                    // this call before the scan completes
                    *sink.lock() = collected.clone();

                    match poll.status {
                        ScanStatus::Complete => {
                            debug!("Scan {} complete after {} polls", scan_id, polls);
                            return ProbeOutcome::success(name, collected, started.elapsed())
                                .with_metadata("polls", polls.into());
                        }
                        ScanStatus::Failed => {
                            return ProbeOutcome::failed(
                                name,
                                "scan service reported failure",
                                started.elapsed(),
                            )
                            .with_metadata("polls", polls.into());
                        }
                        ScanStatus::Queued | ScanStatus::Running => {}
                    }
                }
                Err(e) => {
                    // One missed poll is not fatal; the next may succeed
                    warn!("Scanner poll failed: {e}");
                }
            }

            interval = (interval * 2).min(interval_cap);
        }

        debug!(
            "Scan {} poll window expired with {} partial results",
            scan_id,
            collected.len()
        );
        ProbeOutcome::partial(name, collected, "poll window expired", started.elapsed())
            .with_metadata("polls", polls.into())
            .with_metadata("scan_id", scan_id.into())
    }
}
