//! Per-probe outcomes and raw profile candidates
//!
//! One `ProbeOutcome` exists per adapter per request. Adapters never raise
//! past their boundary - every internal failure is folded into the outcome's
//! status and `error_detail`, so the orchestrator only ever collects values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Terminal status of one adapter call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// The adapter completed and reported everything it found
    Success,
    /// The adapter's own sub-window expired; profiles are partial
    PartialSuccess,
    /// Transport/process error or malformed payload
    Failed,
    /// The adapter's deadline elapsed before it finished
    TimedOut,
    /// The backend is absent in this deployment (a routing fact, not an error)
    Unavailable,
}

impl ProbeStatus {
    /// Whether profiles from this outcome feed aggregation
    pub fn contributes(&self) -> bool {
        matches!(self, ProbeStatus::Success | ProbeStatus::PartialSuccess)
    }
}

/// Confidence that a candidate really is the target's profile
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    #[default]
    Unknown,
    Low,
    Medium,
    High,
}

/// A raw, pre-deduplication profile sighting from one adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCandidate {
    /// Platform name as the adapter reported it
    pub platform_label: String,
    /// Profile URL as the adapter reported it
    pub url: String,
    /// Adapter's confidence in the sighting
    pub confidence: Confidence,
    /// Name of the adapter that produced this candidate
    pub source_adapter: String,
}

impl ProfileCandidate {
    pub fn new(platform_label: &str, url: &str, confidence: Confidence, source: &str) -> Self {
        Self {
            platform_label: platform_label.to_string(),
            url: url.to_string(),
            confidence,
            source_adapter: source.to_string(),
        }
    }
}

/// The full outcome of one adapter call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// Adapter name, unique within a result
    pub adapter_name: String,
    /// Terminal status
    pub status: ProbeStatus,
    /// Profiles found (may be non-empty for PartialSuccess)
    pub profiles: Vec<ProfileCandidate>,
    /// Human-readable failure detail, kept verbatim for the audit record
    pub error_detail: Option<String>,
    /// Wall time the call consumed
    pub duration_ms: u64,
    /// Adapter-specific metadata (exit codes, poll counts, rate-limit info)
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ProbeOutcome {
    pub fn success(adapter: &str, profiles: Vec<ProfileCandidate>, elapsed: Duration) -> Self {
        Self {
            adapter_name: adapter.to_string(),
            status: ProbeStatus::Success,
            profiles,
            error_detail: None,
            duration_ms: elapsed.as_millis() as u64,
            metadata: HashMap::new(),
        }
    }

    pub fn partial(
        adapter: &str,
        profiles: Vec<ProfileCandidate>,
        detail: &str,
        elapsed: Duration,
    ) -> Self {
        Self {
            adapter_name: adapter.to_string(),
            status: ProbeStatus::PartialSuccess,
            profiles,
            error_detail: Some(detail.to_string()),
            duration_ms: elapsed.as_millis() as u64,
            metadata: HashMap::new(),
        }
    }

    pub fn failed(adapter: &str, detail: &str, elapsed: Duration) -> Self {
        Self {
            adapter_name: adapter.to_string(),
            status: ProbeStatus::Failed,
            profiles: Vec::new(),
            error_detail: Some(detail.to_string()),
            duration_ms: elapsed.as_millis() as u64,
            metadata: HashMap::new(),
        }
    }

    pub fn timed_out(adapter: &str, elapsed: Duration) -> Self {
        Self {
            adapter_name: adapter.to_string(),
            status: ProbeStatus::TimedOut,
            profiles: Vec::new(),
            error_detail: Some("deadline exceeded".to_string()),
            duration_ms: elapsed.as_millis() as u64,
            metadata: HashMap::new(),
        }
    }

    pub fn unavailable(adapter: &str, detail: &str) -> Self {
        Self {
            adapter_name: adapter.to_string(),
            status: ProbeStatus::Unavailable,
            profiles: Vec::new(),
            error_detail: Some(detail.to_string()),
            duration_ms: 0,
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: serde_json::Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::High > Confidence::Medium);
        assert!(Confidence::Medium > Confidence::Low);
        assert!(Confidence::Low > Confidence::Unknown);
    }

    #[test]
    fn test_contributing_statuses() {
        assert!(ProbeStatus::Success.contributes());
        assert!(ProbeStatus::PartialSuccess.contributes());
        assert!(!ProbeStatus::Failed.contributes());
        assert!(!ProbeStatus::TimedOut.contributes());
        assert!(!ProbeStatus::Unavailable.contributes());
    }

    #[test]
    fn test_failure_keeps_detail() {
        let outcome = ProbeOutcome::failed("public_api", "HTTP 403", Duration::from_millis(120));
        assert_eq!(outcome.status, ProbeStatus::Failed);
        assert_eq!(outcome.error_detail.as_deref(), Some("HTTP 403"));
        assert_eq!(outcome.duration_ms, 120);
        assert!(outcome.profiles.is_empty());
    }
}
