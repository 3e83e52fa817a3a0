//! Common probe adapter contract

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use traceprint_core::{InvestigationRequest, ProbeOutcome, ProfileCandidate};

/// Shared landing spot for hits collected mid-flight. Long-running adapters
/// publish into it as results arrive; the orchestrator reads it only if the
/// adapter's deadline fires, so cancellation does not discard those hits.
pub type PartialSink = Arc<Mutex<Vec<ProfileCandidate>>>;

/// Errors internal to adapters, always folded into a `ProbeOutcome`
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("deadline exceeded")]
    Timeout,
}

/// The closed set of adapter variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    UrlChecker,
    EnumerationTool,
    ComprehensiveScanner,
    PublicApi,
}

impl AdapterKind {
    /// Stable adapter name, unique within a result
    pub fn name(&self) -> &'static str {
        match self {
            AdapterKind::UrlChecker => "url_checker",
            AdapterKind::EnumerationTool => "enumeration_tool",
            AdapterKind::ComprehensiveScanner => "comprehensive_scanner",
            AdapterKind::PublicApi => "public_api",
        }
    }

    /// Intrinsic trust order for label tie-breaks during aggregation.
    /// API-verified labels beat scanner labels beat tool labels beat
    /// bare status-code checks.
    pub fn trust_rank(&self) -> u8 {
        match self {
            AdapterKind::PublicApi => 3,
            AdapterKind::ComprehensiveScanner => 2,
            AdapterKind::EnumerationTool => 1,
            AdapterKind::UrlChecker => 0,
        }
    }

    /// Trust rank for an adapter name; unknown names rank lowest
    pub fn trust_rank_of(name: &str) -> u8 {
        match name {
            "public_api" => AdapterKind::PublicApi.trust_rank(),
            "comprehensive_scanner" => AdapterKind::ComprehensiveScanner.trust_rank(),
            "enumeration_tool" => AdapterKind::EnumerationTool.trust_rank(),
            "url_checker" => AdapterKind::UrlChecker.trust_rank(),
            _ => 0,
        }
    }
}

/// Common interface for all probe backends
#[async_trait]
pub trait ProbeAdapter: Send + Sync {
    /// Stable adapter name
    fn name(&self) -> &'static str;

    /// Which of the closed variants this is
    fn kind(&self) -> AdapterKind;

    /// Adapter-specific time budget, capped by the orchestrator against the
    /// remaining global budget
    fn default_timeout(&self) -> Duration;

    /// Run the probe. Must respect cancellation and never panic; any internal
    /// error is converted into a Failed/Unavailable outcome.
    async fn investigate(&self, request: &InvestigationRequest) -> ProbeOutcome;

    /// Run the probe, publishing hits into `sink` as they are collected.
    /// Adapters that accumulate results over a long window override this;
    /// for everything else the sink simply stays empty.
    async fn investigate_incremental(
        &self,
        request: &InvestigationRequest,
        _sink: PartialSink,
    ) -> ProbeOutcome {
        self.investigate(request).await
    }
}

/// Fold an adapter-internal result into the mandatory outcome shape
pub(crate) fn outcome_from(
    adapter: &str,
    started: Instant,
    result: Result<Vec<ProfileCandidate>, ProbeError>,
) -> ProbeOutcome {
    let elapsed = started.elapsed();
    match result {
        Ok(profiles) => ProbeOutcome::success(adapter, profiles, elapsed),
        Err(ProbeError::Unavailable(detail)) => ProbeOutcome::unavailable(adapter, &detail),
        Err(ProbeError::Timeout) => ProbeOutcome::timed_out(adapter, elapsed),
        Err(err) => ProbeOutcome::failed(adapter, &err.to_string(), elapsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traceprint_core::ProbeStatus;

    #[test]
    fn test_trust_order() {
        assert!(AdapterKind::PublicApi.trust_rank() > AdapterKind::ComprehensiveScanner.trust_rank());
        assert!(
            AdapterKind::ComprehensiveScanner.trust_rank()
                > AdapterKind::EnumerationTool.trust_rank()
        );
        assert!(AdapterKind::EnumerationTool.trust_rank() > AdapterKind::UrlChecker.trust_rank());
    }

    #[test]
    fn test_trust_rank_by_name_matches_kind() {
        for kind in [
            AdapterKind::UrlChecker,
            AdapterKind::EnumerationTool,
            AdapterKind::ComprehensiveScanner,
            AdapterKind::PublicApi,
        ] {
            assert_eq!(AdapterKind::trust_rank_of(kind.name()), kind.trust_rank());
        }
        assert_eq!(AdapterKind::trust_rank_of("mystery"), 0);
    }

    #[test]
    fn test_outcome_from_error_variants() {
        let started = Instant::now();

        let unavailable = outcome_from(
            "enumeration_tool",
            started,
            Err(ProbeError::Unavailable("binary not installed".into())),
        );
        assert_eq!(unavailable.status, ProbeStatus::Unavailable);

        let failed = outcome_from(
            "public_api",
            started,
            Err(ProbeError::Transport("connection refused".into())),
        );
        assert_eq!(failed.status, ProbeStatus::Failed);
        assert!(failed.error_detail.unwrap().contains("connection refused"));

        let timed_out = outcome_from("comprehensive_scanner", started, Err(ProbeError::Timeout));
        assert_eq!(timed_out.status, ProbeStatus::TimedOut);
    }
}
