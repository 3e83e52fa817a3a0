//! Top-level engine entry point
//!
//! Wires capability detection, orchestration, aggregation, scoring and audit
//! emission behind one call. Preconditions (valid username, at least one
//! usable adapter) are the only errors a caller ever sees; past dispatch,
//! every failure mode degrades into the result itself.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use traceprint_core::{
    AuditRecord, InvestigationRequest, InvestigationResult, PlatformHint, RequestError,
    RiskContextFlags, RiskThresholds, DEFAULT_GLOBAL_TIMEOUT_SECS,
};
use traceprint_probes::ProbeAdapter;

use crate::{aggregate, audit, capability::CapabilityDetector, orchestrator, scorer};
use crate::capability::DeploymentContext;

/// Caller-visible failures; everything downstream of dispatch degrades
/// into the result instead
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error("no probe adapters available in this deployment")]
    NoAdaptersAvailable,
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Global wall-clock budget per investigation
    pub global_timeout: Duration,
    /// Risk escalation cutoffs
    pub thresholds: RiskThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            global_timeout: Duration::from_secs(DEFAULT_GLOBAL_TIMEOUT_SECS),
            thresholds: RiskThresholds::default(),
        }
    }
}

/// The investigation engine; stateless between requests apart from the
/// capability detector's memoized reachability cache
pub struct Engine {
    detector: CapabilityDetector,
    config: EngineConfig,
}

impl Engine {
    pub fn new(context: DeploymentContext, config: EngineConfig) -> Self {
        Self {
            detector: CapabilityDetector::new(context),
            config,
        }
    }

    /// Run one investigation end to end and return the completed result
    pub async fn investigate(
        &self,
        username: &str,
        platform_hint: Option<PlatformHint>,
        risk_context: RiskContextFlags,
    ) -> Result<InvestigationResult, EngineError> {
        let request = InvestigationRequest::new(username, platform_hint, risk_context)?;

        let adapters = self.detector.detect_active_adapters().await;
        if adapters.is_empty() {
            return Err(EngineError::NoAdaptersAvailable);
        }

        info!(
            "Investigating {} with {} adapters (budget {:?})",
            request.username,
            adapters.len(),
            self.config.global_timeout
        );

        Ok(run_investigation(&adapters, request, &self.config).await)
    }

    /// Investigate and project straight to the audit record
    pub async fn investigate_to_audit(
        &self,
        username: &str,
        platform_hint: Option<PlatformHint>,
        risk_context: RiskContextFlags,
    ) -> Result<(InvestigationResult, AuditRecord), EngineError> {
        let result = self.investigate(username, platform_hint, risk_context).await?;
        let record = audit::emit(&result);
        Ok((result, record))
    }

    /// The adapters the current deployment can run, by name
    pub async fn active_adapter_names(&self) -> Vec<&'static str> {
        self.detector
            .detect_active_adapters()
            .await
            .iter()
            .map(|a| a.name())
            .collect()
    }
}

/// Core pipeline once preconditions have passed; always produces a
/// well-formed result
pub(crate) async fn run_investigation(
    adapters: &[Arc<dyn ProbeAdapter>],
    request: InvestigationRequest,
    config: &EngineConfig,
) -> InvestigationResult {
    let started_at = Utc::now();

    let outcomes = orchestrator::run_probes(adapters, &request, config.global_timeout).await;
    let profiles = aggregate::merge(&outcomes);
    let risk = scorer::score(&profiles, &outcomes, request.risk_context, &config.thresholds);
    let tools_used = InvestigationResult::tools_used_from(&outcomes);

    InvestigationResult {
        request,
        probe_outcomes: outcomes,
        aggregated_profiles: profiles,
        risk,
        tools_used,
        started_at,
        completed_at: Utc::now(),
    }
}
