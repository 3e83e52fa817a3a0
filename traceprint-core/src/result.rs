//! Aggregated profiles and the investigation result root aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{Confidence, InvestigationRequest, ProbeOutcome, RiskAssessment};

/// A deduplicated, multi-source-attributed profile shown to the analyst
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedProfile {
    /// Platform name, taken from the most trusted contributing adapter
    pub platform_label: String,
    /// Normalized profile URL
    pub canonical_url: String,
    /// Maximum confidence across contributing sources
    pub confidence: Confidence,
    /// Adapters that reported this profile (never empty)
    pub contributing_adapters: BTreeSet<String>,
}

/// The root aggregate handed to the caller and the audit collaborator
///
/// Read-only after completion. The engine never persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigationResult {
    pub request: InvestigationRequest,
    pub probe_outcomes: Vec<ProbeOutcome>,
    pub aggregated_profiles: Vec<AggregatedProfile>,
    pub risk: RiskAssessment,
    /// Adapters whose status was Success or PartialSuccess
    pub tools_used: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl InvestigationResult {
    /// Derive `tools_used` from outcome statuses
    pub fn tools_used_from(outcomes: &[ProbeOutcome]) -> Vec<String> {
        outcomes
            .iter()
            .filter(|o| o.status.contributes())
            .map(|o| o.adapter_name.clone())
            .collect()
    }

    /// Wall time the investigation consumed
    pub fn elapsed_ms(&self) -> i64 {
        (self.completed_at - self.started_at).num_milliseconds()
    }
}
