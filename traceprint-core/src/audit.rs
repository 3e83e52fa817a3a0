//! Audit record projection
//!
//! The record handed to the external activity-logging collaborator. Failures
//! are first-class content here: an analyst looking at "low risk, 0 profiles"
//! must be able to tell "clean" from "every tool failed".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{InvestigationResult, ProbeStatus, RiskLevel, RiskTag};

/// Per-adapter slice of the audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterAuditEntry {
    pub adapter_name: String,
    pub status: ProbeStatus,
    pub profile_count: usize,
    /// Kept verbatim from the outcome
    pub error_detail: Option<String>,
    pub duration_ms: u64,
}

/// Flattened projection of an `InvestigationResult` for activity logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub record_id: Uuid,
    pub request_id: Uuid,
    pub target_username: String,
    pub platform_hint: Option<String>,
    pub profile_count: usize,
    pub risk_level: RiskLevel,
    pub risk_confidence: f64,
    pub risk_rationale: Vec<RiskTag>,
    pub tools_used: Vec<String>,
    pub adapters: Vec<AdapterAuditEntry>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// Short content digest over the stable fields
    pub digest: String,
}

impl AuditRecord {
    /// Project a completed result into an audit record (pure)
    pub fn from_result(result: &InvestigationResult) -> Self {
        let adapters: Vec<AdapterAuditEntry> = result
            .probe_outcomes
            .iter()
            .map(|o| AdapterAuditEntry {
                adapter_name: o.adapter_name.clone(),
                status: o.status,
                profile_count: o.profiles.len(),
                error_detail: o.error_detail.clone(),
                duration_ms: o.duration_ms,
            })
            .collect();

        let digest = Self::compute_digest(result);

        Self {
            record_id: Uuid::new_v4(),
            request_id: result.request.request_id,
            target_username: result.request.username.clone(),
            platform_hint: result.request.platform_hint.map(|h| h.label().to_string()),
            profile_count: result.aggregated_profiles.len(),
            risk_level: result.risk.level,
            risk_confidence: result.risk.confidence_score,
            risk_rationale: result.risk.rationale.clone(),
            tools_used: result.tools_used.clone(),
            adapters,
            started_at: result.started_at,
            completed_at: result.completed_at,
            digest,
        }
    }

    fn compute_digest(result: &InvestigationResult) -> String {
        let mut hasher = Sha256::new();
        hasher.update(result.request.request_id.as_bytes());
        hasher.update(result.request.username.as_bytes());
        for outcome in &result.probe_outcomes {
            hasher.update(outcome.adapter_name.as_bytes());
            let status = serde_json::to_string(&outcome.status).unwrap_or_default();
            hasher.update(status.as_bytes());
        }
        for profile in &result.aggregated_profiles {
            hasher.update(profile.canonical_url.as_bytes());
        }
        format!("{:x}", hasher.finalize())[..16].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        InvestigationRequest, ProbeOutcome, RiskAssessment, RiskContextFlags,
    };
    use std::time::Duration;

    fn sample_result() -> InvestigationResult {
        let request =
            InvestigationRequest::new("ghost_acct123", None, RiskContextFlags::default()).unwrap();
        let outcomes = vec![
            ProbeOutcome::success("url_checker", vec![], Duration::from_millis(200)),
            ProbeOutcome::failed("public_api", "connection refused", Duration::from_millis(30)),
        ];
        let now = Utc::now();
        InvestigationResult {
            tools_used: InvestigationResult::tools_used_from(&outcomes),
            request,
            probe_outcomes: outcomes,
            aggregated_profiles: vec![],
            risk: RiskAssessment {
                level: RiskLevel::Low,
                confidence_score: 0.0,
                rationale: vec![RiskTag::NoData],
            },
            started_at: now,
            completed_at: now,
        }
    }

    #[test]
    fn test_audit_record_keeps_error_details() {
        let record = AuditRecord::from_result(&sample_result());

        assert_eq!(record.target_username, "ghost_acct123");
        assert_eq!(record.adapters.len(), 2);
        let api = record
            .adapters
            .iter()
            .find(|a| a.adapter_name == "public_api")
            .unwrap();
        assert_eq!(api.error_detail.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_digest_is_stable_for_same_result() {
        let result = sample_result();
        let a = AuditRecord::from_result(&result);
        let b = AuditRecord::from_result(&result);
        assert_eq!(a.digest, b.digest);
        assert_eq!(a.digest.len(), 16);
    }

    #[test]
    fn test_mandatory_fields_present_on_all_failure() {
        let record = AuditRecord::from_result(&sample_result());
        // Downstream consumers rely on these even when every tool failed
        assert!(!record.target_username.is_empty());
        assert_eq!(record.profile_count, 0);
        assert_eq!(record.risk_level, RiskLevel::Low);
        assert_eq!(record.tools_used, vec!["url_checker"]);
    }
}
