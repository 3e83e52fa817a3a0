//! Audit emission
//!
//! A pure projection of the completed result; persistence belongs to the
//! external activity-logging collaborator.

use tracing::info;

use traceprint_core::{AuditRecord, InvestigationResult};

/// Project a result into its audit record
pub fn emit(result: &InvestigationResult) -> AuditRecord {
    let record = AuditRecord::from_result(result);
    info!(
        "Audit: {} -> {} profiles, risk {}, tools [{}]",
        record.target_username,
        record.profile_count,
        record.risk_level,
        record.tools_used.join(", ")
    );
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::time::Duration;
    use traceprint_core::{
        InvestigationRequest, ProbeOutcome, RiskAssessment, RiskLevel, RiskTag,
    };

    #[test]
    fn test_emit_preserves_failures() {
        let request = InvestigationRequest::new("someone", None, Default::default()).unwrap();
        let outcomes = vec![
            ProbeOutcome::timed_out("comprehensive_scanner", Duration::from_secs(120)),
            ProbeOutcome::failed("public_api", "HTTP 403 rate limited", Duration::from_millis(90)),
        ];
        let now = Utc::now();
        let result = InvestigationResult {
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
        };

        let record = emit(&result);

        assert!(record.tools_used.is_empty());
        assert_eq!(record.adapters.len(), 2);
        let details: Vec<_> = record
            .adapters
            .iter()
            .filter_map(|a| a.error_detail.as_deref())
            .collect();
        assert!(details.contains(&"deadline exceeded"));
        assert!(details.contains(&"HTTP 403 rate limited"));
    }
}
