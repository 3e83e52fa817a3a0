//! Risk assessment types
//!
//! The scoring mechanism (ordered escalation, never de-escalation) is fixed;
//! the numeric cutoffs are deployment-tunable via `RiskThresholds`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall risk level, ordered
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Short structured rationale tags explaining an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTag {
    /// No adapter succeeded; the level says nothing about the target
    NoData,
    /// Aggregated profile count crossed the medium threshold
    ProfileCountMedium,
    /// Aggregated profile count crossed the high threshold
    ProfileCountHigh,
    /// A public-API source confirmed a profile with high confidence
    HighConfidenceApiHit,
    /// Multiple independent adapters corroborated the same profile
    MultiSourceCorroboration,
    /// Caller flagged the username against a watchlist
    WatchlistFlagged,
}

/// Derived severity/confidence summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Overall level
    pub level: RiskLevel,
    /// Confidence in the assessment, 0.0 - 1.0
    pub confidence_score: f64,
    /// Structured rationale
    pub rationale: Vec<RiskTag>,
}

/// Tunable escalation cutoffs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Profile count at which level escalates to Medium
    pub medium_profile_count: usize,
    /// Profile count at which level escalates to High
    pub high_profile_count: usize,
    /// Contributing-adapter count on one profile that counts as corroboration
    pub corroboration_sources: usize,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium_profile_count: 5,
            high_profile_count: 15,
            corroboration_sources: 2,
        }
    }
}
