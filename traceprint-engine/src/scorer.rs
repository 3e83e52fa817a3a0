//! Risk scoring
//!
//! An explicit escalating heuristic, not a model. The level only ever moves
//! up as evidence accumulates: profile volume, high-confidence API
//! confirmation, multi-source corroboration, and finally the caller's own
//! watchlist flag. Confidence reflects adapter diversity and how much of the
//! dispatched set actually ran.

use tracing::debug;

use traceprint_core::{
    AggregatedProfile, Confidence, ProbeOutcome, RiskAssessment, RiskContextFlags, RiskLevel,
    RiskTag, RiskThresholds,
};

/// Score aggregated evidence into a risk assessment
pub fn score(
    profiles: &[AggregatedProfile],
    outcomes: &[ProbeOutcome],
    flags: RiskContextFlags,
    thresholds: &RiskThresholds,
) -> RiskAssessment {
    let mut level = RiskLevel::Low;
    let mut rationale = Vec::new();

    let succeeded = outcomes.iter().filter(|o| o.status.contributes()).count();
    if succeeded == 0 {
        rationale.push(RiskTag::NoData);
    }

    if profiles.len() >= thresholds.medium_profile_count {
        level = level.max(RiskLevel::Medium);
        rationale.push(RiskTag::ProfileCountMedium);
    }

    let api_confirmed = profiles.iter().any(|p| {
        p.confidence == Confidence::High && p.contributing_adapters.contains("public_api")
    });
    if api_confirmed {
        level = level.max(RiskLevel::Medium);
        rationale.push(RiskTag::HighConfidenceApiHit);
    }

    if profiles.len() >= thresholds.high_profile_count {
        level = level.max(RiskLevel::High);
        rationale.push(RiskTag::ProfileCountHigh);
    }

    let corroborated = profiles
        .iter()
        .any(|p| p.contributing_adapters.len() >= thresholds.corroboration_sources);
    if corroborated {
        level = level.max(RiskLevel::High);
        rationale.push(RiskTag::MultiSourceCorroboration);
    }

    // Critical comes only from the caller's domain context; this engine
    // consults no watchlists of its own
    if flags.watchlist_match {
        level = RiskLevel::Critical;
        rationale.push(RiskTag::WatchlistFlagged);
    }

    let confidence_score = confidence(profiles, outcomes);

    debug!(
        "Scored {} profiles from {} outcomes: {} (confidence {:.2})",
        profiles.len(),
        outcomes.len(),
        level,
        confidence_score
    );

    RiskAssessment {
        level,
        confidence_score,
        rationale,
    }
}

/// Monotonic in both adapter diversity and dispatch success fraction
fn confidence(profiles: &[AggregatedProfile], outcomes: &[ProbeOutcome]) -> f64 {
    let dispatched = outcomes.len();
    if dispatched == 0 {
        return 0.0;
    }

    let succeeded = outcomes.iter().filter(|o| o.status.contributes()).count();
    let success_fraction = succeeded as f64 / dispatched as f64;

    let contributing: std::collections::BTreeSet<&String> = profiles
        .iter()
        .flat_map(|p| p.contributing_adapters.iter())
        .collect();
    let diversity = contributing.len() as f64 / dispatched as f64;

    (diversity * success_fraction).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::time::Duration;

    fn profile(url: &str, confidence: Confidence, sources: &[&str]) -> AggregatedProfile {
        AggregatedProfile {
            platform_label: "GitHub".to_string(),
            canonical_url: url.to_string(),
            confidence,
            contributing_adapters: sources.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    fn profiles(count: usize) -> Vec<AggregatedProfile> {
        (0..count)
            .map(|i| {
                profile(
                    &format!("https://site{i}.example/u"),
                    Confidence::Medium,
                    &["url_checker"],
                )
            })
            .collect()
    }

    fn ok_outcomes() -> Vec<ProbeOutcome> {
        vec![
            ProbeOutcome::success("url_checker", vec![], Duration::from_millis(10)),
            ProbeOutcome::success("public_api", vec![], Duration::from_millis(10)),
        ]
    }

    #[test]
    fn test_no_data_floor() {
        let outcomes = vec![
            ProbeOutcome::failed("url_checker", "boom", Duration::from_millis(1)),
            ProbeOutcome::unavailable("enumeration_tool", "absent"),
        ];

        let assessment = score(&[], &outcomes, RiskContextFlags::default(), &Default::default());

        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.rationale.contains(&RiskTag::NoData));
        assert_eq!(assessment.confidence_score, 0.0);
    }

    #[test]
    fn test_profile_count_escalation() {
        let thresholds = RiskThresholds::default();

        let low = score(&profiles(2), &ok_outcomes(), Default::default(), &thresholds);
        assert_eq!(low.level, RiskLevel::Low);

        let medium = score(&profiles(5), &ok_outcomes(), Default::default(), &thresholds);
        assert_eq!(medium.level, RiskLevel::Medium);
        assert!(medium.rationale.contains(&RiskTag::ProfileCountMedium));

        let high = score(&profiles(15), &ok_outcomes(), Default::default(), &thresholds);
        assert_eq!(high.level, RiskLevel::High);
        assert!(high.rationale.contains(&RiskTag::ProfileCountHigh));
    }

    #[test]
    fn test_api_confirmation_escalates_to_medium() {
        let evidence = vec![profile(
            "https://github.com/x",
            Confidence::High,
            &["public_api"],
        )];
        let assessment = score(&evidence, &ok_outcomes(), Default::default(), &Default::default());

        assert_eq!(assessment.level, RiskLevel::Medium);
        assert!(assessment.rationale.contains(&RiskTag::HighConfidenceApiHit));
    }

    #[test]
    fn test_corroboration_escalates_to_high() {
        let evidence = vec![profile(
            "https://github.com/x",
            Confidence::Medium,
            &["url_checker", "enumeration_tool"],
        )];
        let assessment = score(&evidence, &ok_outcomes(), Default::default(), &Default::default());

        assert_eq!(assessment.level, RiskLevel::High);
        assert!(assessment
            .rationale
            .contains(&RiskTag::MultiSourceCorroboration));
    }

    #[test]
    fn test_critical_only_from_caller_flag() {
        let flags = RiskContextFlags {
            watchlist_match: true,
        };
        let assessment = score(&profiles(1), &ok_outcomes(), flags, &Default::default());

        assert_eq!(assessment.level, RiskLevel::Critical);
        assert!(assessment.rationale.contains(&RiskTag::WatchlistFlagged));

        // Without the flag, nothing else reaches Critical
        let heavy = score(&profiles(100), &ok_outcomes(), Default::default(), &Default::default());
        assert!(heavy.level < RiskLevel::Critical);
    }

    #[test]
    fn test_level_monotonic_in_profile_count() {
        let thresholds = RiskThresholds::default();
        let mut previous = RiskLevel::Low;

        for count in 0..20 {
            let assessment = score(
                &profiles(count),
                &ok_outcomes(),
                Default::default(),
                &thresholds,
            );
            assert!(
                assessment.level >= previous,
                "level dropped at count {count}"
            );
            previous = assessment.level;
        }
    }

    #[test]
    fn test_adding_corroborated_profile_never_lowers_level() {
        let thresholds = RiskThresholds::default();
        let base = profiles(6);
        let before = score(&base, &ok_outcomes(), Default::default(), &thresholds);

        let mut extended = base;
        extended.push(profile(
            "https://github.com/x",
            Confidence::High,
            &["public_api", "url_checker"],
        ));
        let after = score(&extended, &ok_outcomes(), Default::default(), &thresholds);

        assert!(after.level >= before.level);
    }

    #[test]
    fn test_confidence_grows_with_diversity() {
        let outcomes = vec![
            ProbeOutcome::success("url_checker", vec![], Duration::from_millis(1)),
            ProbeOutcome::success("enumeration_tool", vec![], Duration::from_millis(1)),
        ];

        let single = vec![profile("https://a.example/u", Confidence::Medium, &["url_checker"])];
        let diverse = vec![profile(
            "https://a.example/u",
            Confidence::Medium,
            &["url_checker", "enumeration_tool"],
        )];

        let narrow = score(&single, &outcomes, Default::default(), &Default::default());
        let wide = score(&diverse, &outcomes, Default::default(), &Default::default());

        assert!(wide.confidence_score > narrow.confidence_score);
    }
}
