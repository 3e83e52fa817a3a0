//! Profile aggregation and deduplication
//!
//! Flattens candidates from contributing outcomes, normalizes their URLs,
//! and merges sightings of the same profile across adapters. Merging is
//! commutative and idempotent: the outcome order and repeated inputs do not
//! change the result set.

use std::collections::HashMap;
use tracing::debug;

use traceprint_core::{AggregatedProfile, Confidence, ProbeOutcome};
use traceprint_probes::AdapterKind;

/// Query parameters that carry tracking state, not identity
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "ref",
    "ref_src",
];

/// Normalize a profile URL for deduplication:
/// lower-case scheme and host, drop tracking query parameters, drop the
/// fragment, strip the trailing slash.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();

    // Fragment never identifies a profile
    let url = url.split('#').next().unwrap_or(url);

    let (base, query) = match url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (url, None),
    };

    // Lower-case through the authority; the path stays case-sensitive
    let base = match base.find("://") {
        Some(scheme_end) => {
            let after_scheme = scheme_end + 3;
            let path_start = base[after_scheme..]
                .find('/')
                .map(|i| after_scheme + i)
                .unwrap_or(base.len());
            format!(
                "{}{}",
                base[..path_start].to_ascii_lowercase(),
                &base[path_start..]
            )
        }
        None => base.to_string(),
    };

    let base = base.trim_end_matches('/').to_string();

    let kept: Vec<&str> = query
        .map(|q| {
            q.split('&')
                .filter(|pair| {
                    // A bare '?' or dangling '&' splits into empty segments
                    if pair.is_empty() {
                        return false;
                    }
                    let key = pair.split('=').next().unwrap_or(pair);
                    !TRACKING_PARAMS.contains(&key.to_ascii_lowercase().as_str())
                })
                .collect()
        })
        .unwrap_or_default();

    if kept.is_empty() {
        base
    } else {
        format!("{}?{}", base, kept.join("&"))
    }
}

struct Group {
    platform_label: String,
    label_rank: u8,
    confidence: Confidence,
    contributors: std::collections::BTreeSet<String>,
}

/// Merge all contributing outcomes into deduplicated, source-attributed
/// profiles, sorted by platform label then URL.
pub fn merge(outcomes: &[ProbeOutcome]) -> Vec<AggregatedProfile> {
    let mut groups: HashMap<String, Group> = HashMap::new();

    for outcome in outcomes {
        if !outcome.status.contributes() {
            continue;
        }

        for candidate in &outcome.profiles {
            let canonical = normalize_url(&candidate.url);
            let rank = AdapterKind::trust_rank_of(&candidate.source_adapter);

            let group = groups.entry(canonical).or_insert_with(|| Group {
                platform_label: candidate.platform_label.clone(),
                label_rank: rank,
                confidence: candidate.confidence,
                contributors: Default::default(),
            });

            // Conflicting labels on one URL: the more trusted source wins
            if rank > group.label_rank {
                group.platform_label = candidate.platform_label.clone();
                group.label_rank = rank;
            }
            group.confidence = group.confidence.max(candidate.confidence);
            group.contributors.insert(candidate.source_adapter.clone());
        }
    }

    let mut profiles: Vec<AggregatedProfile> = groups
        .into_iter()
        .map(|(canonical_url, group)| AggregatedProfile {
            platform_label: group.platform_label,
            canonical_url,
            confidence: group.confidence,
            contributing_adapters: group.contributors,
        })
        .collect();

    profiles.sort_by(|a, b| {
        a.platform_label
            .cmp(&b.platform_label)
            .then_with(|| a.canonical_url.cmp(&b.canonical_url))
    });

    debug!("Merged into {} aggregated profiles", profiles.len());
    profiles
}
