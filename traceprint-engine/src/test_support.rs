//! Mock probe adapters for engine tests

use async_trait::async_trait;
use std::time::{Duration, Instant};

use traceprint_core::{InvestigationRequest, ProbeOutcome, ProfileCandidate};
use traceprint_probes::{AdapterKind, PartialSink, ProbeAdapter};

enum Script {
    Ok(Vec<ProfileCandidate>),
    Partial(Vec<ProfileCandidate>),
    Fail(String),
    Unavailable,
    Sleep(Duration),
    /// Publish hits into the sink, then hang until cancelled
    Drip(Vec<ProfileCandidate>),
}

/// A scripted adapter: returns a fixed outcome, optionally after a delay
pub struct MockAdapter {
    name: &'static str,
    script: Script,
    advertised_timeout: Duration,
}

impl MockAdapter {
    pub fn ok(name: &'static str, profiles: Vec<ProfileCandidate>) -> Self {
        Self {
            name,
            script: Script::Ok(profiles),
            advertised_timeout: Duration::from_secs(60),
        }
    }

    pub fn partial(name: &'static str, profiles: Vec<ProfileCandidate>) -> Self {
        Self {
            name,
            script: Script::Partial(profiles),
            advertised_timeout: Duration::from_secs(60),
        }
    }

    pub fn failing(name: &'static str, detail: &str) -> Self {
        Self {
            name,
            script: Script::Fail(detail.to_string()),
            advertised_timeout: Duration::from_secs(60),
        }
    }

    pub fn unavailable(name: &'static str) -> Self {
        Self {
            name,
            script: Script::Unavailable,
            advertised_timeout: Duration::from_secs(60),
        }
    }

    /// Hangs for `delay` before answering; used to exercise deadlines
    pub fn slow(name: &'static str, delay: Duration) -> Self {
        Self {
            name,
            script: Script::Sleep(delay),
            advertised_timeout: Duration::from_secs(60),
        }
    }

    /// Publishes `profiles` incrementally and never finishes on its own;
    /// used to exercise partial salvage on cancellation
    pub fn dripping(name: &'static str, profiles: Vec<ProfileCandidate>) -> Self {
        Self {
            name,
            script: Script::Drip(profiles),
            advertised_timeout: Duration::from_secs(60),
        }
    }
}

#[async_trait]
impl ProbeAdapter for MockAdapter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn kind(&self) -> AdapterKind {
        match self.name {
            "public_api" => AdapterKind::PublicApi,
            "comprehensive_scanner" => AdapterKind::ComprehensiveScanner,
            "enumeration_tool" => AdapterKind::EnumerationTool,
            _ => AdapterKind::UrlChecker,
        }
    }

    fn default_timeout(&self) -> Duration {
        self.advertised_timeout
    }

    async fn investigate(&self, _request: &InvestigationRequest) -> ProbeOutcome {
        let started = Instant::now();
        match &self.script {
            Script::Ok(profiles) => {
                ProbeOutcome::success(self.name, profiles.clone(), started.elapsed())
            }
            Script::Partial(profiles) => ProbeOutcome::partial(
                self.name,
                profiles.clone(),
                "poll window expired",
                started.elapsed(),
            ),
            Script::Fail(detail) => ProbeOutcome::failed(self.name, detail, started.elapsed()),
            Script::Unavailable => ProbeOutcome::unavailable(self.name, "backend absent"),
            Script::Sleep(delay) => {
                tokio::time::sleep(*delay).await;
                ProbeOutcome::success(self.name, vec![], started.elapsed())
            }
            Script::Drip(_) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                ProbeOutcome::failed(self.name, "drip adapter was not cancelled", started.elapsed())
            }
        }
    }

    async fn investigate_incremental(
        &self,
        request: &InvestigationRequest,
        sink: PartialSink,
    ) -> ProbeOutcome {
        if let Script::Drip(profiles) = &self.script {
            *sink.lock() = profiles.clone();
        }
        self.investigate(request).await
    }
}

/// Shorthand for building candidates in tests
pub fn candidate(platform: &str, url: &str, source: &str) -> ProfileCandidate {
    ProfileCandidate::new(platform, url, traceprint_core::Confidence::Medium, source)
}
