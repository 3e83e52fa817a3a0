//! Capability detection
//!
//! Decides which adapters are usable in the current deployment. The scanner
//! reachability probe is memoized with a short TTL so per-request detection
//! stays cheap. A missing backend is a routing decision, never an error; the
//! URL checker is always includable since it has no external dependency.

use parking_lot::Mutex;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use traceprint_core::{CAPABILITY_CACHE_TTL_SECS, REACHABILITY_PROBE_TIMEOUT_SECS};
use traceprint_probes::{
    EnumerationAdapter, EnumerationConfig, ProbeAdapter, PublicApiAdapter, PublicApiConfig,
    ScannerAdapter, ScannerConfig, UrlCheckerAdapter, UrlCheckerConfig,
};

/// Description of what this deployment has configured.
/// `None` means the adapter is disabled or lacks its prerequisite.
#[derive(Debug, Clone, Default)]
pub struct DeploymentContext {
    pub url_checker: Option<UrlCheckerConfig>,
    pub enumeration: Option<EnumerationConfig>,
    pub scanner: Option<ScannerConfig>,
    pub public_api: Option<PublicApiConfig>,
}

impl DeploymentContext {
    /// Standard context: everything enabled that the environment supports.
    /// The public API is only usable when a token is configured.
    pub fn from_env() -> Self {
        let public_api = {
            let config = PublicApiConfig::default();
            config.token.is_some().then_some(config)
        };

        Self {
            url_checker: Some(UrlCheckerConfig::default()),
            enumeration: Some(EnumerationConfig::default()),
            scanner: Some(ScannerConfig::default()),
            public_api,
        }
    }
}

struct CachedReachability {
    reachable: bool,
    checked_at: Instant,
}

/// Detects the active adapter set, memoizing reachability probes
pub struct CapabilityDetector {
    context: DeploymentContext,
    scanner_cache: Mutex<Option<CachedReachability>>,
    cache_ttl: Duration,
}

impl CapabilityDetector {
    pub fn new(context: DeploymentContext) -> Self {
        Self {
            context,
            scanner_cache: Mutex::new(None),
            cache_ttl: Duration::from_secs(CAPABILITY_CACHE_TTL_SECS),
        }
    }

    #[cfg(test)]
    fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Build the ordered adapter set for this request
    pub async fn detect_active_adapters(&self) -> Vec<Arc<dyn ProbeAdapter>> {
        let mut adapters: Vec<Arc<dyn ProbeAdapter>> = Vec::new();

        if let Some(config) = &self.context.enumeration {
            if binary_installed(&config.binary) {
                adapters.push(Arc::new(EnumerationAdapter::new(config.clone())));
            } else {
                debug!("Enumeration binary {} not found, skipping", config.binary);
            }
        }

        if let Some(config) = &self.context.scanner {
            if self.scanner_reachable(config).await {
                adapters.push(Arc::new(ScannerAdapter::new(config.clone())));
            } else {
                debug!("Scanner at {} unreachable, skipping", config.base_url);
            }
        }

        if let Some(config) = &self.context.public_api {
            adapters.push(Arc::new(PublicApiAdapter::new(config.clone())));
        }

        // Floor-level fallback, no external dependency
        if let Some(config) = &self.context.url_checker {
            adapters.push(Arc::new(UrlCheckerAdapter::new(config.clone())));
        }

        info!(
            "Active adapters: [{}]",
            adapters
                .iter()
                .map(|a| a.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        adapters
    }

    async fn scanner_reachable(&self, config: &ScannerConfig) -> bool {
        {
            let cache = self.scanner_cache.lock();
            if let Some(cached) = cache.as_ref() {
                if cached.checked_at.elapsed() < self.cache_ttl {
                    return cached.reachable;
                }
            }
        }

        let reachable = probe_scanner_health(&config.base_url).await;
        *self.scanner_cache.lock() = Some(CachedReachability {
            reachable,
            checked_at: Instant::now(),
        });
        reachable
    }
}

/// Short health check against the scan service
async fn probe_scanner_health(base_url: &str) -> bool {
    let client = match Client::builder()
        .timeout(Duration::from_secs(REACHABILITY_PROBE_TIMEOUT_SECS))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            warn!("Health-check client build failed: {e}");
            return false;
        }
    };

    let url = format!("{base_url}/api/health");
    match client.get(&url).send().await {
        Ok(response) => response.status().is_success(),
        Err(e) => {
            debug!("Scanner health check failed: {e}");
            false
        }
    }
}

/// Resolve a binary name against PATH, or check an explicit path directly
fn binary_installed(binary: &str) -> bool {
    let path = Path::new(binary);
    if path.components().count() > 1 {
        return path.is_file();
    }

    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(binary).is_file()))
        .unwrap_or(false)
}
