//! Enumeration-tool adapter
//!
//! Wraps an external username-enumeration utility behind a subprocess
//! boundary. The tool's argv, exit code and stdout format are the whole
//! integration surface: spawn, capture, parse, time-bound. A missing binary
//! is `Unavailable` (a deployment fact), not `Failed`.

use async_trait::async_trait;
use regex::Regex;
use std::io::ErrorKind;
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, warn};

use traceprint_core::{Confidence, InvestigationRequest, ProbeOutcome, ProfileCandidate};

use crate::traits::{outcome_from, AdapterKind, ProbeAdapter, ProbeError};

/// Lines like `[+] GitHub: https://github.com/someone`
static HIT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\[\+\]\s+([^:]+):\s+(https?://\S+)").expect("static regex")
});

/// Enumeration tool configuration
#[derive(Debug, Clone)]
pub struct EnumerationConfig {
    /// Binary name or path (resolved via PATH when bare)
    pub binary: String,
    /// Extra argv passed before the username
    pub extra_args: Vec<String>,
    /// Subprocess time budget in seconds
    pub timeout_secs: u64,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            binary: std::env::var("TRACEPRINT_ENUM_BIN").unwrap_or_else(|_| "sherlock".to_string()),
            extra_args: vec!["--print-found".to_string(), "--no-color".to_string()],
            timeout_secs: 120,
        }
    }
}

/// Adapter invoking the enumeration utility as a subprocess
pub struct EnumerationAdapter {
    config: EnumerationConfig,
}

impl EnumerationAdapter {
    pub fn new(config: EnumerationConfig) -> Self {
        Self { config }
    }

    async fn run_tool(&self, username: &str) -> Result<Vec<ProfileCandidate>, ProbeError> {
        let mut cmd = Command::new(&self.config.binary);
        cmd.args(&self.config.extra_args)
            .arg(username)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Cancellation at the orchestrator drops this future; the
            // subprocess must not outlive it
            .kill_on_drop(true);

        debug!("Spawning enumeration tool: {}", self.config.binary);

        let output = cmd.output().await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                ProbeError::Unavailable(format!("{} not installed", self.config.binary))
            }
            _ => ProbeError::Transport(format!("spawn failed: {e}")),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let candidates = parse_tool_output(&stdout, self.name());

        if !output.status.success() && candidates.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let snippet: String = stderr.chars().take(200).collect();
            warn!(
                "Enumeration tool exited with {:?}: {}",
                output.status.code(),
                snippet
            );
            return Err(ProbeError::Transport(format!(
                "exit code {:?}: {}",
                output.status.code(),
                snippet.trim()
            )));
        }

        debug!("Enumeration tool reported {} hits", candidates.len());
        Ok(candidates)
    }
}

/// Parse `[+] Platform: url` lines from tool stdout
fn parse_tool_output(stdout: &str, source: &str) -> Vec<ProfileCandidate> {
    HIT_LINE
        .captures_iter(stdout)
        .map(|cap| {
            ProfileCandidate::new(
                cap[1].trim(),
                cap[2].trim(),
                Confidence::Medium,
                source,
            )
        })
        .collect()
}

#[async_trait]
impl ProbeAdapter for EnumerationAdapter {
    fn name(&self) -> &'static str {
        AdapterKind::EnumerationTool.name()
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::EnumerationTool
    }

    fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    async fn investigate(&self, request: &InvestigationRequest) -> ProbeOutcome {
        let started = Instant::now();
        let result = self.run_tool(&request.username).await;
        outcome_from(self.name(), started, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traceprint_core::ProbeStatus;

    #[test]
    fn test_parse_tool_output() {
        let stdout = "\
[*] Checking username ghost_acct123 on:
[+] GitHub: https://github.com/ghost_acct123
[-] Facebook: Not Found
[+] Reddit: https://www.reddit.com/user/ghost_acct123
";
        let candidates = parse_tool_output(stdout, "enumeration_tool");

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].platform_label, "GitHub");
        assert_eq!(candidates[0].url, "https://github.com/ghost_acct123");
        assert_eq!(candidates[0].confidence, Confidence::Medium);
        assert_eq!(candidates[1].platform_label, "Reddit");
    }

    #[test]
    fn test_parse_tool_output_empty() {
        assert!(parse_tool_output("[*] nothing here\n", "enumeration_tool").is_empty());
    }

    #[tokio::test]
    async fn test_missing_binary_maps_to_unavailable() {
        let adapter = EnumerationAdapter::new(EnumerationConfig {
            binary: "traceprint-no-such-binary-xyz".to_string(),
            extra_args: vec![],
            timeout_secs: 5,
        });
        let request = InvestigationRequest::new("someone", None, Default::default()).unwrap();

        let outcome = adapter.investigate(&request).await;

        assert_eq!(outcome.status, ProbeStatus::Unavailable);
        assert!(outcome.error_detail.unwrap().contains("not installed"));
    }
}
