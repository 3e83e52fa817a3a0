//! Traceprint CLI
//!
//! Username OSINT investigation orchestration and risk aggregation.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use traceprint_core::{PlatformHint, RiskContextFlags};
use traceprint_engine::{DeploymentContext, Engine, EngineConfig};
use traceprint_probes::ScannerConfig;

#[derive(Parser)]
#[command(name = "traceprint")]
#[command(author, version, about = "Traceprint: username OSINT investigation engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an investigation for a username
    Investigate {
        /// Target username
        #[arg(short, long)]
        username: String,

        /// Platform hint (github, gitlab, twitter, instagram, reddit,
        /// tiktok, youtube, mastodon)
        #[arg(short, long)]
        platform: Option<String>,

        /// The caller matched this username against a watchlist
        #[arg(long)]
        watchlist: bool,

        /// Global timeout in seconds
        #[arg(long, default_value = "300")]
        timeout: u64,

        /// Scanner service base URL (or set TRACEPRINT_SCANNER_URL)
        #[arg(long, env = "TRACEPRINT_SCANNER_URL")]
        scanner_url: Option<String>,

        /// Emit the audit record as JSON instead of the summary table
        #[arg(long)]
        json: bool,
    },

    /// Report which probe backends this deployment can use
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    match cli.command {
        Commands::Investigate {
            username,
            platform,
            watchlist,
            timeout,
            scanner_url,
            json,
        } => {
            run_investigate(&username, platform, watchlist, timeout, scanner_url, json).await?;
        }
        Commands::Status => {
            check_status().await?;
        }
    }

    Ok(())
}

async fn run_investigate(
    username: &str,
    platform: Option<String>,
    watchlist: bool,
    timeout: u64,
    scanner_url: Option<String>,
    json: bool,
) -> Result<()> {
    let hint: Option<PlatformHint> = match platform {
        Some(p) => Some(p.parse().map_err(|e| anyhow::anyhow!("{e}"))?),
        None => None,
    };

    let mut context = DeploymentContext::from_env();
    if let Some(url) = scanner_url {
        context.scanner = Some(ScannerConfig {
            base_url: url,
            ..ScannerConfig::default()
        });
    }

    let config = EngineConfig {
        global_timeout: Duration::from_secs(timeout),
        ..EngineConfig::default()
    };
    let engine = Engine::new(context, config);

    let flags = RiskContextFlags {
        watchlist_match: watchlist,
    };
    let (result, record) = engine.investigate_to_audit(username, hint, flags).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("\n🔎 Investigation: {}", result.request.username);
    println!(
        "   Risk: {} (confidence {:.2})",
        result.risk.level, result.risk.confidence_score
    );
    println!("   Tools used: {}", result.tools_used.join(", "));
    println!("   Wall time: {} ms", result.elapsed_ms());

    println!("\nAdapter outcomes:");
    for outcome in &result.probe_outcomes {
        let detail = outcome.error_detail.as_deref().unwrap_or("-");
        println!(
            "   {:<24} {:<16} {:>4} profiles  {:>6} ms  {}",
            outcome.adapter_name,
            format!("{:?}", outcome.status),
            outcome.profiles.len(),
            outcome.duration_ms,
            detail
        );
    }

    if result.aggregated_profiles.is_empty() {
        if result.tools_used.is_empty() {
            println!("\n⚠️  No profiles found - but every probe failed, so this is not a clean result.");
        } else {
            println!("\nNo profiles found.");
        }
    } else {
        println!("\nAggregated profiles ({}):", result.aggregated_profiles.len());
        for profile in &result.aggregated_profiles {
            println!(
                "   {:<14} {:<50} {:?} via [{}]",
                profile.platform_label,
                profile.canonical_url,
                profile.confidence,
                profile
                    .contributing_adapters
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }

    tracing::debug!("Audit digest: {}", record.digest);

    Ok(())
}

async fn check_status() -> Result<()> {
    println!("🔌 Detecting probe capabilities...\n");

    let engine = Engine::new(DeploymentContext::from_env(), EngineConfig::default());
    let active = engine.active_adapter_names().await;

    for name in [
        "enumeration_tool",
        "comprehensive_scanner",
        "public_api",
        "url_checker",
    ] {
        if active.contains(&name) {
            println!("✅ {name}");
        } else {
            println!("❌ {name}");
        }
    }

    if active.is_empty() {
        println!("\nNo usable probes. Investigations will fail fast.");
    }

    Ok(())
}
