//! Probe orchestration
//!
//! Dispatches every active adapter concurrently, each wrapped in its own
//! timeout capped by the remaining global budget, and waits for all of them.
//! There is no short-circuit on first success - the value of this engine is
//! breadth of coverage, not latency - and one adapter's failure never aborts
//! its siblings. Dropping a timed-out task cancels it cooperatively;
//! subprocess handles are killed on drop inside the adapters.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use traceprint_core::{InvestigationRequest, ProbeOutcome};
use traceprint_probes::{PartialSink, ProbeAdapter};

/// Run all active adapters against one request under a global deadline.
/// Always returns one outcome per adapter, in dispatch order.
pub async fn run_probes(
    adapters: &[Arc<dyn ProbeAdapter>],
    request: &InvestigationRequest,
    global_timeout: Duration,
) -> Vec<ProbeOutcome> {
    let started = Instant::now();

    let handles: Vec<(&'static str, tokio::task::JoinHandle<ProbeOutcome>)> = adapters
        .iter()
        .map(|adapter| {
            let adapter = Arc::clone(adapter);
            let request = request.clone();
            let name = adapter.name();

            // Each adapter gets its own budget, never more than what is
            // left of the global one
            let remaining = global_timeout.saturating_sub(started.elapsed());
            let budget = adapter.default_timeout().min(remaining);

            debug!("Dispatching {} with budget {:?}", name, budget);

            let handle = tokio::spawn(async move {
                let call_started = Instant::now();
                let sink = PartialSink::default();
                let call = adapter.investigate_incremental(&request, Arc::clone(&sink));
                match tokio::time::timeout(budget, call).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        // Hits the adapter published before the deadline are
                        // kept as a partial result instead of being discarded
                        let salvaged = std::mem::take(&mut *sink.lock());
                        if salvaged.is_empty() {
                            warn!("Adapter {} hit its deadline, cancelling", adapter.name());
                            ProbeOutcome::timed_out(adapter.name(), call_started.elapsed())
                        } else {
                            warn!(
                                "Adapter {} hit its deadline with {} hits salvaged",
                                adapter.name(),
                                salvaged.len()
                            );
                            ProbeOutcome::partial(
                                adapter.name(),
                                salvaged,
                                "deadline exceeded mid-scan",
                                call_started.elapsed(),
                            )
                        }
                    }
                }
            });

            (name, handle)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            // A panicking adapter violates its contract; report it as a
            // failure rather than poisoning the whole request
            Err(join_err) => {
                warn!("Adapter {} task aborted: {}", name, join_err);
                outcomes.push(ProbeOutcome::failed(
                    name,
                    &format!("adapter task aborted: {join_err}"),
                    started.elapsed(),
                ));
            }
        }
    }

    debug!(
        "Orchestration settled in {:?} with {} outcomes",
        started.elapsed(),
        outcomes.len()
    );
    outcomes
}
