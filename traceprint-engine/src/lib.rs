//! Traceprint Engine - investigation orchestration and risk aggregation
//!
//! Given a username, the engine:
//! - Detects which probe adapters the deployment can actually run
//! - Dispatches them concurrently under independent time budgets
//! - Collects every outcome, tolerating partial and total probe failure
//! - Deduplicates and source-attributes the discovered profiles
//! - Scores overall risk and emits an audit record
//!
//! The only caller-visible failures are malformed input and a deployment
//! with zero usable adapters; everything else degrades into the result.

pub mod aggregate;
pub mod audit;
pub mod capability;
pub mod engine;
pub mod orchestrator;
pub mod scorer;

pub use aggregate::merge;
pub use audit::emit;
pub use capability::{CapabilityDetector, DeploymentContext};
pub use engine::{Engine, EngineConfig, EngineError};
pub use orchestrator::run_probes;
pub use scorer::score;

#[cfg(test)]
pub(crate) mod test_support;
