//! Traceprint Probes - adapters wrapping the investigation backends
//!
//! Four adapters behind one capability interface:
//! - Enumeration tool (subprocess)
//! - Comprehensive scanner (HTTP submit + poll)
//! - URL-pattern checker (parallel existence checks, no dependencies)
//! - Public API lookup (GitHub users endpoint)
//!
//! The adapter contract is "never raise past the boundary": every internal
//! error becomes a `ProbeOutcome` with an explicit status.

pub mod enumeration;
pub mod public_api;
pub mod scanner;
pub mod traits;
pub mod url_checker;

pub use enumeration::{EnumerationAdapter, EnumerationConfig};
pub use public_api::{PublicApiAdapter, PublicApiConfig};
pub use scanner::{ScannerAdapter, ScannerConfig};
pub use traits::{AdapterKind, PartialSink, ProbeAdapter, ProbeError};
pub use url_checker::{UrlCheckerAdapter, UrlCheckerConfig};
