//! Error handling and resolution statistics.
//!
//! This module provides:
//! - Fatal error types (`SquashError`, `InitializationError`)
//! - Warning categories for problems the flattener absorbs
//! - Per-run warning counters
//!
//! Only a packing failure or invalid input aborts a run. Everything that goes
//! wrong while resolving a single domain is a **warning**: the affected branch
//! contributes fewer terms and the run continues.

mod stats;
mod types;

// Re-export public API
pub use stats::ResolutionStats;
pub use types::{InitializationError, SquashError, WarningType};
