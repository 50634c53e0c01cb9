//! Resolution statistics tracking.
//!
//! This module counts the non-fatal warnings raised while flattening a policy.

use std::collections::HashMap;
use strum::IntoEnumIterator;

use super::types::WarningType;

/// Per-run warning counters.
///
/// All warning types are initialized to zero on creation. The flattener owns
/// one of these inside its `FlattenState`, so no synchronization is needed.
#[derive(Debug, Clone)]
pub struct ResolutionStats {
    warnings: HashMap<WarningType, usize>,
}

impl Default for ResolutionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionStats {
    /// Creates counters for every warning type, all zero.
    pub fn new() -> Self {
        let mut warnings = HashMap::new();
        for warning in WarningType::iter() {
            warnings.insert(warning, 0);
        }
        ResolutionStats { warnings }
    }

    /// Increment a warning counter.
    pub fn increment_warning(&mut self, warning: WarningType) {
        *self.warnings.entry(warning).or_insert(0) += 1;
    }

    /// Get the count for a warning type.
    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings.get(&warning).copied().unwrap_or(0)
    }

    /// Get total warning count across all warning types.
    pub fn total_warnings(&self) -> usize {
        WarningType::iter().map(|w| self.get_warning_count(w)).sum()
    }

    /// Logs a one-line summary of every non-zero counter.
    pub fn log_summary(&self) {
        for warning in WarningType::iter() {
            let count = self.get_warning_count(warning);
            if count > 0 {
                log::info!("{}: {}", warning, count);
            }
        }
    }
}
