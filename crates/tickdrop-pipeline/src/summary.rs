use serde::{Deserialize, Serialize};

use tickdrop_core::UtcDateTime;

/// Outcome flags for the end-of-pass persistence step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreResults {
    pub quotes_saved: bool,
    pub fundamentals_saved: bool,
}

/// Structured result of one collection pass, returned to the invoker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub status: String,
    pub execution_time_seconds: f64,
    pub companies_total: usize,
    pub quotes_successful: usize,
    pub fundamentals_successful: usize,
    /// Symbols whose quote collection failed, in iteration order.
    pub failed_symbols: Vec<String>,
    pub store_results: StoreResults,
    pub timestamp: UtcDateTime,
}

impl RunSummary {
    /// Every attempted symbol lands in exactly one bucket.
    pub fn accounts_for_all_symbols(&self) -> bool {
        self.quotes_successful + self.failed_symbols.len() == self.companies_total
    }
}

/// Two-decimal rounding for the reported wall-clock duration.
pub(crate) fn round_seconds(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_reported_duration_to_centiseconds() {
        assert_eq!(round_seconds(12.3456), 12.35);
        assert_eq!(round_seconds(0.004), 0.0);
    }
}
