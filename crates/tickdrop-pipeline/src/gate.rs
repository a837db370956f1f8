//! Daily fundamentals collection window.
//!
//! Fundamentals are collected only when a run starts inside a ~5 minute
//! window around US market open (14:30 UTC). The gate is a pure function of
//! the invocation's wall-clock time, not a persisted "already collected
//! today" marker, so multiple invocations inside the window each collect;
//! the fixed daily store key makes the redundant writes last-writer-wins.

use tickdrop_core::UtcDateTime;

const WINDOW_HOUR: u8 = 14;
const WINDOW_LAST_MINUTE: u8 = 35;

/// True iff `now` falls inside the daily collection window
/// (14:00–14:35 UTC).
pub fn fundamentals_window_open(now: UtcDateTime) -> bool {
    now.hour() == WINDOW_HOUR && now.minute() <= WINDOW_LAST_MINUTE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> UtcDateTime {
        UtcDateTime::parse(raw).expect("valid timestamp")
    }

    #[test]
    fn open_through_minute_thirty_five() {
        assert!(fundamentals_window_open(at("2024-01-02T14:00:00Z")));
        assert!(fundamentals_window_open(at("2024-01-02T14:30:00Z")));
        assert!(fundamentals_window_open(at("2024-01-02T14:35:59Z")));
    }

    #[test]
    fn closed_outside_the_window() {
        assert!(!fundamentals_window_open(at("2024-01-02T14:36:00Z")));
        assert!(!fundamentals_window_open(at("2024-01-02T13:59:59Z")));
        assert!(!fundamentals_window_open(at("2024-01-02T15:30:00Z")));
        assert!(!fundamentals_window_open(at("2024-01-02T02:30:00Z")));
    }
}
