//! Action Plan Engine Library
//!
//! A stateless, reusable library for classifying project action items and
//! aggregating their progress.
//!
//! # Architecture
//!
//! The core is a set of pure functions over plain dates:
//! - Derives a lifecycle status from planned/actual dates and a reference date
//! - Layers an alert level (late / due soon) on top of the status
//! - Builds cumulative progress curves and ISO week buckets
//! - Summarises status distributions
//!
//! The only stateful piece is [`RecordStore`], which owns the item collection
//! and calls into the pure core whenever an item is created, edited or the set
//! is reloaded. The core never reads the wall clock; callers pass "today".
//!
//! Rendering, forms and spreadsheets are left to the application layer
//! (action-plan-cli).
//!
//! # Example Usage
//!
//! ```
//! use action_plan_engine::{derive_status, ActionItem, RecordStore, Status};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1);
//! let end = NaiveDate::from_ymd_opt(2024, 1, 15);
//!
//! assert_eq!(derive_status(today, start, end, None, None), Status::Late);
//!
//! let mut store = RecordStore::new();
//! let id = store.insert(ActionItem::new("Transporte").with_planned(start, end), today);
//! assert_eq!(store.get(id).map(|item| item.status), Some(Status::Late));
//! ```

// Public modules
pub mod config;
pub mod dates;
pub mod locale;
pub mod progress;
pub mod status;
pub mod store;
pub mod summary;
pub mod types;
pub mod weeks;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use dates::{parse_date, parse_date_strict};
pub use locale::{parse_status_label, Locale};
pub use progress::{cumulative_counts, date_range, progress_curve, ProgressCurve};
pub use status::{derive_alert, derive_status, resolve_status, Assessment, StatusEngine};
pub use store::{ItemEdit, RecordStore};
pub use summary::{area_status_counts, most_overdue, status_counts, Summary};
pub use types::{ActionItem, AlertLevel, DateField, EngineError, ItemId, Result, Status};
pub use weeks::{iso_week, items_in_week, IsoWeek, WeekWindow};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty store has nothing to report
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert_eq!(Summary::from_items(store.items()).total, 0);
    }
}
