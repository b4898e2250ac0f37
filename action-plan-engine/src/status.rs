//! Status derivation
//!
//! Classifies an action item from its planned and actual dates relative to a
//! reference date. Rules are evaluated in order and the first match wins:
//!
//! 1. no planned start                                   -> `Undetermined`
//! 2. no planned end, planned start before reference     -> `Late`
//! 3. window not yet open (planned start on/after reference,
//!    and planned end, if any, after reference)          -> `Scheduled`
//! 4. actual end recorded                                -> `Completed`
//! 5. planned end before reference                       -> `Late`
//! 6. anything else                                      -> `InProgress`
//!
//! Rescheduled dates never take part in classification. Nothing in here reads
//! the wall clock; "today" is always passed in.

use crate::config::EngineConfig;
use crate::dates::days_between;
use crate::types::{ActionItem, AlertLevel, Status};
use crate::weeks::{iso_week, IsoWeek};
use chrono::NaiveDate;
use serde::Serialize;

/// Derive the lifecycle status from the planned and actual dates
///
/// `actual_start` is accepted for symmetry with the record shape but does not
/// influence the result: only the actual end and the planned window matter.
pub fn derive_status(
    reference: NaiveDate,
    planned_start: Option<NaiveDate>,
    planned_end: Option<NaiveDate>,
    _actual_start: Option<NaiveDate>,
    actual_end: Option<NaiveDate>,
) -> Status {
    let Some(planned_start) = planned_start else {
        return Status::Undetermined;
    };

    let end = match planned_end {
        None if planned_start < reference => return Status::Late,
        None => return Status::Scheduled,
        Some(end) if end > reference && planned_start >= reference => return Status::Scheduled,
        Some(end) => end,
    };

    if actual_end.is_some() {
        Status::Completed
    } else if end < reference {
        Status::Late
    } else {
        Status::InProgress
    }
}

/// Derive the alert level for an already-derived status
///
/// Late items always alert. Other unfinished items alert when their planned
/// end is at most `threshold_days` away (or already past). Without a planned
/// end there is nothing to count down to, so no alert.
pub fn derive_alert(
    status: Status,
    planned_end: Option<NaiveDate>,
    reference: NaiveDate,
    threshold_days: i64,
) -> AlertLevel {
    if status == Status::Late {
        return AlertLevel::Late;
    }
    if status == Status::Completed {
        return AlertLevel::None;
    }
    match planned_end {
        Some(end) if days_between(reference, end) <= threshold_days => AlertLevel::DueSoon,
        _ => AlertLevel::None,
    }
}

/// Status an item should carry as of `reference`
///
/// A manual override wins outright; otherwise the status is derived.
pub fn resolve_status(item: &ActionItem, reference: NaiveDate) -> Status {
    if let Some(status) = item.manual_status_override {
        return status;
    }
    derive_status(
        reference,
        item.planned_start,
        item.planned_end,
        item.actual_start,
        item.actual_end,
    )
}

/// Everything derived for a single item on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub status: Status,
    pub alert: AlertLevel,
    /// ISO week of the planned start, if there is one
    pub planned_week: Option<IsoWeek>,
}

/// Stateless engine bundling the derivation rules with their configuration
#[derive(Debug, Clone, Default)]
pub struct StatusEngine {
    config: EngineConfig,
}

impl StatusEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the given configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status_of(&self, item: &ActionItem, reference: NaiveDate) -> Status {
        resolve_status(item, reference)
    }

    pub fn alert_of(&self, item: &ActionItem, reference: NaiveDate) -> AlertLevel {
        derive_alert(
            self.status_of(item, reference),
            item.planned_end,
            reference,
            self.config.due_soon_days,
        )
    }

    /// Derive status, alert and week bucket in one pass
    pub fn assess(&self, item: &ActionItem, reference: NaiveDate) -> Assessment {
        let status = self.status_of(item, reference);
        Assessment {
            status,
            alert: derive_alert(status, item.planned_end, reference, self.config.due_soon_days),
            planned_week: item.planned_start.map(iso_week),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn reference() -> NaiveDate {
        d(2024, 2, 1)
    }

    #[test]
    fn test_missing_planned_start_is_undetermined() {
        let status = derive_status(reference(), None, Some(d(2024, 1, 1)), None, Some(d(2024, 1, 2)));
        assert_eq!(status, Status::Undetermined);
    }

    #[test]
    fn test_open_ended_past_start_is_late() {
        let status = derive_status(reference(), Some(d(2024, 1, 1)), None, None, None);
        assert_eq!(status, Status::Late);
    }

    #[test]
    fn test_open_ended_future_start_is_scheduled() {
        let status = derive_status(reference(), Some(d(2024, 3, 1)), None, None, None);
        assert_eq!(status, Status::Scheduled);
    }

    #[test]
    fn test_open_ended_start_today_is_scheduled() {
        let status = derive_status(reference(), Some(reference()), None, None, None);
        assert_eq!(status, Status::Scheduled);
    }

    #[test]
    fn test_finished_after_plan_is_completed() {
        let status = derive_status(
            reference(),
            Some(d(2024, 1, 1)),
            Some(d(2024, 1, 15)),
            None,
            Some(d(2024, 1, 20)),
        );
        assert_eq!(status, Status::Completed);
    }

    #[test]
    fn test_past_planned_end_without_finish_is_late() {
        let status = derive_status(reference(), Some(d(2024, 1, 1)), Some(d(2024, 1, 15)), None, None);
        assert_eq!(status, Status::Late);
    }

    #[test]
    fn test_open_window_is_in_progress() {
        let status = derive_status(
            reference(),
            Some(d(2024, 1, 1)),
            Some(d(2024, 6, 1)),
            Some(d(2024, 1, 5)),
            None,
        );
        assert_eq!(status, Status::InProgress);
    }

    #[test]
    fn test_future_window_with_actual_start_is_still_scheduled() {
        let status = derive_status(
            reference(),
            Some(d(2024, 3, 1)),
            Some(d(2024, 4, 1)),
            Some(d(2024, 1, 25)),
            None,
        );
        assert_eq!(status, Status::Scheduled);
    }

    #[test]
    fn test_planned_end_today_without_finish_is_in_progress() {
        let status = derive_status(reference(), Some(d(2024, 1, 1)), Some(reference()), None, None);
        assert_eq!(status, Status::InProgress);
    }

    #[test]
    fn test_actual_start_does_not_affect_lateness() {
        let without = derive_status(reference(), Some(d(2024, 1, 1)), Some(d(2024, 1, 15)), None, None);
        let with = derive_status(
            reference(),
            Some(d(2024, 1, 1)),
            Some(d(2024, 1, 15)),
            Some(d(2024, 1, 2)),
            None,
        );
        assert_eq!(without, with);
    }

    #[test]
    fn test_same_item_changes_status_as_days_pass() {
        let item = ActionItem::new("Backlog").with_planned(Some(d(2024, 3, 1)), None);
        assert_eq!(resolve_status(&item, d(2024, 2, 1)), Status::Scheduled);
        assert_eq!(resolve_status(&item, d(2024, 3, 2)), Status::Late);
    }

    #[test]
    fn test_rescheduled_dates_are_ignored() {
        let base = ActionItem::new("Backlog").with_planned(Some(d(2024, 1, 1)), Some(d(2024, 1, 15)));
        let rescheduled = base
            .clone()
            .with_rescheduled(Some(d(2024, 2, 10)), Some(d(2024, 3, 10)));
        assert_eq!(resolve_status(&base, reference()), resolve_status(&rescheduled, reference()));
    }

    #[test]
    fn test_manual_override_wins() {
        let item = ActionItem::new("Backlog")
            .with_planned(Some(d(2024, 1, 1)), Some(d(2024, 1, 15)))
            .with_override(Status::Completed);
        assert_eq!(resolve_status(&item, reference()), Status::Completed);

        let unplanned = ActionItem::new("Backlog").with_override(Status::InProgress);
        assert_eq!(resolve_status(&unplanned, reference()), Status::InProgress);
    }

    #[test]
    fn test_alert_due_soon() {
        let alert = derive_alert(Status::Scheduled, Some(d(2024, 2, 3)), reference(), 3);
        assert_eq!(alert, AlertLevel::DueSoon);
    }

    #[test]
    fn test_alert_boundaries() {
        assert_eq!(derive_alert(Status::InProgress, Some(d(2024, 2, 4)), reference(), 3), AlertLevel::DueSoon);
        assert_eq!(derive_alert(Status::InProgress, Some(d(2024, 2, 5)), reference(), 3), AlertLevel::None);
        assert_eq!(derive_alert(Status::InProgress, Some(reference()), reference(), 3), AlertLevel::DueSoon);
    }

    #[test]
    fn test_alert_late_and_completed() {
        assert_eq!(derive_alert(Status::Late, None, reference(), 3), AlertLevel::Late);
        assert_eq!(derive_alert(Status::Late, Some(d(2024, 1, 15)), reference(), 3), AlertLevel::Late);
        assert_eq!(derive_alert(Status::Completed, Some(d(2024, 2, 2)), reference(), 3), AlertLevel::None);
    }

    #[test]
    fn test_alert_without_planned_end_is_none() {
        assert_eq!(derive_alert(Status::Scheduled, None, reference(), 3), AlertLevel::None);
        assert_eq!(derive_alert(Status::Undetermined, None, reference(), 3), AlertLevel::None);
    }

    #[test]
    fn test_engine_assess_uses_configured_threshold() {
        let item = ActionItem::new("Backlog").with_planned(Some(d(2024, 2, 5)), Some(d(2024, 2, 8)));
        let default_engine = StatusEngine::new();
        let wide_engine = StatusEngine::with_config(EngineConfig::new().with_due_soon_days(10));

        let narrow = default_engine.assess(&item, reference());
        assert_eq!(narrow.status, Status::Scheduled);
        assert_eq!(narrow.alert, AlertLevel::None);
        assert_eq!(narrow.planned_week, Some(IsoWeek { year: 2024, week: 6 }));

        assert_eq!(wide_engine.assess(&item, reference()).alert, AlertLevel::DueSoon);
    }
}
