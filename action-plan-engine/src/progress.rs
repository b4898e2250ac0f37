//! Cumulative progress aggregation
//!
//! Builds the step series behind the progress ("S") curve: for each day in a
//! range, how many items have the selected date on or before that day.

use crate::types::{ActionItem, DateField};
use chrono::NaiveDate;
use serde::Serialize;

/// Count, for each date, the items whose `field` is present and <= that date
///
/// The selected dates are sorted once and each query is a binary search, so
/// the result for an ascending range is non-decreasing by construction.
pub fn cumulative_counts(items: &[ActionItem], field: DateField, dates: &[NaiveDate]) -> Vec<usize> {
    let mut selected: Vec<NaiveDate> = items.iter().filter_map(|item| item.date(field)).collect();
    selected.sort_unstable();

    dates
        .iter()
        .map(|date| selected.partition_point(|d| d <= date))
        .collect()
}

/// Inclusive daily range; empty when `start` is after `end`
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Planned, actual and rescheduled completion curves over a shared range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressCurve {
    pub dates: Vec<NaiveDate>,
    /// Items whose planned end has been reached
    pub planned: Vec<usize>,
    /// Items actually finished
    pub actual: Vec<usize>,
    /// Items whose rescheduled end has been reached
    pub rescheduled: Vec<usize>,
    /// Planned count as of the reference date (the "today" line)
    pub planned_at_reference: usize,
}

impl ProgressCurve {
    /// Highest value across all three series
    pub fn peak(&self) -> usize {
        self.planned
            .iter()
            .chain(&self.actual)
            .chain(&self.rescheduled)
            .copied()
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Build the progress curve for a set of items
///
/// The range runs from the earliest planned start to the latest planned end.
/// Returns `None` when either bound is missing, since there is no range to
/// plot.
pub fn progress_curve(items: &[ActionItem], reference: NaiveDate) -> Option<ProgressCurve> {
    let start = items.iter().filter_map(|item| item.planned_start).min();
    let end = items.iter().filter_map(|item| item.planned_end).max();

    let (Some(start), Some(end)) = (start, end) else {
        log::warn!("Planned start or end dates unavailable; no progress curve");
        return None;
    };

    let dates = date_range(start, end);
    log::debug!("Progress curve over {} days ({} .. {})", dates.len(), start, end);

    let planned_at_reference = cumulative_counts(items, DateField::PlannedEnd, &[reference])
        .first()
        .copied()
        .unwrap_or(0);

    Some(ProgressCurve {
        planned: cumulative_counts(items, DateField::PlannedEnd, &dates),
        actual: cumulative_counts(items, DateField::ActualEnd, &dates),
        rescheduled: cumulative_counts(items, DateField::RescheduledEnd, &dates),
        dates,
        planned_at_reference,
    })
}
