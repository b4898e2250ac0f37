//! Status distribution and headline figures
//!
//! Works on items whose `status` has already been refreshed by the record
//! store; nothing here re-derives statuses.

use crate::types::{ActionItem, Status};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of items per status, leaving out `Undetermined`
pub fn status_counts(items: &[ActionItem]) -> BTreeMap<Status, usize> {
    let mut counts = BTreeMap::new();
    for item in items.iter().filter(|item| item.status != Status::Undetermined) {
        *counts.entry(item.status).or_insert(0) += 1;
    }
    counts
}

/// Number of items per area and status
pub fn area_status_counts(items: &[ActionItem]) -> BTreeMap<String, BTreeMap<Status, usize>> {
    let mut counts: BTreeMap<String, BTreeMap<Status, usize>> = BTreeMap::new();
    for item in items {
        *counts
            .entry(item.area.clone())
            .or_default()
            .entry(item.status)
            .or_insert(0) += 1;
    }
    counts
}

/// Headline percentages over a set of items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub completed_pct: f64,
    pub late_pct: f64,
    pub with_impact_pct: f64,
    pub without_impact_pct: f64,
}

impl Summary {
    pub fn from_items(items: &[ActionItem]) -> Self {
        let total = items.len();
        let completed = items.iter().filter(|item| item.status == Status::Completed).count();
        let late = items.iter().filter(|item| item.status == Status::Late).count();
        let with_impact = items.iter().filter(|item| item.has_impact()).count();

        Self {
            total,
            completed_pct: percentage(completed, total),
            late_pct: percentage(late, total),
            with_impact_pct: percentage(with_impact, total),
            without_impact_pct: percentage(total - with_impact, total),
        }
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Late items, most overdue first (earliest planned end), at most `limit`
///
/// Late items without a planned end sort last.
pub fn most_overdue(items: &[ActionItem], limit: usize) -> Vec<&ActionItem> {
    let mut late: Vec<&ActionItem> = items
        .iter()
        .filter(|item| item.status == Status::Late)
        .collect();
    late.sort_by_key(|item| (item.planned_end.is_none(), item.planned_end, item.id));
    late.truncate(limit);
    late
}
