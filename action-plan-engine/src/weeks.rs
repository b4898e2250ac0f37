//! ISO week bucketing
//!
//! Items are bucketed by the ISO week of their planned start, which drives the
//! "last week / this week / next week" activity tables.

use crate::types::ActionItem;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ISO 8601 week; the year is the ISO week-numbering year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IsoWeek {
    pub year: i32,
    pub week: u32,
}

impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// ISO week containing `date`
pub fn iso_week(date: NaiveDate) -> IsoWeek {
    let week = date.iso_week();
    IsoWeek {
        year: week.year(),
        week: week.week(),
    }
}

/// A week relative to the reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekWindow {
    Previous,
    Current,
    Next,
}

impl WeekWindow {
    /// The ISO week this window covers when seen from `reference`
    ///
    /// Shifting by whole weeks keeps the year boundary right (the week before
    /// 2025-W01 is 2024-W52, not week 0).
    pub fn resolve(self, reference: NaiveDate) -> IsoWeek {
        let shifted = match self {
            WeekWindow::Previous => reference - Duration::weeks(1),
            WeekWindow::Current => reference,
            WeekWindow::Next => reference + Duration::weeks(1),
        };
        iso_week(shifted)
    }
}

/// Items whose planned start falls inside the given window
pub fn items_in_week<'a>(
    items: &'a [ActionItem],
    window: WeekWindow,
    reference: NaiveDate,
) -> Vec<&'a ActionItem> {
    let target = window.resolve(reference);
    log::debug!("Selecting items planned for {} ({:?})", target, window);
    items
        .iter()
        .filter(|item| item.planned_start.map(iso_week) == Some(target))
        .collect()
}
