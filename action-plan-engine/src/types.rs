//! Core types for the action plan engine
//!
//! This module defines the record shape the engine reads and the closed
//! enumerations it produces. The engine itself is stateless - it only derives
//! values from these records and never owns the collection they live in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Identifier assigned to an action item by the record store
pub type ItemId = u64;

/// Errors that can occur while loading, editing or labelling records
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Record not found: #{0}")]
    RecordNotFound(ItemId),

    #[error("Unknown status label: {0:?}")]
    UnknownStatusLabel(String),

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Failed to parse record store: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lifecycle status of an action item
///
/// The variants are ordered by reporting priority so that grouped output
/// (tables, distributions) comes out in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Planned window has passed without completion
    Late,
    /// Planned window is still ahead of the reference date
    Scheduled,
    /// An actual end date has been recorded
    Completed,
    /// Work is within its planned window
    InProgress,
    /// No planned start, so the item cannot be classified
    Undetermined,
}

impl Status {
    /// All statuses in reporting order
    pub const ALL: [Status; 5] = [
        Status::Late,
        Status::Scheduled,
        Status::Completed,
        Status::InProgress,
        Status::Undetermined,
    ];

    /// Canonical, locale-independent name
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Late => "late",
            Status::Scheduled => "scheduled",
            Status::Completed => "completed",
            Status::InProgress => "in_progress",
            Status::Undetermined => "undetermined",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification level layered on top of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    None,
    DueSoon,
    Late,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::None => write!(f, "none"),
            AlertLevel::DueSoon => write!(f, "due_soon"),
            AlertLevel::Late => write!(f, "late"),
        }
    }
}

/// Selects one of the six date fields of an action item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    PlannedStart,
    PlannedEnd,
    ActualStart,
    ActualEnd,
    RescheduledStart,
    RescheduledEnd,
}

/// A registered action item
///
/// Date fields go through the lenient date parser when read from storage, so a
/// malformed value in the file shows up here as `None` rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    /// Store-assigned identifier
    pub id: ItemId,
    /// Work area (e.g. "Transporte", "Ventilação")
    #[serde(default)]
    pub area: String,
    /// Physical location of the work
    #[serde(default)]
    pub location: String,
    /// What is to be done
    #[serde(default)]
    pub action: String,
    /// Free-text description of the impact, blank when there is none
    #[serde(default)]
    pub impact: String,
    /// Responsible party
    #[serde(default)]
    pub responsible: String,
    /// Free-text observations
    #[serde(default)]
    pub notes: String,

    #[serde(default, with = "crate::dates::lenient")]
    pub planned_start: Option<NaiveDate>,
    #[serde(default, with = "crate::dates::lenient")]
    pub planned_end: Option<NaiveDate>,
    #[serde(default, with = "crate::dates::lenient")]
    pub actual_start: Option<NaiveDate>,
    #[serde(default, with = "crate::dates::lenient")]
    pub actual_end: Option<NaiveDate>,
    #[serde(default, with = "crate::dates::lenient")]
    pub rescheduled_start: Option<NaiveDate>,
    #[serde(default, with = "crate::dates::lenient")]
    pub rescheduled_end: Option<NaiveDate>,

    /// Derived status as of the last recomputation
    #[serde(default = "default_status")]
    pub status: Status,
    /// When set, replaces the derived status entirely
    #[serde(default)]
    pub manual_status_override: Option<Status>,
}

fn default_status() -> Status {
    Status::Undetermined
}

impl Default for Status {
    fn default() -> Self {
        default_status()
    }
}

impl ActionItem {
    /// Create an empty item for the given area
    pub fn new(area: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            ..Self::default()
        }
    }

    /// Read one of the date fields
    pub fn date(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::PlannedStart => self.planned_start,
            DateField::PlannedEnd => self.planned_end,
            DateField::ActualStart => self.actual_start,
            DateField::ActualEnd => self.actual_end,
            DateField::RescheduledStart => self.rescheduled_start,
            DateField::RescheduledEnd => self.rescheduled_end,
        }
    }

    /// Builder method: set the planned window
    pub fn with_planned(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.planned_start = start;
        self.planned_end = end;
        self
    }

    /// Builder method: set the actual window
    pub fn with_actual(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.actual_start = start;
        self.actual_end = end;
        self
    }

    /// Builder method: set the rescheduled window
    pub fn with_rescheduled(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.rescheduled_start = start;
        self.rescheduled_end = end;
        self
    }

    /// Builder method: set the impact description
    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = impact.into();
        self
    }

    /// Builder method: pin the status manually
    pub fn with_override(mut self, status: Status) -> Self {
        self.manual_status_override = Some(status);
        self
    }

    /// True if the impact text is non-blank
    pub fn has_impact(&self) -> bool {
        !self.impact.trim().is_empty()
    }
}
