//! Engine configuration types
//!
//! This module defines the few knobs the engine needs. Everything here has a
//! sensible default, so an empty `[engine]` table (or none at all) is valid.

use serde::{Deserialize, Serialize};

/// Configuration for the status and reporting engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Items due within this many days raise a due-soon alert (default: 3)
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,

    /// How many late items the overdue list shows (default: 5)
    #[serde(default = "default_overdue_limit")]
    pub overdue_limit: usize,
}

fn default_due_soon_days() -> i64 {
    3
}

fn default_overdue_limit() -> usize {
    5
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            due_soon_days: default_due_soon_days(),
            overdue_limit: default_overdue_limit(),
        }
    }
}

impl EngineConfig {
    /// Create a new engine configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the due-soon threshold in days
    pub fn with_due_soon_days(mut self, days: i64) -> Self {
        self.due_soon_days = days;
        self
    }

    /// Builder method: set the length of the overdue list
    pub fn with_overdue_limit(mut self, limit: usize) -> Self {
        self.overdue_limit = limit;
        self
    }
}
