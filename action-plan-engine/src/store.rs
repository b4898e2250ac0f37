//! Record store
//!
//! Owns the collection of action items and is the only thing that writes to
//! it. Statuses are recomputed at the three points where they can change:
//! when an item is created, when it is edited, and when the whole set is
//! reloaded for display.

use crate::status::resolve_status;
use crate::types::{ActionItem, EngineError, ItemId, Result, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Persisted collection of action items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordStore {
    #[serde(default = "first_id")]
    next_id: ItemId,
    #[serde(default)]
    items: Vec<ActionItem>,
}

fn first_id() -> ItemId {
    1
}

/// Field changes applied by [`RecordStore::update`]
///
/// `None` leaves a field untouched. For the optional fields `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default)]
pub struct ItemEdit {
    pub area: Option<String>,
    pub location: Option<String>,
    pub action: Option<String>,
    pub impact: Option<String>,
    pub responsible: Option<String>,
    pub notes: Option<String>,
    pub planned_start: Option<Option<NaiveDate>>,
    pub planned_end: Option<Option<NaiveDate>>,
    pub actual_start: Option<Option<NaiveDate>>,
    pub actual_end: Option<Option<NaiveDate>>,
    pub rescheduled_start: Option<Option<NaiveDate>>,
    pub rescheduled_end: Option<Option<NaiveDate>>,
    pub manual_status_override: Option<Option<Status>>,
}

impl ItemEdit {
    fn apply(self, item: &mut ActionItem) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut item.area, self.area);
        set(&mut item.location, self.location);
        set(&mut item.action, self.action);
        set(&mut item.impact, self.impact);
        set(&mut item.responsible, self.responsible);
        set(&mut item.notes, self.notes);
        set(&mut item.planned_start, self.planned_start);
        set(&mut item.planned_end, self.planned_end);
        set(&mut item.actual_start, self.actual_start);
        set(&mut item.actual_end, self.actual_end);
        set(&mut item.rescheduled_start, self.rescheduled_start);
        set(&mut item.rescheduled_end, self.rescheduled_end);
        set(&mut item.manual_status_override, self.manual_status_override);
    }
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            next_id: first_id(),
            items: Vec::new(),
        }
    }

    /// Load a store from a JSON file
    ///
    /// A missing file is an empty store, so the first `save` creates it.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("Record store {:?} not found, starting empty", path);
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let mut store: RecordStore = serde_json::from_str(&content)?;

        // Keep ids unique even if the file was edited by hand
        let max_id = store.items.iter().map(|item| item.id).max().unwrap_or(0);
        store.next_id = store.next_id.max(max_id + 1);

        log::info!("Loaded {} records from {:?}", store.items.len(), path);
        Ok(store)
    }

    /// Write the store to a JSON file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        log::debug!("Saved {} records to {:?}", self.items.len(), path);
        Ok(())
    }

    /// Register a new item, assigning its id and initial status
    pub fn insert(&mut self, mut item: ActionItem, reference: NaiveDate) -> ItemId {
        item.id = self.next_id;
        self.next_id += 1;
        item.status = resolve_status(&item, reference);
        log::debug!("Registered item #{} as {}", item.id, item.status);

        let id = item.id;
        self.items.push(item);
        id
    }

    /// Apply an edit and recompute the item's status
    pub fn update(&mut self, id: ItemId, edit: ItemEdit, reference: NaiveDate) -> Result<&ActionItem> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(EngineError::RecordNotFound(id))?;

        edit.apply(item);
        item.status = resolve_status(item, reference);
        log::debug!("Updated item #{}, status now {}", id, item.status);
        Ok(&*item)
    }

    /// Delete an item, returning it
    pub fn remove(&mut self, id: ItemId) -> Result<ActionItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(EngineError::RecordNotFound(id))?;
        Ok(self.items.remove(index))
    }

    /// Recompute every status against `reference`
    ///
    /// Returns how many items changed status.
    pub fn refresh(&mut self, reference: NaiveDate) -> usize {
        let mut changed = 0;
        for item in &mut self.items {
            let status = resolve_status(item, reference);
            if status != item.status {
                log::debug!("Item #{}: {} -> {}", item.id, item.status, status);
                item.status = status;
                changed += 1;
            }
        }
        log::debug!("Refreshed {} items as of {}, {} changed", self.items.len(), reference, changed);
        changed
    }

    pub fn get(&self, id: ItemId) -> Option<&ActionItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[ActionItem] {
        &self.items
    }

    /// Items belonging to `area` (exact match)
    pub fn filter_area(&self, area: &str) -> Vec<&ActionItem> {
        self.items.iter().filter(|item| item.area == area).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
