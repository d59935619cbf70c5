//! # Schedule Store
//!
//! Keyed, ordered collection of timetables. The key set and the display
//! order live in one `IndexMap`, so they cannot drift apart. There is always
//! at least one table once the store has been seeded; `remove` refuses to
//! delete the last one.

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::{
    errors::{PlannerError, PlannerResult},
    grid::MAX_PERIOD,
    models::{
        lecture::Lecture,
        schedule::{Day, ScheduleSlot},
    },
    parser::parse_schedule,
};

pub const DEFAULT_TABLE_ID: &str = "schedule-1";

#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    tables: IndexMap<String, Vec<ScheduleSlot>>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding a single empty table.
    pub fn with_default_table() -> Self {
        let mut tables = IndexMap::new();
        tables.insert(DEFAULT_TABLE_ID.to_string(), Vec::new());
        Self { tables }
    }

    /// A store holding `tables` in iteration order. Falls back to the default
    /// table when `tables` is empty.
    pub fn seeded(
        tables: impl IntoIterator<Item = (String, Vec<ScheduleSlot>)>,
    ) -> PlannerResult<Self> {
        let tables: IndexMap<_, _> = tables.into_iter().collect();
        if tables.is_empty() {
            return Ok(Self::with_default_table());
        }
        for slots in tables.values() {
            validate_slots(slots)?;
        }
        Ok(Self { tables })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tables.contains_key(id)
    }

    /// Slots of table `id`; empty when the table does not exist.
    pub fn get(&self, id: &str) -> &[ScheduleSlot] {
        self.tables.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add(&mut self, id: impl Into<String>, slots: Vec<ScheduleSlot>) -> PlannerResult<()> {
        let id = id.into();
        if self.tables.contains_key(&id) {
            return Err(PlannerError::DuplicateId(id));
        }
        validate_slots(&slots)?;

        debug!("Adding table {} with {} slots", id, slots.len());
        self.tables.insert(id, slots);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> PlannerResult<Vec<ScheduleSlot>> {
        if !self.tables.contains_key(id) {
            return Err(PlannerError::NotFound(format!("Table {} not found", id)));
        }
        if self.tables.len() == 1 {
            return Err(PlannerError::LastTable(id.to_string()));
        }

        debug!("Removing table {}", id);
        self.tables
            .shift_remove(id)
            .ok_or_else(|| PlannerError::NotFound(format!("Table {} not found", id)))
    }

    pub fn update(&mut self, id: &str, slots: Vec<ScheduleSlot>) -> PlannerResult<()> {
        let table = self
            .tables
            .get_mut(id)
            .ok_or_else(|| PlannerError::NotFound(format!("Table {} not found", id)))?;
        validate_slots(&slots)?;

        debug!("Replacing table {} with {} slots", id, slots.len());
        *table = slots;
        Ok(())
    }

    /// Copies table `source_id` into a new table appended at the end.
    pub fn duplicate(&mut self, source_id: &str) -> PlannerResult<String> {
        let slots = self
            .tables
            .get(source_id)
            .cloned()
            .ok_or_else(|| PlannerError::NotFound(format!("Table {} not found", source_id)))?;

        let new_id = format!("schedule-{}", Uuid::new_v4());
        self.add(new_id.clone(), slots)?;
        Ok(new_id)
    }

    /// Places every meeting block of `lecture` on table `table_id`.
    /// Returns how many slots were added.
    pub fn add_lecture(&mut self, table_id: &str, lecture: Arc<Lecture>) -> PlannerResult<usize> {
        let table = self
            .tables
            .get_mut(table_id)
            .ok_or_else(|| PlannerError::NotFound(format!("Table {} not found", table_id)))?;

        let slots: Vec<ScheduleSlot> = parse_schedule(&lecture.schedule)
            .into_iter()
            .map(|time| ScheduleSlot::from_time(time, Arc::clone(&lecture)))
            .filter(|slot| match validate_slot(slot) {
                Ok(()) => true,
                Err(err) => {
                    debug!("Skipping block of lecture {}: {}", lecture.id, err);
                    false
                }
            })
            .collect();
        let added = slots.len();

        debug!("Adding lecture {} to table {}: {} slots", lecture.id, table_id, added);
        table.extend(slots);
        Ok(added)
    }

    /// Removes every slot of table `table_id` covering the (`day`, `period`) cell.
    /// Returns how many slots were removed.
    pub fn delete_cell(&mut self, table_id: &str, day: Day, period: u32) -> PlannerResult<usize> {
        let table = self
            .tables
            .get_mut(table_id)
            .ok_or_else(|| PlannerError::NotFound(format!("Table {} not found", table_id)))?;

        let before = table.len();
        table.retain(|slot| !slot.covers(day, period));
        let removed = before - table.len();

        debug!("Deleted {} slots at {} {} from table {}", removed, day, period, table_id);
        Ok(removed)
    }

    pub(crate) fn slot_mut(&mut self, table_id: &str, index: usize) -> Option<&mut ScheduleSlot> {
        self.tables.get_mut(table_id)?.get_mut(index)
    }
}

/// Checks that a slot covers at least one period and stays on the grid.
pub fn validate_slot(slot: &ScheduleSlot) -> PlannerResult<()> {
    if slot.range.is_empty() {
        return Err(PlannerError::Validation(format!(
            "Slot for {} on {} covers no periods",
            slot.lecture.id, slot.day
        )));
    }
    if let Some(period) = slot.range.iter().find(|p| !(1..=MAX_PERIOD).contains(*p)) {
        return Err(PlannerError::Validation(format!(
            "Slot for {} on {} has period {} outside 1..={}",
            slot.lecture.id, slot.day, period, MAX_PERIOD
        )));
    }
    Ok(())
}

pub fn validate_slots(slots: &[ScheduleSlot]) -> PlannerResult<()> {
    slots.iter().try_for_each(validate_slot)
}
