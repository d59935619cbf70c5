//! # Grid Geometry & Drag Engine
//!
//! The timetable is drawn as a grid: one column per weekday, one row per
//! period, with a period-label column on the left and a day header on top.
//!
//! Drags are handled in two phases:
//!
//! - **While dragging** the block's visual offset is snapped to whole cells
//!   and clamped so the block stays inside the grid's drawable area.
//! - **On drop** the pixel delta is floored to whole days and periods and
//!   applied to the slot. A move that would leave the grid is rejected and
//!   the slot keeps its place.
//!
//! Pointer input comes from a [`PointerGestureSource`]; the engine never
//! touches the rendering layer directly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::DragError,
    models::schedule::{Day, ScheduleSlot, SlotKey},
    store::ScheduleStore,
};

pub const CELL_WIDTH: f64 = 80.0;
pub const CELL_HEIGHT: f64 = 30.0;
/// Width of the period-label column left of the first day.
pub const GRID_ORIGIN_X: f64 = 120.0;
/// Height of the day header above the first period.
pub const GRID_ORIGIN_Y: f64 = 40.0;
pub const MAX_PERIOD: u32 = 24;
/// Pointer travel needed before a press turns into a drag.
pub const ACTIVATION_DISTANCE: f64 = 8.0;

/// A pixel offset, used both for drag deltas and visual transforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelDelta {
    pub dx: f64,
    pub dy: f64,
}

impl PixelDelta {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn distance(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

/// An axis-aligned bounding box in page pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Whole-cell movement derived from a pixel delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDelta {
    pub days: i64,
    pub periods: i64,
}

/// Where a slot ends up after a successful drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub day: Day,
    pub range: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub cell_width: f64,
    pub cell_height: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub max_period: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            origin_x: GRID_ORIGIN_X,
            origin_y: GRID_ORIGIN_Y,
            max_period: MAX_PERIOD,
        }
    }
}

impl GridGeometry {
    /// Snaps an in-flight drag transform to the cell grid and keeps the
    /// dragged block inside the container's drawable area.
    ///
    /// Missing rects are treated as zero-sized at the origin.
    pub fn snap_transform(
        &self,
        transform: PixelDelta,
        container: Option<Rect>,
        dragging: Option<Rect>,
    ) -> PixelDelta {
        let container = container.unwrap_or_default();
        let dragging = dragging.unwrap_or_default();

        let min_x = container.left - dragging.left + self.origin_x + 1.0;
        let min_y = container.top - dragging.top + self.origin_y + 1.0;
        let max_x = container.right - dragging.right;
        let max_y = container.bottom - dragging.bottom;

        PixelDelta {
            dx: clamp(round_half_up(transform.dx / self.cell_width) * self.cell_width, min_x, max_x),
            dy: clamp(round_half_up(transform.dy / self.cell_height) * self.cell_height, min_y, max_y),
        }
    }

    pub fn cell_delta(&self, delta: PixelDelta) -> CellDelta {
        CellDelta {
            days: (delta.dx / self.cell_width).floor() as i64,
            periods: (delta.dy / self.cell_height).floor() as i64,
        }
    }

    /// Computes where `slot` lands when dropped after moving by `delta`.
    pub fn plan_move(&self, slot: &ScheduleSlot, delta: PixelDelta) -> Result<Placement, DragError> {
        let cells = self.cell_delta(delta);

        let day_index = (slot.day.index() as i64).saturating_add(cells.days);
        let day = Day::from_index(day_index).ok_or(DragError::DayOutOfBounds(day_index))?;

        let range = slot
            .range
            .iter()
            .map(|&period| {
                let moved = i64::from(period).saturating_add(cells.periods);
                if moved < 1 || moved > i64::from(self.max_period) {
                    Err(DragError::PeriodOutOfBounds(moved))
                } else {
                    Ok(moved as u32)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Placement { day, range })
    }

    /// Applies a drop to the slot identified by `key`. The store is left
    /// untouched when the move is rejected.
    pub fn commit_drop(
        &self,
        store: &mut ScheduleStore,
        key: &SlotKey,
        delta: PixelDelta,
    ) -> Result<Placement, DragError> {
        let slot = store
            .slot_mut(&key.table_id, key.index)
            .ok_or_else(|| DragError::StaleIndex {
                table_id: key.table_id.clone(),
                index: key.index,
            })?;

        let placement = self.plan_move(slot, delta)?;
        debug!(
            "Moving slot {} from {} {:?} to {} {:?}",
            key, slot.day, slot.range, placement.day, placement.range
        );

        slot.day = placement.day;
        slot.range = placement.range.clone();
        Ok(placement)
    }

    /// Pixel rectangle of a placed block, relative to the grid container.
    pub fn block_rect(&self, slot: &ScheduleSlot) -> Rect {
        let first = slot.range.first().copied().unwrap_or(1);
        let rows = slot.range.len().max(1) as f64;

        Rect::new(
            self.origin_x + self.cell_width * slot.day.index() as f64 + 1.0,
            self.origin_y + self.cell_height * f64::from(first.saturating_sub(1)) + 1.0,
            self.cell_width - 1.0,
            self.cell_height * rows - 1.0,
        )
    }
}

// Halves round toward positive infinity, as pointer libraries do.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

// The upper bound wins when the bounds cross.
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Pointer input as seen by the drag engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Start {
        key: SlotKey,
    },
    Move {
        delta: PixelDelta,
        container: Option<Rect>,
        dragging: Option<Rect>,
    },
    End {
        delta: PixelDelta,
    },
    Cancel,
}

/// Supplies pointer gestures, one event at a time.
pub trait PointerGestureSource {
    fn next_event(&mut self) -> Option<PointerEvent>;
}

impl<I> PointerGestureSource for I
where
    I: Iterator<Item = PointerEvent>,
{
    fn next_event(&mut self) -> Option<PointerEvent> {
        self.next()
    }
}

/// What the renderer should do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum DragUpdate {
    /// Nothing to redraw.
    Idle,
    Dragging { key: SlotKey, transform: PixelDelta },
    Dropped { key: SlotKey, placement: Placement },
    Rejected { key: SlotKey, reason: DragError },
    Cancelled { key: SlotKey },
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    key: SlotKey,
    activated: bool,
}

/// Turns a stream of pointer events into store mutations.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    geometry: GridGeometry,
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            active: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.as_ref().is_some_and(|drag| drag.activated)
    }

    pub fn handle(&mut self, event: PointerEvent, store: &mut ScheduleStore) -> DragUpdate {
        match event {
            PointerEvent::Start { key } => {
                self.active = Some(ActiveDrag {
                    key,
                    activated: false,
                });
                DragUpdate::Idle
            }
            PointerEvent::Move {
                delta,
                container,
                dragging,
            } => {
                let Some(drag) = self.active.as_mut() else {
                    return DragUpdate::Idle;
                };
                if !drag.activated && delta.distance() < ACTIVATION_DISTANCE {
                    return DragUpdate::Idle;
                }
                drag.activated = true;

                DragUpdate::Dragging {
                    key: drag.key.clone(),
                    transform: self.geometry.snap_transform(delta, container, dragging),
                }
            }
            PointerEvent::End { delta } => {
                let Some(drag) = self.active.take() else {
                    return DragUpdate::Idle;
                };
                if !drag.activated && delta.distance() < ACTIVATION_DISTANCE {
                    return DragUpdate::Idle;
                }

                match self.geometry.commit_drop(store, &drag.key, delta) {
                    Ok(placement) => DragUpdate::Dropped {
                        key: drag.key,
                        placement,
                    },
                    Err(reason) => {
                        debug!("Ignoring drop of {}: {}", drag.key, reason);
                        DragUpdate::Rejected {
                            key: drag.key,
                            reason,
                        }
                    }
                }
            }
            PointerEvent::Cancel => match self.active.take() {
                Some(drag) => DragUpdate::Cancelled { key: drag.key },
                None => DragUpdate::Idle,
            },
        }
    }

    /// Drains `source`, returning the update produced by each event.
    pub fn run<S: PointerGestureSource>(
        &mut self,
        source: &mut S,
        store: &mut ScheduleStore,
    ) -> Vec<DragUpdate> {
        let mut updates = Vec::new();
        while let Some(event) = source.next_event() {
            updates.push(self.handle(event, store));
        }
        updates
    }
}
