use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};

use crate::models::lecture::Lecture;

/// The five weekday columns of the grid, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    #[serde(alias = "월")]
    Mon,
    #[serde(alias = "화")]
    Tue,
    #[serde(alias = "수")]
    Wed,
    #[serde(alias = "목")]
    Thu,
    #[serde(alias = "금")]
    Fri,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns `None` when `index` falls outside the five grid columns.
    pub fn from_index(index: i64) -> Option<Day> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Day::ALL.get(i).copied())
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDay(pub String);

impl fmt::Display for UnknownDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown day {:?}", self.0)
    }
}

impl std::error::Error for UnknownDay {}

impl FromStr for Day {
    type Err = UnknownDay;

    // Accepts the catalog's native labels as well as English names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "월" | "mon" | "monday" => Ok(Day::Mon),
            "화" | "tue" | "tuesday" => Ok(Day::Tue),
            "수" | "wed" | "wednesday" => Ok(Day::Wed),
            "목" | "thu" | "thursday" => Ok(Day::Thu),
            "금" | "fri" | "friday" => Ok(Day::Fri),
            _ => Err(UnknownDay(s.to_string())),
        }
    }
}

/// One contiguous meeting block as written in a lecture's schedule text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTime {
    pub day: Day,
    pub range: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl ScheduleTime {
    pub fn covers(&self, day: Day, period: u32) -> bool {
        self.day == day && self.range.contains(&period)
    }
}

/// A block placed on a timetable. The lecture is shared with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub day: Day,
    pub range: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    pub lecture: Arc<Lecture>,
}

impl ScheduleSlot {
    pub fn from_time(time: ScheduleTime, lecture: Arc<Lecture>) -> Self {
        Self {
            day: time.day,
            range: time.range,
            room: time.room,
            lecture,
        }
    }

    pub fn covers(&self, day: Day, period: u32) -> bool {
        self.day == day && self.range.contains(&period)
    }
}

/// Identifies the slot a drag started on: its table and position in that table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub table_id: String,
    pub index: usize,
}

impl SlotKey {
    pub fn new(table_id: impl Into<String>, index: usize) -> Self {
        Self {
            table_id: table_id.into(),
            index,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.table_id, self.index)
    }
}

impl FromStr for SlotKey {
    type Err = crate::errors::PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (table_id, index) = s.rsplit_once(':').ok_or_else(|| {
            crate::errors::PlannerError::Validation(format!("Invalid slot key: {}", s))
        })?;
        let index = index.parse().map_err(|_| {
            crate::errors::PlannerError::Validation(format!("Invalid slot index in key: {}", s))
        })?;

        Ok(Self::new(table_id, index))
    }
}
