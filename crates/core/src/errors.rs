use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Table already exists: {0}")]
    DuplicateId(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Cannot remove the last remaining table: {0}")]
    LastTable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Filter worker error: {0}")]
    Worker(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] eyre::Report),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type PlannerResult<T> = Result<T, PlannerError>;

/// A schedule segment the parser could not understand. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed schedule segment {segment:?}: {reason}")]
    MalformedSegment { segment: String, reason: String },
}

/// Reasons a drop leaves the slot where it was. Callers log and move on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DragError {
    #[error("Slot {index} of table {table_id} no longer exists")]
    StaleIndex { table_id: String, index: usize },

    #[error("Day index {0} is outside the grid")]
    DayOutOfBounds(i64),

    #[error("Period {0} is outside the grid")]
    PeriodOutOfBounds(i64),
}
