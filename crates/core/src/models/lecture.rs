use serde::{Deserialize, Serialize};

/// One catalog entry. Loaded once per session and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    pub id: String,
    pub title: String,
    pub grade: u8,
    pub credits: String,
    pub major: String,
    #[serde(default)]
    pub schedule: String,
}
