use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, sync::Arc};

use crate::models::{lecture::Lecture, schedule::Day};

/// Filter criteria for a catalog search. Empty sets and `None` mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub query: String,
    pub grades: BTreeSet<u8>,
    pub days: BTreeSet<Day>,
    pub times: BTreeSet<u32>,
    pub majors: BTreeSet<String>,
    pub credits: Option<u32>,
}

impl SearchOptions {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_grades(&mut self, grades: impl IntoIterator<Item = u8>) {
        self.grades = grades.into_iter().collect();
    }

    pub fn set_days(&mut self, days: impl IntoIterator<Item = Day>) {
        self.days = days.into_iter().collect();
    }

    pub fn set_times(&mut self, times: impl IntoIterator<Item = u32>) {
        self.times = times.into_iter().collect();
    }

    pub fn set_majors<S: Into<String>>(&mut self, majors: impl IntoIterator<Item = S>) {
        self.majors = majors.into_iter().map(Into::into).collect();
    }

    pub fn set_credits(&mut self, credits: Option<u32>) {
        self.credits = credits;
    }
}

/// Tags a message to the filter worker so late replies can be recognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

/// One message to the filter worker. The catalog is an immutable snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default)]
    pub request_id: RequestId,
    pub lectures: Arc<[Lecture]>,
    pub search_options: SearchOptions,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResponse {
    pub request_id: RequestId,
    pub items: Vec<Lecture>,
    pub total: usize,
}

/// The grid cell (or whole table) a search dialog was opened from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInfo {
    pub table_id: String,
    pub day: Option<Day>,
    pub time: Option<u32>,
}

fn first_page() -> usize {
    1
}

/// Body of a search call. The page size falls back to the server default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub search_options: SearchOptions,
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(default)]
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorsResponse {
    pub majors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogReloadResponse {
    pub lectures: usize,
}
