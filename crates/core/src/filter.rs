//! # Catalog Filtering
//!
//! A search runs a catalog through up to six conjunctive predicates, in this
//! order: query, grades, majors, credits, days, times. Empty predicates are
//! skipped. The schedule text is only parsed when a day or time predicate is
//! active, and at most once per lecture.
//!
//! The result keeps catalog order. `total` counts every match; `items` is the
//! requested page of those matches.

use indexmap::IndexSet;

use crate::{
    errors::{PlannerError, PlannerResult},
    models::{
        lecture::Lecture,
        schedule::ScheduleTime,
        search::SearchOptions,
    },
    parser::parse_schedule,
};

/// One page of a filtered catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPage {
    pub items: Vec<Lecture>,
    pub total: usize,
}

/// Filters `catalog` and returns page `page` (1-based) of `page_size` items.
///
/// # Errors
///
/// Returns `PlannerError::Validation` when `page` or `page_size` is zero.
pub fn filter_lectures(
    catalog: &[Lecture],
    options: &SearchOptions,
    page: usize,
    page_size: usize,
) -> PlannerResult<FilterPage> {
    if page == 0 {
        return Err(PlannerError::Validation("Page numbers start at 1".to_string()));
    }
    if page_size == 0 {
        return Err(PlannerError::Validation(
            "Page size must be greater than zero".to_string(),
        ));
    }

    let matcher = Matcher::new(options);
    let matched: Vec<&Lecture> = catalog.iter().filter(|l| matcher.matches(l)).collect();
    let total = matched.len();

    let start = (page - 1).saturating_mul(page_size);
    let items = matched
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    tracing::debug!(
        "Filtered {} lectures: total={}, page={}, page_size={}",
        catalog.len(),
        total,
        page,
        page_size
    );

    Ok(FilterPage { items, total })
}

/// Distinct majors in the order they first appear in the catalog.
pub fn all_majors(catalog: &[Lecture]) -> Vec<String> {
    catalog
        .iter()
        .map(|lecture| lecture.major.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

struct Matcher<'a> {
    options: &'a SearchOptions,
    query: Option<String>,
    credits: Option<String>,
}

impl<'a> Matcher<'a> {
    fn new(options: &'a SearchOptions) -> Self {
        let query = Some(options.query.to_lowercase()).filter(|q| !q.is_empty());
        // Zero credits means "no preference", as the credit selector sends it.
        let credits = options.credits.filter(|c| *c > 0).map(|c| c.to_string());

        Self {
            options,
            query,
            credits,
        }
    }

    fn matches(&self, lecture: &Lecture) -> bool {
        if let Some(query) = &self.query {
            if !lecture.title.to_lowercase().contains(query)
                && !lecture.id.to_lowercase().contains(query)
            {
                return false;
            }
        }

        if !self.options.grades.is_empty() && !self.options.grades.contains(&lecture.grade) {
            return false;
        }

        if !self.options.majors.is_empty() && !self.options.majors.contains(&lecture.major) {
            return false;
        }

        if let Some(credits) = &self.credits {
            if !lecture.credits.starts_with(credits.as_str()) {
                return false;
            }
        }

        if self.options.days.is_empty() && self.options.times.is_empty() {
            return true;
        }

        let times = parse_schedule(&lecture.schedule);
        self.matches_days(&times) && self.matches_times(&times)
    }

    fn matches_days(&self, times: &[ScheduleTime]) -> bool {
        self.options.days.is_empty() || times.iter().any(|t| self.options.days.contains(&t.day))
    }

    fn matches_times(&self, times: &[ScheduleTime]) -> bool {
        self.options.times.is_empty()
            || times
                .iter()
                .any(|t| t.range.iter().any(|period| self.options.times.contains(period)))
    }
}
