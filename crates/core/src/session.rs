//! State behind an open search dialog: the current options, the pages
//! loaded so far, and the id of the last request sent to the filter worker.
//!
//! Changing any option starts over at page 1. Scrolling to the bottom loads
//! the next page, which is appended. Replies to anything but the most recent
//! request are dropped.

use std::sync::Arc;
use tracing::debug;

use crate::{
    errors::PlannerResult,
    models::{
        lecture::Lecture,
        schedule::Day,
        search::{FilterRequest, FilterResponse, RequestId, SearchInfo, SearchOptions},
    },
    worker::{FilterWorker, PendingFilter},
};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Reports when the "load more" sentinel at the end of a result list
/// scrolls into view.
pub trait VisibilityNotifier {
    /// Returns true once per time the sentinel became visible since the last call.
    fn take_visible(&mut self) -> bool;
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    info: SearchInfo,
    options: SearchOptions,
    page: usize,
    page_size: usize,
    items: Vec<Lecture>,
    total: usize,
    latest: Option<RequestId>,
    loading_more: bool,
}

impl SearchSession {
    /// Opens a search for `info`, pre-selecting the clicked cell's day and period.
    pub fn open(info: SearchInfo, page_size: usize) -> Self {
        let mut options = SearchOptions::default();
        options.set_days(info.day);
        options.set_times(info.time);

        Self {
            info,
            options,
            page: 1,
            page_size: page_size.max(1),
            items: Vec::new(),
            total: 0,
            latest: None,
            loading_more: false,
        }
    }

    pub fn info(&self) -> &SearchInfo {
        &self.info
    }

    pub fn table_id(&self) -> &str {
        &self.info.table_id
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn items(&self) -> &[Lecture] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn has_next_page(&self) -> bool {
        self.items.len() < self.total
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.options.set_query(query);
        self.restart();
    }

    pub fn set_grades(&mut self, grades: impl IntoIterator<Item = u8>) {
        self.options.set_grades(grades);
        self.restart();
    }

    pub fn set_days(&mut self, days: impl IntoIterator<Item = Day>) {
        self.options.set_days(days);
        self.restart();
    }

    pub fn set_times(&mut self, times: impl IntoIterator<Item = u32>) {
        self.options.set_times(times);
        self.restart();
    }

    pub fn set_majors<S: Into<String>>(&mut self, majors: impl IntoIterator<Item = S>) {
        self.options.set_majors(majors);
        self.restart();
    }

    pub fn set_credits(&mut self, credits: Option<u32>) {
        self.options.set_credits(credits);
        self.restart();
    }

    fn restart(&mut self) {
        self.page = 1;
        self.items.clear();
        // No further pages until the first reply for the new options arrives.
        self.total = 0;
        self.loading_more = false;
    }

    /// Advances to the next page unless one is already loading or the
    /// results are exhausted. Returns whether a new page should be requested.
    pub fn load_more(&mut self) -> bool {
        if self.loading_more || !self.has_next_page() {
            return false;
        }
        self.loading_more = true;
        self.page += 1;
        true
    }

    /// Calls [`load_more`](Self::load_more) if the sentinel has come into view.
    pub fn poll_scroll(&mut self, notifier: &mut impl VisibilityNotifier) -> bool {
        notifier.take_visible() && self.load_more()
    }

    /// Builds the message for the current page.
    pub fn request(&self, catalog: &Arc<[Lecture]>) -> FilterRequest {
        FilterRequest {
            request_id: RequestId::default(),
            lectures: Arc::clone(catalog),
            search_options: self.options.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Sends the current page's request and remembers its id as the latest.
    pub fn submit(
        &mut self,
        worker: &FilterWorker,
        catalog: &Arc<[Lecture]>,
    ) -> PlannerResult<PendingFilter> {
        let pending = worker.post(self.request(catalog))?;
        self.latest = Some(pending.request_id);
        Ok(pending)
    }

    /// Applies a reply from the worker. Returns false when the reply is stale.
    pub fn apply(&mut self, response: FilterResponse) -> bool {
        if self.latest != Some(response.request_id) {
            debug!(
                "Dropping stale filter response {:?} (latest is {:?})",
                response.request_id, self.latest
            );
            return false;
        }

        if self.page == 1 {
            self.items = response.items;
        } else {
            self.items.extend(response.items);
        }
        self.total = response.total;
        self.loading_more = false;
        true
    }
}
