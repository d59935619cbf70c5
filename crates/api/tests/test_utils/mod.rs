use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use axum_test::TestServer;
use coursegrid_api::{ApiState, router};
use coursegrid_catalog::{CatalogKind, InMemorySessionCache, mock::MockCatalogSource};
use coursegrid_core::{models::lecture::Lecture, store::ScheduleStore};

pub const PAGE_SIZE: usize = 20;

fn lecture(id: &str, title: &str, grade: u8, credits: &str, major: &str, schedule: &str) -> Lecture {
    Lecture {
        id: id.to_string(),
        title: title.to_string(),
        grade,
        credits: credits.to_string(),
        major: major.to_string(),
        schedule: schedule.to_string(),
    }
}

pub fn majors() -> Vec<Lecture> {
    vec![
        lecture("CS101", "Intro to Programming", 1, "3", "Computer Science", "월1~2(C-103)<p>수1~2(C-103)"),
        lecture("CS201", "Data Structures", 2, "3", "Computer Science", "화3~4(C-201)"),
        lecture("MA110", "Calculus I", 1, "4", "Mathematics", "목5~7"),
    ]
}

pub fn liberal_arts() -> Vec<Lecture> {
    vec![
        lecture("GE130", "Academic Writing", 1, "2", "General Education", ""),
        lecture("GE140", "Philosophy", 2, "3", "General Education", "금1~2"),
    ]
}

pub struct TestContext {
    pub source: MockCatalogSource,
    pub cache: Arc<InMemorySessionCache>,
    /// While false every catalog fetch fails
    pub online: Arc<AtomicBool>,
    pub store: ScheduleStore,
}

impl TestContext {
    pub fn new() -> Self {
        let online = Arc::new(AtomicBool::new(true));
        let mut source = MockCatalogSource::new();
        let flag = Arc::clone(&online);
        source.expect_fetch().returning(move |kind| {
            if !flag.load(Ordering::SeqCst) {
                return Err(eyre::eyre!("catalog host unreachable"));
            }
            Ok(match kind {
                CatalogKind::Majors => majors(),
                CatalogKind::LiberalArts => liberal_arts(),
            })
        });

        Self {
            source,
            cache: Arc::new(InMemorySessionCache::new()),
            online,
            store: ScheduleStore::with_default_table(),
        }
    }

    pub fn offline(self) -> Self {
        self.online.store(false, Ordering::SeqCst);
        self
    }

    /// Builds the state and makes the same single catalog load attempt the
    /// server makes at startup.
    pub async fn build_state(self) -> Arc<ApiState> {
        let state = Arc::new(
            ApiState::new(self.store, Arc::new(self.source), self.cache, PAGE_SIZE).unwrap(),
        );
        let _ = state.reload_catalog().await;
        state
    }

    pub async fn server(self) -> TestServer {
        TestServer::new(router(self.build_state().await)).unwrap()
    }
}
