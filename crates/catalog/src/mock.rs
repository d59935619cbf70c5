use async_trait::async_trait;
use coursegrid_core::models::lecture::Lecture;
use mockall::mock;

use crate::source::{CatalogKind, CatalogSource};

// Mock catalog source for testing
mock! {
    pub CatalogSource {}

    #[async_trait]
    impl CatalogSource for CatalogSource {
        async fn fetch(&self, kind: CatalogKind) -> eyre::Result<Vec<Lecture>>;
    }
}
