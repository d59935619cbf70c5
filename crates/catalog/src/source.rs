use async_trait::async_trait;
use coursegrid_core::models::lecture::Lecture;
use eyre::{Result, WrapErr};
use std::{path::PathBuf, sync::Arc};
use tracing::debug;

/// The two static resources a catalog is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Majors,
    LiberalArts,
}

impl CatalogKind {
    pub fn resource(self) -> &'static str {
        match self {
            CatalogKind::Majors => "schedules-majors.json",
            CatalogKind::LiberalArts => "schedules-liberal-arts.json",
        }
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, kind: CatalogKind) -> Result<Vec<Lecture>>;
}

/// Fetches catalog resources relative to a base URL.
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, kind: CatalogKind) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), kind.resource())
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self, kind: CatalogKind) -> Result<Vec<Lecture>> {
        let url = self.url(kind);
        debug!("Fetching catalog resource {}", url);

        let lectures = self
            .client
            .get(&url)
            .send()
            .await
            .wrap_err_with(|| format!("Failed to request {}", url))?
            .error_for_status()
            .wrap_err_with(|| format!("Catalog request to {} failed", url))?
            .json::<Vec<Lecture>>()
            .await
            .wrap_err_with(|| format!("Invalid catalog JSON from {}", url))?;

        debug!("Fetched {} lectures from {}", lectures.len(), url);
        Ok(lectures)
    }
}

/// Reads catalog resources from a local directory.
pub struct FileCatalogSource {
    dir: PathBuf,
}

impl FileCatalogSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, kind: CatalogKind) -> PathBuf {
        self.dir.join(kind.resource())
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self, kind: CatalogKind) -> Result<Vec<Lecture>> {
        let path = self.path(kind);
        debug!("Reading catalog resource {}", path.display());

        let contents = tokio::fs::read_to_string(&path)
            .await
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let lectures: Vec<Lecture> = serde_json::from_str(&contents)
            .wrap_err_with(|| format!("Invalid catalog JSON in {}", path.display()))?;

        Ok(lectures)
    }
}

/// Picks the HTTP source for `http(s)://` locations and the file source otherwise.
pub fn source_for(location: &str) -> Arc<dyn CatalogSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(HttpCatalogSource::new(location))
    } else {
        Arc::new(FileCatalogSource::new(location))
    }
}
