//! # CourseGrid API
//!
//! The web server for the CourseGrid course planner. It exposes the
//! timetable store, the catalog search and the drag-and-drop commit as JSON
//! endpoints for a browser front end.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into store, worker and catalog calls
//! - **Middleware**: Error mapping
//! - **Config**: Environment configuration
//!
//! All state lives in memory for the lifetime of the process.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping for handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{path::Path, sync::Arc};

use axum::Router;
use coursegrid_catalog::{CatalogSource, SessionCache, load_catalog};
use coursegrid_core::{
    errors::{PlannerError, PlannerResult},
    grid::GridGeometry,
    models::{lecture::Lecture, schedule::ScheduleSlot},
    store::ScheduleStore,
    worker::FilterWorker,
};
use eyre::{Result, WrapErr};
use indexmap::IndexMap;
use tokio::{
    net::TcpListener,
    sync::{Mutex, RwLock},
};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// What the server currently knows about the lecture catalog.
#[derive(Debug, Clone)]
pub enum CatalogState {
    NotLoaded,
    Ready(Arc<[Lecture]>),
    /// The last load failed; holds the reason until a reload succeeds.
    Failed(String),
}

/// Shared application state that is accessible to all request handlers
///
/// The store is the single owner of every timetable. Handlers hold its lock
/// for one short critical section per request, so each mutation is atomic
/// from the client's point of view. The catalog is an immutable snapshot
/// that is swapped wholesale on reload.
///
/// # Example
///
/// ```rust,ignore
/// let state = Arc::new(ApiState::new(store, source, cache, 20)?);
/// state.reload_catalog().await.ok();
/// let app = coursegrid_api::router(state);
/// ```
pub struct ApiState {
    pub store: Mutex<ScheduleStore>,
    pub catalog: RwLock<CatalogState>,
    /// Where catalog reloads fetch from
    pub source: Arc<dyn CatalogSource>,
    pub cache: Arc<dyn SessionCache>,
    /// Handle to the filter thread; shared by every search
    pub worker: FilterWorker,
    pub grid: GridGeometry,
    /// Page size used when a search request does not name one
    pub page_size: usize,
}

impl ApiState {
    pub fn new(
        store: ScheduleStore,
        source: Arc<dyn CatalogSource>,
        cache: Arc<dyn SessionCache>,
        page_size: usize,
    ) -> PlannerResult<Self> {
        Ok(Self {
            store: Mutex::new(store),
            catalog: RwLock::new(CatalogState::NotLoaded),
            source,
            cache,
            worker: FilterWorker::spawn()?,
            grid: GridGeometry::default(),
            page_size,
        })
    }

    /// Loads the catalog and swaps it in. A failure is kept as the catalog
    /// state and reported as `CatalogUnavailable`.
    pub async fn reload_catalog(&self) -> PlannerResult<usize> {
        match load_catalog(self.source.as_ref(), self.cache.as_ref()).await {
            Ok(lectures) => {
                let count = lectures.len();
                *self.catalog.write().await = CatalogState::Ready(lectures);
                info!("Catalog ready with {} lectures", count);
                Ok(count)
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!("Catalog load failed: {}", reason);
                *self.catalog.write().await = CatalogState::Failed(reason.clone());
                Err(PlannerError::CatalogUnavailable(reason))
            }
        }
    }

    /// The current catalog snapshot.
    pub async fn lectures(&self) -> PlannerResult<Arc<[Lecture]>> {
        match &*self.catalog.read().await {
            CatalogState::Ready(lectures) => Ok(Arc::clone(lectures)),
            CatalogState::Failed(reason) => Err(PlannerError::CatalogUnavailable(reason.clone())),
            CatalogState::NotLoaded => Err(PlannerError::CatalogUnavailable(
                "catalog has not been loaded".to_string(),
            )),
        }
    }
}

/// Builds a store from a JSON object mapping table ids to slots. Key order
/// in the file is the display order.
pub async fn load_seed_tables(path: &Path) -> Result<ScheduleStore> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read seed tables from {}", path.display()))?;
    let tables: IndexMap<String, Vec<ScheduleSlot>> = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("Invalid seed tables in {}", path.display()))?;

    info!("Seeding {} tables from {}", tables.len(), path.display());
    ScheduleStore::seeded(tables)
        .wrap_err_with(|| format!("Invalid seed tables in {}", path.display()))
}

/// The application router with every route attached to `state`.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Timetable management endpoints
        .merge(routes::tables::routes())
        // Search, majors and catalog reload
        .merge(routes::search::routes())
        .with_state(state)
}

/// Starts the API server
///
/// Installs logging, seeds the store, makes one attempt to load the
/// catalog, and serves until the listener fails. A failed catalog load does
/// not stop the server; catalog routes answer 503 until a reload succeeds.
///
/// # Example
///
/// ```rust,ignore
/// let config = ApiConfig::from_env()?;
/// let source = coursegrid_catalog::source_for(&config.catalog_base_url);
/// start_server(config, source, Arc::new(InMemorySessionCache::new())).await?;
/// ```
pub async fn start_server(
    config: config::ApiConfig,
    source: Arc<dyn CatalogSource>,
    cache: Arc<dyn SessionCache>,
) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = match &config.seed_tables_path {
        Some(path) => load_seed_tables(path).await?,
        None => ScheduleStore::with_default_table(),
    };

    let state = Arc::new(ApiState::new(store, source, cache, config.search_page_size)?);
    // Failure is recorded in the catalog state
    let _ = state.reload_catalog().await;

    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse()
                    .wrap_err_with(|| format!("Invalid CORS origin {}", origin))
            })
            .collect::<Result<Vec<axum::http::HeaderValue>>>()?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Request tracing and timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .layer(tower_http::timeout::TimeoutLayer::new(
                std::time::Duration::from_secs(config.request_timeout),
            ))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
