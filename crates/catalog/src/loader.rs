//! # Catalog Loading
//!
//! A catalog is the major courses followed by the general-education
//! courses. Both resources are fetched concurrently. The concatenated
//! result is cached for the rest of the session, and a cache hit skips the
//! network entirely. A failed load is returned to the caller as is; nothing
//! here retries.

use coursegrid_core::models::lecture::Lecture;
use eyre::{Result, WrapErr};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    cache::SessionCache,
    source::{CatalogKind, CatalogSource},
};

pub const CATALOG_CACHE_KEY: &str = "lectures";

pub async fn load_catalog(
    source: &dyn CatalogSource,
    cache: &dyn SessionCache,
) -> Result<Arc<[Lecture]>> {
    if let Some(cached) = cache.get(CATALOG_CACHE_KEY) {
        match serde_json::from_str::<Vec<Lecture>>(&cached) {
            Ok(lectures) => {
                info!("Loaded {} lectures from the session cache", lectures.len());
                return Ok(lectures.into());
            }
            Err(e) => {
                warn!("Discarding unreadable cached catalog: {}", e);
                cache.remove(CATALOG_CACHE_KEY);
            }
        }
    }

    let (mut lectures, liberal_arts) = tokio::try_join!(
        source.fetch(CatalogKind::Majors),
        source.fetch(CatalogKind::LiberalArts),
    )?;
    lectures.extend(liberal_arts);

    let serialized = serde_json::to_string(&lectures).wrap_err("Failed to serialize catalog")?;
    cache.set(CATALOG_CACHE_KEY, serialized);

    info!("Loaded {} lectures from the catalog source", lectures.len());
    Ok(lectures.into())
}
