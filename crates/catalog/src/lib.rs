pub mod cache;
pub mod loader;
pub mod source;

pub mod mock;

pub use cache::{InMemorySessionCache, SessionCache};
pub use loader::{CATALOG_CACHE_KEY, load_catalog};
pub use source::{CatalogKind, CatalogSource, FileCatalogSource, HttpCatalogSource, source_for};
