//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! for everything except malformed numbers.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: address to bind to (default: "0.0.0.0")
//! - `API_PORT`: port to listen on (default: 3000)
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `API_CORS_ORIGINS`: comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: per-request timeout (default: 30)
//! - `CATALOG_BASE_URL`: an `http(s)://` base URL or a directory holding the
//!   catalog JSON files (default: "./data")
//! - `SEARCH_PAGE_SIZE`: results per search page (default: 20)
//! - `SEED_TABLES_PATH`: JSON file with the initial timetables (optional)

use eyre::{Result, WrapErr, eyre};
use std::{env, path::PathBuf};
use tracing::Level;

/// Configuration for the CourseGrid API server
///
/// # Example
///
/// ```
/// use eyre::Result;
/// use coursegrid_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    pub port: u16,

    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Where the catalog JSON files live
    pub catalog_base_url: String,

    /// Default page size for searches that do not ask for one
    pub search_page_size: usize,

    /// Initial timetables; one empty table when unset
    pub seed_tables_path: Option<PathBuf>,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - The SEARCH_PAGE_SIZE value is not a positive integer
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Logging settings
        let log_level = match env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Catalog and search settings
        let catalog_base_url =
            env::var("CATALOG_BASE_URL").unwrap_or_else(|_| "./data".to_string());
        let search_page_size: usize = env::var("SEARCH_PAGE_SIZE")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .wrap_err("Invalid SEARCH_PAGE_SIZE value")?;
        if search_page_size == 0 {
            return Err(eyre!("SEARCH_PAGE_SIZE must be at least 1"));
        }

        let seed_tables_path = env::var("SEED_TABLES_PATH").ok().map(PathBuf::from);

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            catalog_base_url,
            search_page_size,
            seed_tables_path,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
