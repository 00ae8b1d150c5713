//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use std::env;
use std::path::PathBuf;

use dotenv::dotenv;

use crate::error::Result;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Path to the corpus JSON file
    pub corpus_path: PathBuf,
    /// Path to the bookmark store file
    pub bookmarks_path: PathBuf,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            corpus_path: PathBuf::from("dataset.json"),
            bookmarks_path: default_bookmarks_path(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(path) = env::var("VERSICLE_CORPUS") {
            config.corpus_path = PathBuf::from(path);
        }

        if let Ok(path) = env::var("VERSICLE_BOOKMARKS") {
            config.bookmarks_path = PathBuf::from(path);
        }

        Ok(config)
    }
}

/// Default bookmark location under the platform data directory, falling
/// back to the working directory when no data directory is available.
fn default_bookmarks_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("bookmarks.json"),
        |d| d.join("versicle").join("bookmarks.json"),
    )
}
