//! Application configuration loaded from TOML.
//!
//! ```toml
//! [search]
//! api_base_url = "https://api.github.com"
//! per_page = 50
//! timeout_seconds = 10
//!
//! [reviews]
//! url = "https://example.mockapi.io/api/v1/ClientReviews/reviews"
//!
//! [ui]
//! page_size = 8
//! ```
//!
//! Every section and field is optional; missing values take their defaults.

use std::path::{Path, PathBuf};

use gh_search::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::error::{FinderError, Result};

/// Testimonial endpoint used by the original site.
pub const DEFAULT_REVIEWS_URL: &str =
    "https://68dba088445fdb39dc2609a7.mockapi.io/api/v1/ClientReviews/reviews";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// GitHub search and profile lookup settings.
    pub search: SearchConfig,
    /// Testimonial store settings.
    pub reviews: ReviewsConfig,
    /// Result presentation settings.
    pub ui: UiConfig,
}

/// Testimonial store endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewsConfig {
    /// Collection URL supporting `GET` (list) and `POST` (create).
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REVIEWS_URL.to_string(),
            timeout_seconds: 10,
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Results per page.
    pub page_size: usize,
    /// Testimonials per page.
    pub review_page_size: usize,
    /// How many `matched_by` labels to show per result.
    pub max_labels: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: gh_search::pagination::DEFAULT_PAGE_SIZE,
            review_page_size: 6,
            max_labels: 2,
        }
    }
}

impl FinderConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| FinderError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else from [`FinderConfig::default_config_path`]
    /// if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    tracing::debug!(path = %default_path.display(), "loading default config");
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| FinderError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Search`] for invalid search settings and
    /// [`FinderError::Config`] for the rest.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        url::Url::parse(&self.reviews.url)
            .map_err(|e| FinderError::Config(format!("reviews.url is not a valid URL: {e}")))?;
        if self.reviews.timeout_seconds == 0 {
            return Err(FinderError::Config(
                "reviews.timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.ui.page_size == 0 || self.ui.review_page_size == 0 {
            return Err(FinderError::Config("ui page sizes must be greater than 0".into()));
        }
        Ok(())
    }

    /// Returns the default config file path: `~/.config/ghfinder/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("ghfinder").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("ghfinder")
                .join("config.toml")
        } else {
            PathBuf::from("ghfinder.toml")
        }
    }
}
