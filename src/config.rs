use crate::error::{AppError, AppResult};
use crate::flight::Direction;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://www.hongkongairport.com/flightinfo-rest/rest/flights/past";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub lang: String,
    pub window_days: u32,
    pub mode: Direction,
    /// Per-request timeout handed to the HTTP client; `None` keeps its default.
    pub timeout_secs: Option<u64>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: "en".to_string(),
            window_days: 10,
            mode: Direction::Departure,
            timeout_secs: None,
            log_filter: "warn".to_string(),
        }
    }
}

/// Command line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub lang: Option<String>,
    pub window_days: Option<u32>,
    pub mode: Option<Direction>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load_from_file(path: &Path) -> AppResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }

    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> AppResult<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides).validate()
    }

    pub fn apply(self, overrides: Overrides) -> Self {
        Self {
            base_url: overrides.base_url.unwrap_or(self.base_url),
            lang: overrides.lang.unwrap_or(self.lang),
            window_days: overrides.window_days.unwrap_or(self.window_days),
            mode: overrides.mode.unwrap_or(self.mode),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
            log_filter: self.log_filter,
        }
    }

    pub fn validate(self) -> AppResult<Self> {
        if self.window_days == 0 {
            return Err(AppError::Config("window must cover at least one day".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(AppError::Config("base URL cannot be empty".to_string()));
        }
        if self.timeout_secs == Some(0) {
            return Err(AppError::Config("timeout must be at least one second".to_string()));
        }
        Ok(self)
    }
}
