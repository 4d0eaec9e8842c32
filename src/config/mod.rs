use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::api::{FetchOptions, Query, USGS_QUERY_URL};
use crate::display::OutputFormat;
use crate::error::NetworkError;

/// Accepted range for both timeouts, in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 300;

fn default_base_url() -> String {
    USGS_QUERY_URL.to_string()
}
fn default_start_time() -> String {
    Query::default().start_time
}
fn default_end_time() -> String {
    Query::default().end_time
}
fn default_min_felt() -> u32 {
    50
}
fn default_min_magnitude() -> f64 {
    5.0
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_connect_timeout_secs() -> u64 {
    15
}

/// Settings read from `didyoufeelit.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FileConfig {
    /// Full request URL; when set, the query fields below are ignored
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_start_time")]
    pub start_time: String,
    #[serde(default = "default_end_time")]
    pub end_time: String,
    #[serde(default = "default_min_felt")]
    pub min_felt: u32,
    #[serde(default = "default_min_magnitude")]
    pub min_magnitude: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            url: None,
            base_url: default_base_url(),
            start_time: default_start_time(),
            end_time: default_end_time(),
            min_felt: default_min_felt(),
            min_magnitude: default_min_magnitude(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            format: OutputFormat::default(),
        }
    }
}

impl FileConfig {
    /// Load the first config file found in the search paths.
    ///
    /// Unparseable files are skipped with a warning.
    pub fn load() -> Option<Self> {
        Self::load_from(&get_config_paths())
    }

    fn load_from(paths: &[PathBuf]) -> Option<Self> {
        for path in paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        debug!(path = %path.display(), "loaded config file");
                        return Some(config);
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to parse config file");
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly named config file. Missing or invalid files are errors.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("didyoufeelit.toml"));
    paths.push(PathBuf::from(".didyoufeelit.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("didyoufeelit").join("config.toml"));
        paths.push(config_dir.join("didyoufeelit.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".didyoufeelit.toml"));
    }

    paths
}

/// Values given on the command line. `None` leaves the file/default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub min_felt: Option<u32>,
    pub min_magnitude: Option<f64>,
    pub timeout_secs: Option<u64>,
    pub format: Option<OutputFormat>,
}

/// Effective settings after merging CLI > config file > defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub url: Option<String>,
    pub query: Query,
    pub fetch: FetchOptions,
    pub format: OutputFormat,
}

impl Settings {
    pub fn resolve(file: Option<&FileConfig>, overrides: &Overrides) -> Self {
        let file = file.cloned().unwrap_or_default();

        let query = Query {
            base_url: file.base_url,
            start_time: overrides.start_time.clone().unwrap_or(file.start_time),
            end_time: overrides.end_time.clone().unwrap_or(file.end_time),
            min_felt: overrides.min_felt.unwrap_or(file.min_felt),
            min_magnitude: overrides.min_magnitude.unwrap_or(file.min_magnitude),
        };

        let fetch = FetchOptions {
            connect_timeout: timeout_within_range(
                "connect_timeout_secs",
                file.connect_timeout_secs,
            ),
            timeout: timeout_within_range(
                "timeout_secs",
                overrides.timeout_secs.unwrap_or(file.timeout_secs),
            ),
        };

        Self {
            url: overrides.url.clone().or(file.url),
            query,
            fetch,
            format: overrides.format.unwrap_or(file.format),
        }
    }

    /// The URL to request: an explicit URL if given, otherwise the built query.
    pub fn request_url(&self) -> Result<String, NetworkError> {
        match &self.url {
            Some(url) => Ok(url.clone()),
            None => Ok(self.query.url()?.to_string()),
        }
    }
}

/// A zero timeout would fail every request immediately.
fn timeout_within_range(name: &str, secs: u64) -> Duration {
    let clamped = secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
    if clamped != secs {
        warn!(
            setting = name,
            value = secs,
            used = clamped,
            "timeout out of range, clamping"
        );
    }
    Duration::from_secs(clamped)
}
