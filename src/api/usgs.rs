use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::NetworkError;

pub const USGS_QUERY_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";
const USER_AGENT: &str = concat!("didyoufeelit/", env!("CARGO_PKG_VERSION"));

/// Query parameters for the USGS FDSN event service.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub base_url: String,
    /// Inclusive start date, `YYYY-MM-DD`
    pub start_time: String,
    pub end_time: String,
    /// Minimum number of "Did You Feel It?" reports
    pub min_felt: u32,
    pub min_magnitude: f64,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            base_url: USGS_QUERY_URL.to_string(),
            start_time: "2016-01-01".to_string(),
            end_time: "2016-05-02".to_string(),
            min_felt: 50,
            min_magnitude: 5.0,
        }
    }
}

impl Query {
    /// Build the full GeoJSON request URL.
    pub fn url(&self) -> Result<Url, NetworkError> {
        let min_felt = self.min_felt.to_string();
        let min_magnitude = self.min_magnitude.to_string();
        Url::parse_with_params(
            &self.base_url,
            &[
                ("format", "geojson"),
                ("starttime", self.start_time.as_str()),
                ("endtime", self.end_time.as_str()),
                ("minfelt", min_felt.as_str()),
                ("minmagnitude", min_magnitude.as_str()),
            ],
        )
        .map_err(|e| NetworkError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }
}

/// Timeouts for the single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Perform one GET request and return the response body as text.
///
/// # Arguments
/// * `url` - Absolute http(s) URL
/// * `options` - Connect and overall timeouts
///
/// # Returns
/// * `Ok(body)` - On a 2xx response
/// * `Err` - Malformed URL, connection failure, timeout or non-2xx status.
///   There are no retries.
pub fn fetch_text(url: &str, options: &FetchOptions) -> Result<String, NetworkError> {
    let url = validate_url(url)?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(options.connect_timeout)
        .timeout(options.timeout)
        .build()
        .map_err(NetworkError::Client)?;

    debug!(%url, "requesting earthquake data");
    let response = client
        .get(url.clone())
        .send()
        .map_err(NetworkError::Request)?;

    let status = response.status();
    if !status.is_success() {
        return Err(NetworkError::Status(status.as_u16()));
    }

    let body = response.text().map_err(NetworkError::Body)?;
    info!(%url, bytes = body.len(), "fetched earthquake data");
    Ok(body)
}

fn validate_url(url: &str) -> Result<Url, NetworkError> {
    let invalid = |reason: String| NetworkError::InvalidUrl {
        url: url.to_string(),
        reason,
    };

    if url.trim().is_empty() {
        return Err(invalid("url is empty".to_string()));
    }
    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}
