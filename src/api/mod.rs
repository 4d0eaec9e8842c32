pub mod usgs;

pub use usgs::{FetchOptions, Query, USGS_QUERY_URL, fetch_text};
