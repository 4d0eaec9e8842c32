//! didyoufeelit - Show how strongly people felt a recent earthquake, from USGS event data

pub mod api;
pub mod config;
pub mod display;
pub mod domain;
pub mod error;
pub mod geojson;
pub mod task;

#[cfg(test)]
mod testing;

pub use domain::{Event, Intensity};
pub use error::{NetworkError, ParseError};
pub use task::{PendingEvent, load_event, spawn_load};
