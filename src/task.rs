use std::sync::mpsc::{self, Receiver};
use std::thread;
use tracing::{debug, warn};

use crate::api::{FetchOptions, fetch_text};
use crate::domain::Event;
use crate::geojson::parse_event;

/// Fetch `url` and extract its first event.
///
/// Network and parse failures are logged and collapse to [`Event::default`].
pub fn load_event(url: &str, options: &FetchOptions) -> Event {
    match fetch_text(url, options) {
        Ok(body) => parse_event(&body),
        Err(e) => {
            warn!(error = %e, url, "failed to fetch earthquake data");
            Event::default()
        }
    }
}

/// Result of a fetch running on a background thread.
///
/// Receives exactly one [`Event`]; the caller observes it on its own thread.
pub struct PendingEvent {
    rx: Receiver<Event>,
}

impl PendingEvent {
    /// Block until the background work finishes and return its event.
    ///
    /// Yields [`Event::default`] if the worker exited without a result.
    pub fn wait(self) -> Event {
        self.rx.recv().unwrap_or_else(|_| {
            warn!("background fetch ended without a result");
            Event::default()
        })
    }

    /// Wait for the event, then run `on_complete` with it on the calling thread.
    pub fn on_complete<F, R>(self, on_complete: F) -> R
    where
        F: FnOnce(Event) -> R,
    {
        on_complete(self.wait())
    }
}

/// Start [`load_event`] on a single background thread.
pub fn spawn_load(url: impl Into<String>, options: FetchOptions) -> PendingEvent {
    spawn_with(move |url| load_event(url, &options), url.into())
}

fn spawn_with<F>(work: F, url: String) -> PendingEvent
where
    F: FnOnce(&str) -> Event + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(1);

    thread::spawn(move || {
        debug!(url = %url, "background fetch started");
        let event = work(&url);
        // Receiver dropped means nobody is waiting for the result any more
        let _ = tx.send(event);
    });

    PendingEvent { rx }
}
