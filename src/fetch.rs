//! Remote CSV retrieval.
//!
//! Only one fetch may be outstanding per source. A second attempt made while
//! one is in flight fails with [`FetchError::Busy`] instead of racing it.

use crate::error::FetchError;
use reqwest::blocking::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Anything that can turn a URL into CSV text.
pub trait TextSource {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Holds the in-flight flag for as long as a fetch runs.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, FetchError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| FetchError::Busy)?;
        Ok(InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct HttpSource {
    client: Client,
    in_flight: AtomicBool,
}

impl HttpSource {
    /// `timeout` of `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        // The blocking client defaults to 30s; `None` disables the timeout.
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Transport {
                url: String::new(),
                source,
            })?;
        Ok(HttpSource {
            client,
            in_flight: AtomicBool::new(false),
        })
    }
}

impl TextSource for HttpSource {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let _guard = InFlight::acquire(&self.in_flight)?;
        debug!(url, "fetching CSV");

        let resp = self.client.get(url).send().map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let text = resp.text().map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        info!(url, bytes = text.len(), "fetched CSV");
        Ok(text)
    }
}
