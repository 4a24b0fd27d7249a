//! Remote sync client and single-flight scheduling.

use crate::config::TuiConfig;
use crate::events::TuiEvent;
use async_trait::async_trait;
use quoteboard_core::{usable_quotes, Quote, RemoteQuotes, SyncError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// HTTP remote: `GET` reads the collection, `POST` appends to it.
#[derive(Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    url: String,
}

impl HttpRemote {
    pub fn new(config: &TuiConfig) -> Result<Self, reqwest::Error> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: config.remote_url.trim().to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post_json<B>(&self, body: &B) -> Result<serde_json::Value, SyncError>
    where
        B: serde::Serialize + ?Sized,
    {
        let response = self
            .client
            .post(&self.url)
            .json(body)
            .send()
            .await
            .map_err(network_error)?;
        let text = read_success_body(response).await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| SyncError::Parse {
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl RemoteQuotes for HttpRemote {
    async fn fetch_remote(&self) -> Result<Vec<Quote>, SyncError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(network_error)?;
        let text = read_success_body(response).await?;
        let elements: Vec<serde_json::Value> =
            serde_json::from_str(&text).map_err(|e| SyncError::Parse {
                reason: e.to_string(),
            })?;
        let (quotes, skipped) = usable_quotes(elements);
        if skipped > 0 {
            tracing::warn!(skipped, "Remote returned malformed records or records without text or category");
        }
        Ok(quotes)
    }

    async fn push_local(&self, quote: &Quote) -> Result<serde_json::Value, SyncError> {
        self.post_json(quote).await
    }

    async fn push_all(&self, quotes: &[Quote]) -> Result<serde_json::Value, SyncError> {
        self.post_json(quotes).await
    }
}

fn network_error(err: reqwest::Error) -> SyncError {
    SyncError::Network {
        reason: err.to_string(),
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<String, SyncError> {
    let status = response.status();
    let text = response.text().await.map_err(network_error)?;
    if status.is_success() {
        Ok(text)
    } else {
        Err(SyncError::Network {
            reason: format!("HTTP {}: {}", status.as_u16(), text),
        })
    }
}

// ----------------------------------------------------------------------------
// Scheduling
// ----------------------------------------------------------------------------

/// Allows at most one sync in flight.
#[derive(Debug, Clone, Default)]
pub struct SyncScheduler {
    in_flight: Arc<AtomicBool>,
}

impl SyncScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the sync slot. `None` while another sync holds it.
    pub fn try_begin(&self) -> Option<SyncTicket> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SyncTicket {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Releases the sync slot when dropped.
#[derive(Debug)]
pub struct SyncTicket {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SyncTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

/// Fetch the remote collection in the background and report back with
/// [`TuiEvent::SyncFetched`].
pub fn spawn_fetch(
    remote: Arc<dyn RemoteQuotes>,
    ticket: SyncTicket,
    sender: mpsc::Sender<TuiEvent>,
) {
    tokio::spawn(async move {
        let result = remote.fetch_remote().await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Remote fetch failed");
        }
        let _ = sender.send(TuiEvent::SyncFetched { result, ticket }).await;
    });
}

/// Push local additions in the background and report back with
/// [`TuiEvent::PushFinished`]. A single quote is sent as an object, several
/// as an array.
pub fn spawn_push(remote: Arc<dyn RemoteQuotes>, quotes: Vec<Quote>, sender: mpsc::Sender<TuiEvent>) {
    tokio::spawn(async move {
        let count = quotes.len();
        let result = match quotes.as_slice() {
            [single] => remote.push_local(single).await,
            many => remote.push_all(many).await,
        };
        if let Err(err) = &result {
            tracing::warn!(count, error = %err, "Push to remote failed");
        }
        let _ = sender.send(TuiEvent::PushFinished { count, result }).await;
    });
}
