//! Remote quote source abstraction.
//!
//! The HTTP implementation lives in the TUI crate; tests use the mock from
//! `quoteboard-test-utils`.

use crate::quote::{Quote, QuoteRecord};
use serde_json::Value;
use async_trait::async_trait;
use thiserror::Error;

/// Failures talking to the remote endpoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("Network error: {reason}")]
    Network { reason: String },

    #[error("Parse error: {reason}")]
    Parse { reason: String },
}

/// A remote collection that can be read and appended to.
#[async_trait]
pub trait RemoteQuotes: Send + Sync {
    /// Read the whole remote collection.
    async fn fetch_remote(&self) -> Result<Vec<Quote>, SyncError>;

    /// Send a single local addition. Returns the remote echo.
    async fn push_local(&self, quote: &Quote) -> Result<serde_json::Value, SyncError>;

    /// Send a batch of local additions. Returns the remote echo.
    async fn push_all(&self, quotes: &[Quote]) -> Result<serde_json::Value, SyncError>;
}

/// Keep the elements that form valid quotes; returns them with the number of
/// elements dropped. Badly typed elements and elements without text or
/// category are both dropped.
pub fn usable_quotes(elements: Vec<Value>) -> (Vec<Quote>, usize) {
    let total = elements.len();
    let quotes: Vec<Quote> = elements
        .into_iter()
        .filter_map(|element| QuoteRecord::quote_from_value(element).ok())
        .collect();
    let skipped = total - quotes.len();
    (quotes, skipped)
}
