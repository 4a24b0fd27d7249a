//! Session-scoped state: the last quote shown to the user.

use crate::error::{StorageError, StorageResult};
use crate::{keys, KeyValueStore};
use quoteboard_core::Quote;
use std::sync::Arc;

#[derive(Clone)]
pub struct SessionState {
    store: Arc<dyn KeyValueStore>,
}

impl SessionState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The last viewed quote, if one was recorded and is still readable.
    pub fn last_viewed(&self) -> Option<Quote> {
        let raw = match self.store.get(keys::LAST_VIEWED_QUOTE) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read last viewed quote");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(quote) => Some(quote),
            Err(err) => {
                tracing::warn!(error = %err, "Last viewed quote is malformed, ignoring");
                None
            }
        }
    }

    pub fn remember(&self, quote: &Quote) -> StorageResult<()> {
        let json = serde_json::to_string(quote)
            .map_err(|e| StorageError::serialization(keys::LAST_VIEWED_QUOTE, e))?;
        self.store.set(keys::LAST_VIEWED_QUOTE, &json)
    }
}
