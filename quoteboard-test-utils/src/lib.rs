//! Quoteboard Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Proptest generators for quotes and collections
//! - A scriptable in-memory remote
//! - Fixtures for common scenarios

pub use quoteboard_storage::MemoryStore;

pub use quoteboard_core::{
    CategoryFilter, Quote, QuoteCollection, QuoteId, RemoteQuotes, SyncError,
};

use async_trait::async_trait;
use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// MOCK REMOTE
// ============================================================================

#[derive(Debug, Default)]
struct MockRemoteState {
    snapshot: Vec<Quote>,
    pushed: Vec<Quote>,
    fetch_error: Option<SyncError>,
    push_error: Option<SyncError>,
    fetch_count: usize,
}

/// In-memory remote. Clones share state so a test can inspect what the code
/// under test pushed.
#[derive(Debug, Clone, Default)]
pub struct MockRemote {
    state: Arc<Mutex<MockRemoteState>>,
    delay: Option<Duration>,
}

impl MockRemote {
    pub fn new(snapshot: Vec<Quote>) -> Self {
        let remote = Self::default();
        remote.set_snapshot(snapshot);
        remote
    }

    /// Delay every fetch, to keep a sync in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_snapshot(&self, snapshot: Vec<Quote>) {
        self.lock().snapshot = snapshot;
    }

    pub fn fail_fetch(&self, err: SyncError) {
        self.lock().fetch_error = Some(err);
    }

    pub fn fail_push(&self, err: SyncError) {
        self.lock().push_error = Some(err);
    }

    pub fn pushed(&self) -> Vec<Quote> {
        self.lock().pushed.clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.lock().fetch_count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockRemoteState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RemoteQuotes for MockRemote {
    async fn fetch_remote(&self) -> Result<Vec<Quote>, SyncError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.lock();
        state.fetch_count += 1;
        match &state.fetch_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.snapshot.clone()),
        }
    }

    async fn push_local(&self, quote: &Quote) -> Result<serde_json::Value, SyncError> {
        self.push_all(std::slice::from_ref(quote)).await
    }

    async fn push_all(&self, quotes: &[Quote]) -> Result<serde_json::Value, SyncError> {
        let mut state = self.lock();
        if let Some(err) = &state.push_error {
            return Err(err.clone());
        }
        state.pushed.extend(quotes.iter().cloned());
        serde_json::to_value(quotes).map_err(|e| SyncError::Parse {
            reason: e.to_string(),
        })
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

/// `{id:1, text:"A", category:"X"}`.
pub fn identified_quote() -> Quote {
    Quote::new("A", "X").with_id(1)
}

/// A small remote snapshot with numeric ids.
pub fn remote_snapshot() -> Vec<Quote> {
    vec![
        Quote::new("Simplicity is the soul of efficiency.", "Engineering").with_id(1),
        Quote::new("Well begun is half done.", "Motivation").with_id(2),
    ]
}

// ============================================================================
// GENERATORS
// ============================================================================

pub fn arb_category() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Motivation", "Inspiration", "Life", "Testing"])
        .prop_map(str::to_string)
}

pub fn arb_quote_id() -> impl Strategy<Value = QuoteId> {
    prop_oneof![
        (0i64..1000).prop_map(QuoteId::Number),
        "[a-f0-9]{8}".prop_map(QuoteId::Text),
    ]
}

/// Valid quote: non-empty text and category, optional id.
pub fn arb_quote() -> impl Strategy<Value = Quote> {
    (
        proptest::option::of(arb_quote_id()),
        "[A-Za-z][A-Za-z ,.']{0,40}",
        arb_category(),
    )
        .prop_map(|(id, text, category)| Quote { id, text, category })
}

pub fn arb_collection() -> impl Strategy<Value = QuoteCollection> {
    prop::collection::vec(arb_quote(), 0..12).prop_map(QuoteCollection::from_quotes)
}
