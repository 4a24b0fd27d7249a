//! Persisted quote library.
//!
//! Pairs the in-memory [`QuoteCollection`] with a durable store and writes the
//! collection back after every mutation.

use crate::error::{LibraryError, StorageError, StorageResult};
use crate::{keys, KeyValueStore};
use quoteboard_core::{CategoryFilter, MergeReport, Quote, QuoteCollection};
use std::sync::Arc;

pub struct QuoteLibrary {
    quotes: QuoteCollection,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for QuoteLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteLibrary")
            .field("quotes", &self.quotes)
            .finish_non_exhaustive()
    }
}

impl QuoteLibrary {
    /// Load the collection from `store`, falling back to the seed quotes when
    /// nothing is stored or the stored value cannot be read.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let quotes = match store.get(keys::QUOTES) {
            Ok(Some(json)) => match QuoteCollection::from_json(&json) {
                Ok(quotes) => quotes,
                Err(err) => {
                    tracing::warn!(error = %err, "Stored quotes are malformed, using defaults");
                    QuoteCollection::seeded()
                }
            },
            Ok(None) => QuoteCollection::seeded(),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read stored quotes, using defaults");
                QuoteCollection::seeded()
            }
        };
        tracing::info!(count = quotes.len(), "Quote library loaded");
        Self { quotes, store }
    }

    pub fn save(&self) -> StorageResult<()> {
        let json = self
            .quotes
            .to_json()
            .map_err(|e| StorageError::serialization(keys::QUOTES, e))?;
        self.store.set(keys::QUOTES, &json)
    }

    pub fn quotes(&self) -> &QuoteCollection {
        &self.quotes
    }

    pub fn all(&self) -> &[Quote] {
        self.quotes.all()
    }

    pub fn by_category(&self, filter: &CategoryFilter) -> Vec<&Quote> {
        self.quotes.by_category(filter)
    }

    pub fn categories(&self) -> Vec<String> {
        self.quotes.categories()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Validate and append a new quote, then persist.
    ///
    /// A persistence failure is returned after the quote has already been
    /// appended in memory.
    pub fn add(&mut self, text: &str, category: &str) -> Result<Quote, LibraryError> {
        let quote = self.quotes.add(text, category)?.clone();
        self.save()?;
        tracing::info!(category = %quote.category, "Quote added");
        Ok(quote)
    }

    /// Merge a remote snapshot (remote wins) and persist.
    pub fn merge(&mut self, remote: Vec<Quote>) -> StorageResult<MergeReport> {
        let report = self.quotes.merge(remote);
        self.save()?;
        Ok(report)
    }

    /// Append already-validated imported quotes and persist.
    pub fn import(&mut self, quotes: Vec<Quote>) -> StorageResult<usize> {
        let added = self.quotes.import(quotes);
        self.save()?;
        Ok(added)
    }

    /// The persisted filter, or `All` when it is missing or names a category
    /// that no longer exists.
    pub fn selected_category(&self) -> CategoryFilter {
        let stored = match self.store.get(keys::SELECTED_CATEGORY) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read selected category");
                None
            }
        };
        match stored.map(|value| CategoryFilter::parse(&value)) {
            Some(CategoryFilter::Category(name)) if self.quotes.has_category(&name) => {
                CategoryFilter::Category(name)
            }
            _ => CategoryFilter::All,
        }
    }

    pub fn set_selected_category(&self, filter: &CategoryFilter) -> StorageResult<()> {
        self.store.set(keys::SELECTED_CATEGORY, filter.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileStore, MemoryStore};
    use quoteboard_core::ValidationError;
    use tempfile::TempDir;

    fn memory_library() -> (MemoryStore, QuoteLibrary) {
        let store = MemoryStore::new();
        let library = QuoteLibrary::load(Arc::new(store.clone()));
        (store, library)
    }

    #[test]
    fn empty_store_loads_seed() {
        let (_, library) = memory_library();
        assert_eq!(library.len(), 3);
    }

    #[test]
    fn corrupt_quotes_fall_back_to_seed() {
        let store = MemoryStore::new();
        store.set(keys::QUOTES, "[{\"text\": ").unwrap();
        let library = QuoteLibrary::load(Arc::new(store));
        assert_eq!(library.quotes(), &QuoteCollection::seeded());
    }

    #[test]
    fn add_persists() {
        let (store, mut library) = memory_library();
        library.add("Test quote", "Testing").unwrap();

        let stored = store.get(keys::QUOTES).unwrap().unwrap();
        let restored = QuoteCollection::from_json(&stored).unwrap();
        assert_eq!(restored.len(), 4);
        assert_eq!(&restored, library.quotes());
    }

    #[test]
    fn invalid_add_does_not_write() {
        let (store, mut library) = memory_library();
        let err = library.add("", "Testing").unwrap_err();
        assert_eq!(
            err,
            LibraryError::Validation(ValidationError::RequiredFieldMissing { field: "text" })
        );
        assert_eq!(store.get(keys::QUOTES).unwrap(), None);
        assert_eq!(library.len(), 3);
    }

    #[test]
    fn save_then_load_round_trips_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut library = QuoteLibrary::load(Arc::new(FileStore::open(&path).unwrap()));
        library.add("First", "A").unwrap();
        library.add("Second", "B").unwrap();
        let expected = library.quotes().clone();
        drop(library);

        let reloaded = QuoteLibrary::load(Arc::new(FileStore::open(&path).unwrap()));
        assert_eq!(reloaded.quotes(), &expected);
    }

    #[test]
    fn merge_persists_remote_wins() {
        let store = MemoryStore::new();
        store
            .set(keys::QUOTES, r#"[{"id":1,"text":"A","category":"X"}]"#)
            .unwrap();
        let mut library = QuoteLibrary::load(Arc::new(store.clone()));

        let report = library
            .merge(vec![Quote::new("B", "X").with_id(1)])
            .unwrap();
        assert_eq!(report.updated, 1);
        assert_eq!(library.len(), 1);
        assert_eq!(library.all()[0].text, "B");

        let stored = QuoteCollection::from_json(&store.get(keys::QUOTES).unwrap().unwrap()).unwrap();
        assert_eq!(stored.all()[0].text, "B");
    }

    #[test]
    fn selected_category_round_trip() {
        let (_, library) = memory_library();
        assert_eq!(library.selected_category(), CategoryFilter::All);

        library
            .set_selected_category(&CategoryFilter::from("Life"))
            .unwrap();
        assert_eq!(library.selected_category(), CategoryFilter::from("Life"));
    }

    #[test]
    fn stale_selected_category_resolves_to_all() {
        let (store, library) = memory_library();
        store.set(keys::SELECTED_CATEGORY, "Gone").unwrap();
        assert_eq!(library.selected_category(), CategoryFilter::All);
    }
}
