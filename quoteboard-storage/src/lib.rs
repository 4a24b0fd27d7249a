//! Quoteboard Storage - Key-Value Stores and the Quote Library
//!
//! Two store flavours back the application: a durable [`FileStore`] that
//! survives restarts and an ephemeral [`MemoryStore`] that lives as long as
//! the process. Both speak plain strings; serialization is done by the
//! callers in [`library`] and [`session`].

pub mod error;
pub mod file;
pub mod library;
pub mod memory;
pub mod session;

pub use error::{LibraryError, StorageError, StorageResult};
pub use file::FileStore;
pub use library::QuoteLibrary;
pub use memory::MemoryStore;
pub use session::SessionState;

/// Storage keys shared by the durable and session stores.
pub mod keys {
    /// Durable: JSON array of quotes.
    pub const QUOTES: &str = "quotes";
    /// Durable: plain string, a category or the `all` sentinel.
    pub const SELECTED_CATEGORY: &str = "selectedCategory";
    /// Session: JSON object of the last displayed quote.
    pub const LAST_VIEWED_QUOTE: &str = "lastViewedQuote";
}

/// String key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key was never set.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a key. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
