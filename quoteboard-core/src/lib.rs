//! Quoteboard Core - Quote Types
//!
//! Data structures and the pure rules that operate on them: identity,
//! category filtering and the remote-wins merge. No I/O lives here.

pub mod collection;
pub mod error;
pub mod filter;
pub mod quote;
pub mod remote;

pub use collection::{seed_quotes, MergeReport, QuoteCollection};
pub use error::{QuoteError, QuoteResult, ValidationError};
pub use filter::{CategoryFilter, ALL_CATEGORIES};
pub use quote::{Quote, QuoteId, QuoteRecord};
pub use remote::{usable_quotes, RemoteQuotes, SyncError};
