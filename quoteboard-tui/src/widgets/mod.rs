//! Reusable widget components.

pub mod filter;
pub mod input;
pub mod quote_card;

pub use filter::{FilterBar, FilterOption};
pub use input::InputField;
pub use quote_card::QuoteCard;
