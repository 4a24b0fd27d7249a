//! Category filter state.

use crate::quote::Quote;
use std::fmt;

/// Sentinel value selecting every category.
pub const ALL_CATEGORIES: &str = "all";

/// The active category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse a stored or user-provided value. Blank input and the sentinel
    /// both mean [`CategoryFilter::All`].
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Category(name) => name,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => quote.category == *name,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_and_blank_parse_to_all() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("  "), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(" Life "),
            CategoryFilter::Category("Life".to_string())
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for filter in [CategoryFilter::All, CategoryFilter::Category("Life".into())] {
            assert_eq!(CategoryFilter::parse(&filter.to_string()), filter);
        }
    }

    #[test]
    fn matches_by_exact_category() {
        let quote = Quote::new("A", "Life");
        assert!(CategoryFilter::All.matches(&quote));
        assert!(CategoryFilter::from("Life").matches(&quote));
        assert!(!CategoryFilter::from("life").matches(&quote));
    }
}
