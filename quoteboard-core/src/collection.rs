//! In-memory quote collection.
//!
//! The collection is the single source of truth while the application runs.
//! Persistence is layered on top by `quoteboard-storage`.

use crate::error::{QuoteResult, ValidationError};
use crate::filter::{CategoryFilter, ALL_CATEGORIES};
use crate::quote::Quote;

/// Quotes used when nothing usable is stored yet.
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The only limit to our realization of tomorrow is our doubts of today.",
            "Motivation",
        ),
        Quote::new("In the middle of difficulty lies opportunity.", "Inspiration"),
        Quote::new(
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
    ]
}

/// Outcome of a merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Local quotes overwritten by a differing remote version.
    pub updated: usize,
    /// Remote quotes that had no local counterpart.
    pub appended: usize,
    /// Remote quotes identical to their local counterpart.
    pub unchanged: usize,
}

impl MergeReport {
    pub fn changed(&self) -> bool {
        self.updated > 0 || self.appended > 0
    }
}

/// Ordered sequence of quotes; insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteCollection {
    quotes: Vec<Quote>,
}

impl QuoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    pub fn seeded() -> Self {
        Self::from_quotes(seed_quotes())
    }

    /// Parse a serialized collection (a JSON array of quotes).
    pub fn from_json(json: &str) -> QuoteResult<Self> {
        let quotes: Vec<Quote> = serde_json::from_str(json)?;
        Ok(Self::from_quotes(quotes))
    }

    pub fn to_json(&self) -> QuoteResult<String> {
        Ok(serde_json::to_string(&self.quotes)?)
    }

    pub fn to_json_pretty(&self) -> QuoteResult<String> {
        Ok(serde_json::to_string_pretty(&self.quotes)?)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn all(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.quotes.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Quote> {
        self.quotes.get(index)
    }

    /// Quotes matching the filter, in collection order.
    pub fn by_category(&self, filter: &CategoryFilter) -> Vec<&Quote> {
        self.quotes.iter().filter(|q| filter.matches(q)).collect()
    }

    /// The sentinel followed by each distinct category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for quote in &self.quotes {
            if !categories.iter().any(|c| *c == quote.category) {
                categories.push(quote.category.clone());
            }
        }
        categories
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.quotes.iter().any(|q| q.category == category)
    }

    /// Find the stored quote sharing an identity with `probe`.
    pub fn find_same(&self, probe: &Quote) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.same_identity(probe))
    }

    /// Validate user input and append a new identified quote.
    pub fn add(&mut self, text: &str, category: &str) -> Result<&Quote, ValidationError> {
        let quote = Quote::create(text, category)?;
        self.quotes.push(quote);
        Ok(&self.quotes[self.quotes.len() - 1])
    }

    /// Reconcile with a remote snapshot. Remote wins on identity match, unseen
    /// remote quotes are appended, nothing is removed.
    pub fn merge<I>(&mut self, remote: I) -> MergeReport
    where
        I: IntoIterator<Item = Quote>,
    {
        let mut report = MergeReport::default();
        for mut incoming in remote {
            match self.quotes.iter_mut().find(|local| local.same_identity(&incoming)) {
                Some(local) => {
                    if incoming.id.is_none() {
                        incoming.id = local.id.clone();
                    }
                    if *local == incoming {
                        report.unchanged += 1;
                    } else {
                        *local = incoming;
                        report.updated += 1;
                    }
                }
                None => {
                    self.quotes.push(incoming);
                    report.appended += 1;
                }
            }
        }
        report
    }

    /// Append imported quotes verbatim, without deduplication.
    pub fn import<I>(&mut self, quotes: I) -> usize
    where
        I: IntoIterator<Item = Quote>,
    {
        let before = self.quotes.len();
        self.quotes.extend(quotes);
        self.quotes.len() - before
    }
}

impl<'a> IntoIterator for &'a QuoteCollection {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}
