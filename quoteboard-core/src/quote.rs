//! Quote record and identity rules.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Quote identifier.
///
/// Remote services tend to hand out numeric ids while quotes created here get
/// a UUIDv7 string, so both shapes are accepted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuoteId {
    Number(i64),
    Text(String),
}

impl QuoteId {
    /// Generate a new timestamp-sortable identifier.
    pub fn generate() -> Self {
        QuoteId::Text(Uuid::now_v7().to_string())
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteId::Number(n) => write!(f, "{}", n),
            QuoteId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QuoteId {
    fn from(value: i64) -> Self {
        QuoteId::Number(value)
    }
}

impl From<&str> for QuoteId {
    fn from(value: &str) -> Self {
        QuoteId::Text(value.to_string())
    }
}

/// A text/category pair, optionally identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<QuoteId>,
    pub text: String,
    pub category: String,
}

impl Quote {
    /// Build an unidentified quote.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            category: category.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<QuoteId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Build a quote from user input, trimming both fields and assigning a
    /// fresh identifier.
    pub fn create(text: &str, category: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() {
            return Err(ValidationError::RequiredFieldMissing { field: "text" });
        }
        if category.is_empty() {
            return Err(ValidationError::RequiredFieldMissing { field: "category" });
        }
        Ok(Self {
            id: Some(QuoteId::generate()),
            text: text.to_string(),
            category: category.to_string(),
        })
    }

    /// Two quotes share an identity when both carry equal ids. If either
    /// lacks an id, exact text equality decides.
    pub fn same_identity(&self, other: &Quote) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.text == other.text,
        }
    }
}

/// Loosely-shaped quote as found in import files and remote payloads.
///
/// Every field is optional so that a missing field can be reported per
/// element. Callers read documents as `Vec<serde_json::Value>` and convert
/// each element with [`QuoteRecord::from_value`], so a badly typed element
/// never fails the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    #[serde(default)]
    pub id: Option<QuoteId>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl QuoteRecord {
    /// Read one JSON element. Non-objects and wrongly typed fields are
    /// rejected as a malformed record.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|e| ValidationError::MalformedRecord {
            reason: e.to_string(),
        })
    }

    /// Read and convert one JSON element in a single step.
    pub fn quote_from_value(value: serde_json::Value) -> Result<Quote, ValidationError> {
        Self::from_value(value)?.into_quote()
    }

    /// Convert into a quote, requiring non-empty text and category.
    pub fn into_quote(self) -> Result<Quote, ValidationError> {
        let text = self
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or(ValidationError::RequiredFieldMissing { field: "text" })?;
        let category = self
            .category
            .filter(|c| !c.trim().is_empty())
            .ok_or(ValidationError::RequiredFieldMissing { field: "category" })?;
        Ok(Quote {
            id: self.id,
            text,
            category,
        })
    }
}

impl From<Quote> for QuoteRecord {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            text: Some(quote.text),
            category: Some(quote.category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_trims_and_assigns_id() {
        let quote = Quote::create("  Stay hungry  ", " Motivation ").unwrap();
        assert_eq!(quote.text, "Stay hungry");
        assert_eq!(quote.category, "Motivation");
        assert!(matches!(quote.id, Some(QuoteId::Text(_))));
    }

    #[test]
    fn create_rejects_blank_fields() {
        assert_eq!(
            Quote::create("   ", "Life"),
            Err(ValidationError::RequiredFieldMissing { field: "text" })
        );
        assert_eq!(
            Quote::create("Something", ""),
            Err(ValidationError::RequiredFieldMissing { field: "category" })
        );
    }

    #[test]
    fn identity_prefers_ids() {
        let a = Quote::new("A", "X").with_id(1);
        let b = Quote::new("B", "X").with_id(1);
        let c = Quote::new("A", "X").with_id(2);
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
    }

    #[test]
    fn identity_falls_back_to_text() {
        let a = Quote::new("A", "X").with_id(1);
        let b = Quote::new("A", "Y");
        let c = Quote::new("B", "X");
        assert!(a.same_identity(&b));
        assert!(!b.same_identity(&c));
    }

    #[test]
    fn id_accepts_numbers_and_strings() {
        let numeric: Quote =
            serde_json::from_str(r#"{"id": 7, "text": "A", "category": "X"}"#).unwrap();
        assert_eq!(numeric.id, Some(QuoteId::Number(7)));

        let textual: Quote =
            serde_json::from_str(r#"{"id": "abc", "text": "A", "category": "X"}"#).unwrap();
        assert_eq!(textual.id, Some(QuoteId::Text("abc".to_string())));

        let bare: Quote = serde_json::from_str(r#"{"text": "A", "category": "X"}"#).unwrap();
        assert_eq!(bare.id, None);
        assert_eq!(
            serde_json::to_string(&bare).unwrap(),
            r#"{"text":"A","category":"X"}"#
        );
    }

    #[test]
    fn record_requires_text_and_category() {
        let missing_text = QuoteRecord {
            category: Some("X".to_string()),
            ..QuoteRecord::default()
        };
        assert!(missing_text.into_quote().is_err());

        let blank_category = QuoteRecord {
            text: Some("A".to_string()),
            category: Some("  ".to_string()),
            ..QuoteRecord::default()
        };
        assert!(blank_category.into_quote().is_err());

        let ok = QuoteRecord {
            id: Some(QuoteId::Number(3)),
            text: Some("A".to_string()),
            category: Some("X".to_string()),
        };
        assert_eq!(ok.into_quote().unwrap(), Quote::new("A", "X").with_id(3));
    }

    #[test]
    fn badly_typed_elements_are_malformed() {
        let cases = [
            json!(null),
            json!("just text"),
            json!({"text": "A", "category": 7}),
            json!({"id": true, "text": "A", "category": "X"}),
            json!({"id": 1.5, "text": "A", "category": "X"}),
        ];
        for value in cases {
            assert!(
                matches!(
                    QuoteRecord::from_value(value.clone()),
                    Err(ValidationError::MalformedRecord { .. })
                ),
                "{} should be malformed",
                value
            );
        }
    }

    #[test]
    fn quote_from_value_reads_well_formed_elements() {
        let quote =
            QuoteRecord::quote_from_value(json!({"id": "x1", "text": "A", "category": "X"}))
                .unwrap();
        assert_eq!(quote, Quote::new("A", "X").with_id("x1"));

        assert_eq!(
            QuoteRecord::quote_from_value(json!({"text": "A"})),
            Err(ValidationError::RequiredFieldMissing { field: "category" })
        );
    }
}
