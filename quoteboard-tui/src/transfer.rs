//! JSON export and import of the quote collection.

use quoteboard_core::{Quote, QuoteCollection, QuoteRecord, ValidationError};
use std::path::{Path, PathBuf};

/// File name used for exports.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("IO error on {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("Import file is not a JSON array of quotes: {reason}")]
    FileParse { reason: String },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl TransferError {
    fn io(path: &Path, err: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Write the collection as a pretty-printed JSON array to
/// `<dir>/quotes.json`, returning the written path.
pub fn export_collection(collection: &QuoteCollection, dir: &Path) -> Result<PathBuf, TransferError> {
    let json = collection
        .to_json_pretty()
        .map_err(|e| TransferError::Serialization {
            reason: e.to_string(),
        })?;
    std::fs::create_dir_all(dir).map_err(|e| TransferError::io(dir, e))?;
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, json).map_err(|e| TransferError::io(&path, e))?;
    Ok(path)
}

pub async fn read_import(path: &Path) -> Result<String, TransferError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TransferError::io(path, e))
}

/// Parse an import file. Every element must be an object carrying non-empty
/// text and category; the first bad element rejects the whole file and is
/// reported by index.
pub fn parse_import(contents: &str) -> Result<Vec<Quote>, TransferError> {
    let elements: Vec<serde_json::Value> =
        serde_json::from_str(contents).map_err(|e| TransferError::FileParse {
            reason: e.to_string(),
        })?;
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            QuoteRecord::quote_from_value(element).map_err(|err| {
                ValidationError::InvalidRecord {
                    index,
                    reason: err.to_string(),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(TransferError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn export_writes_pretty_array() {
        let dir = TempDir::new().unwrap();
        let collection = QuoteCollection::seeded();

        let path = export_collection(&collection, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("[\n"));
        assert_eq!(QuoteCollection::from_json(&written).unwrap(), collection);
    }

    #[test]
    fn export_then_import_contains_original() {
        let dir = TempDir::new().unwrap();
        let mut original = QuoteCollection::seeded();
        original.add("Exported", "Testing").unwrap();
        let path = export_collection(&original, dir.path()).unwrap();

        let mut target = QuoteCollection::seeded();
        let imported = parse_import(&std::fs::read_to_string(path).unwrap()).unwrap();
        target.import(imported);

        assert_eq!(target.len(), 3 + original.len());
        let mut remaining = target.iter();
        for quote in original.iter() {
            assert!(remaining.any(|q| q == quote), "missing {:?}", quote);
        }
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = parse_import("[{\"text\": \"A\",").unwrap_err();
        assert!(matches!(err, TransferError::FileParse { .. }));

        let err = parse_import("{\"text\": \"A\", \"category\": \"X\"}").unwrap_err();
        assert!(matches!(err, TransferError::FileParse { .. }));
    }

    #[test]
    fn invalid_record_rejects_whole_file() {
        let err = parse_import(
            r#"[{"text": "A", "category": "X"}, {"text": "", "category": "Y"}]"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TransferError::Invalid(ValidationError::InvalidRecord { index: 1, .. })
        ));
    }

    #[test]
    fn badly_typed_record_is_reported_by_index() {
        let err = parse_import(r#"[{"text":"A","category":"X"},{"text":5,"category":"Y"}]"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TransferError::Invalid(ValidationError::InvalidRecord { index: 1, .. })
        ));

        let err = parse_import(r#"[{"text":"A","category":"X"},{"text":"B","category":"Y"},null]"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TransferError::Invalid(ValidationError::InvalidRecord { index: 2, .. })
        ));

        let err = parse_import(r#"[{"text":"A","category":7}]"#).unwrap_err();
        assert!(matches!(
            err,
            TransferError::Invalid(ValidationError::InvalidRecord { index: 0, .. })
        ));
    }

    #[test]
    fn import_keeps_optional_ids() {
        let quotes = parse_import(r#"[{"id": 4, "text": "A", "category": "X"}]"#).unwrap();
        assert_eq!(quotes, vec![Quote::new("A", "X").with_id(4)]);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = read_import(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, TransferError::Io { .. }));
    }
}
