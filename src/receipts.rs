//! Receipts and their line items
//!
//! The receipt service (upload, listing, line-item extraction) lives outside
//! the game. It is reached through [`ReceiptSource`]; the types here match
//! the JSON the service returns.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// An uploaded receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: u32,
    /// Image path relative to the asset root
    pub path: String,
}

/// One purchased item on a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub price: f64,
    /// Cropped image of the line
    pub path: String,
    #[serde(default)]
    pub name: String,
}

/// Decode a `GET /receipt` response body
pub fn parse_receipts(json: &str) -> Result<Vec<Receipt>, SourceError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a `GET /receipt/{id}` response body
pub fn parse_line_items(json: &str) -> Result<Vec<LineItem>, SourceError> {
    Ok(serde_json::from_str(json)?)
}

/// The receipt service
pub trait ReceiptSource {
    /// All receipts uploaded so far
    fn list_receipts(&self) -> Result<Vec<Receipt>, SourceError>;

    /// Upload a receipt image, returning its id
    fn upload(&mut self, filename: &str, contents: &[u8]) -> Result<u32, SourceError>;

    /// Line items of one receipt, in the order they appear on it
    fn line_items(&self, id: u32) -> Result<Vec<LineItem>, SourceError>;
}

#[derive(Debug, Clone)]
struct StoredReceipt {
    receipt: Receipt,
    items: Vec<LineItem>,
}

/// Receipt service kept in memory.
///
/// Stands in for the real service in tests and the demo binary. Uploaded
/// contents are expected to be the already-extracted line items as JSON.
/// Uploading identical contents twice returns the first receipt's id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReceipts {
    receipts: Vec<StoredReceipt>,
    next_id: u32,
}

impl InMemoryReceipts {
    pub fn new() -> Self {
        Self {
            receipts: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a receipt directly, bypassing upload
    pub fn with_receipt(mut self, path: impl Into<String>, items: Vec<LineItem>) -> Self {
        self.insert(path.into(), items);
        self
    }

    pub fn len(&self) -> usize {
        self.receipts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }

    fn insert(&mut self, path: String, items: Vec<LineItem>) -> u32 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.receipts.push(StoredReceipt {
            receipt: Receipt { id, path },
            items,
        });
        id
    }
}

impl ReceiptSource for InMemoryReceipts {
    fn list_receipts(&self) -> Result<Vec<Receipt>, SourceError> {
        Ok(self.receipts.iter().map(|r| r.receipt.clone()).collect())
    }

    fn upload(&mut self, filename: &str, contents: &[u8]) -> Result<u32, SourceError> {
        let path = content_path(filename, contents);
        if let Some(existing) = self.receipts.iter().find(|r| r.receipt.path == path) {
            log::info!("Receipt {} already uploaded as {}", filename, existing.receipt.id);
            return Ok(existing.receipt.id);
        }

        let json = std::str::from_utf8(contents)
            .map_err(|_| SourceError::Rejected(format!("{} is not a processed receipt", filename)))?;
        let items = parse_line_items(json)?;
        let id = self.insert(path, items);
        log::info!("Uploaded receipt {} as {}", filename, id);
        Ok(id)
    }

    fn line_items(&self, id: u32) -> Result<Vec<LineItem>, SourceError> {
        self.receipts
            .iter()
            .find(|r| r.receipt.id == id)
            .map(|r| r.items.clone())
            .ok_or(SourceError::UnknownReceipt(id))
    }
}

/// Storage path derived from the contents, so re-uploads collide.
///
/// `DefaultHasher` output can change between Rust releases; the path only has
/// to be stable for the lifetime of one process.
fn content_path(filename: &str, contents: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    contents.hash(&mut hasher);
    let extension = filename.rsplit('.').next().unwrap_or_default();
    format!("images/{:016x}.{}", hasher.finish(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS_JSON: &str = r#"[
        {"id": 1, "path": "images/a.png", "price": 3.49, "name": "Bread", "receipt_id": 7},
        {"id": 2, "path": "images/b.png", "price": 1.0, "name": "Eggs", "receipt_id": 7}
    ]"#;

    #[test]
    fn test_parse_line_items_ignores_extra_fields() {
        let items = parse_line_items(ITEMS_JSON).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Bread");
        assert_eq!(items[1].price, 1.0);
    }

    #[test]
    fn test_parse_receipts() {
        let receipts = parse_receipts(r#"[{"id": 3, "path": "images/x.jpg"}]"#).unwrap();
        assert_eq!(
            receipts,
            vec![Receipt {
                id: 3,
                path: "images/x.jpg".into()
            }]
        );
    }

    #[test]
    fn test_parse_garbage_is_decode_error() {
        assert!(matches!(parse_receipts("<html>"), Err(SourceError::Decode(_))));
    }

    #[test]
    fn test_upload_then_fetch() {
        let mut source = InMemoryReceipts::new();
        let id = source.upload("groceries.json", ITEMS_JSON.as_bytes()).unwrap();
        assert_eq!(source.list_receipts().unwrap().len(), 1);
        assert_eq!(source.line_items(id).unwrap().len(), 2);
        assert!(source.list_receipts().unwrap()[0].path.ends_with(".json"));
    }

    #[test]
    fn test_duplicate_upload_returns_same_id() {
        let mut source = InMemoryReceipts::new();
        let first = source.upload("a.json", ITEMS_JSON.as_bytes()).unwrap();
        let second = source.upload("a.json", ITEMS_JSON.as_bytes()).unwrap();
        assert_eq!(first, second);
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_unknown_receipt() {
        let source = InMemoryReceipts::new();
        assert!(matches!(source.line_items(42), Err(SourceError::UnknownReceipt(42))));
    }

    #[test]
    fn test_bad_upload_rejected() {
        let mut source = InMemoryReceipts::new();
        assert!(source.upload("photo.png", &[0xff, 0xd8, 0xff]).is_err());
        assert!(source.is_empty());
    }
}
