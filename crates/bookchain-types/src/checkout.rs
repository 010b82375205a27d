use serde::{Deserialize, Serialize};

/// One book-checkout event, carried as a block's payload.
///
/// All identifiers are opaque. Nothing here is checked against the book
/// registry. Field declaration order is the canonical serialization order and
/// therefore part of every block hash.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutRecord {
    pub book_id: String,
    pub user_id: String,
    pub checkout_date: String,
    /// Set only on the synthetic genesis payload.
    pub is_genesis: bool,
}

impl CheckoutRecord {
    pub fn new(
        book_id: impl Into<String>,
        user_id: impl Into<String>,
        checkout_date: impl Into<String>,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            user_id: user_id.into(),
            checkout_date: checkout_date.into(),
            is_genesis: false,
        }
    }

    /// The marker payload stored in the genesis block.
    pub fn genesis() -> Self {
        Self {
            is_genesis: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_marker() {
        let g = CheckoutRecord::genesis();
        assert!(g.is_genesis);
        assert!(g.book_id.is_empty());
        assert!(g.user_id.is_empty());
    }

    #[test]
    fn field_order_is_stable() {
        let record = CheckoutRecord::new("b1", "u1", "2024-01-01");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"book_id":"b1","user_id":"u1","checkout_date":"2024-01-01","is_genesis":false}"#
        );
    }

    #[test]
    fn missing_fields_default() {
        let record: CheckoutRecord = serde_json::from_str(r#"{"book_id":"b9"}"#).unwrap();
        assert_eq!(record.book_id, "b9");
        assert!(record.user_id.is_empty());
        assert!(!record.is_genesis);
    }
}
