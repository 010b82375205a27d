use serde::{Deserialize, Serialize};

/// A registered book. `id` is derived from `isbn + publish_date` by the registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publish_date: String,
    pub isbn: String,
}

/// Registration request body: a book without its id.
///
/// Any `id` a client sends is ignored; unknown fields are dropped by serde.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub publish_date: String,
    pub isbn: String,
}

impl BookDraft {
    pub fn into_book(self, id: impl Into<String>) -> Book {
        Book {
            id: id.into(),
            title: self.title,
            author: self.author,
            publish_date: self.publish_date,
            isbn: self.isbn,
        }
    }
}
