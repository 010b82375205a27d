use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use bookchain_crypto::ContentHasher;
use bookchain_types::{Book, BookDraft};
use tracing::debug;

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("registry {0} lock poisoned")]
    LockPoisoned(&'static str),
}

/// Result of registering a book.
///
/// Ids are derived from `isbn + publish_date`, so registering the same pair
/// twice targets the same entry. The second registration replaces the stored
/// book in place rather than adding a duplicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Registration {
    Created(Book),
    Replaced(Book),
}

impl Registration {
    pub fn book(&self) -> &Book {
        match self {
            Self::Created(book) | Self::Replaced(book) => book,
        }
    }

    pub fn into_book(self) -> Book {
        match self {
            Self::Created(book) | Self::Replaced(book) => book,
        }
    }

    pub fn is_replacement(&self) -> bool {
        matches!(self, Self::Replaced(_))
    }
}

/// Boundary for the book catalogue.
pub trait BookRegistry: Send + Sync {
    fn register(&self, draft: BookDraft) -> Result<Registration, RegistryError>;

    /// All books in first-registration order.
    fn all(&self) -> Result<Vec<Book>, RegistryError>;

    fn get(&self, id: &str) -> Result<Option<Book>, RegistryError>;
}

/// Derive a book id: lowercase hex SHA-256 of `isbn + publish_date`.
pub fn derive_book_id(draft: &BookDraft) -> String {
    ContentHasher::hash_hex(&[draft.isbn.as_bytes(), draft.publish_date.as_bytes()])
}

/// In-memory book registry with single-writer registration.
#[derive(Default)]
pub struct InMemoryBookRegistry {
    inner: RwLock<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    books: Vec<Book>,
    by_id: HashMap<String, usize>,
}

impl InMemoryBookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RegistryState>, RegistryError> {
        self.inner
            .read()
            .map_err(|_| RegistryError::LockPoisoned("read"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RegistryState>, RegistryError> {
        self.inner
            .write()
            .map_err(|_| RegistryError::LockPoisoned("write"))
    }
}

impl BookRegistry for InMemoryBookRegistry {
    fn register(&self, draft: BookDraft) -> Result<Registration, RegistryError> {
        let id = derive_book_id(&draft);
        let book = draft.into_book(id);

        let mut state = self.write()?;
        let existing = state.by_id.get(&book.id).copied();
        if let Some(index) = existing {
            debug!(id = %book.id, "book re-registered; replacing entry");
            state.books[index] = book.clone();
            return Ok(Registration::Replaced(book));
        }

        let index = state.books.len();
        state.by_id.insert(book.id.clone(), index);
        state.books.push(book.clone());
        debug!(id = %book.id, total = index + 1, "book registered");
        Ok(Registration::Created(book))
    }

    fn all(&self) -> Result<Vec<Book>, RegistryError> {
        Ok(self.read()?.books.clone())
    }

    fn get(&self, id: &str) -> Result<Option<Book>, RegistryError> {
        let state = self.read()?;
        Ok(state.by_id.get(id).map(|&index| state.books[index].clone()))
    }
}
