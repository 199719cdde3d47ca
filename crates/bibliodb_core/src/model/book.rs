//! Book record.
//!
//! # Invariants
//! - `author_id` resolves to an existing author whenever the book is added
//!   or updated through the store.
//! - `isbn` is free text; neither format nor uniqueness is checked.

use super::RecordId;
use serde::{Deserialize, Serialize};

/// Catalog book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub isbn: String,
    /// Publication year.
    pub year: i32,
    /// Foreign key into the author collection.
    pub author_id: RecordId,
}

impl Book {
    pub fn new(
        id: RecordId,
        title: impl Into<String>,
        isbn: impl Into<String>,
        year: i32,
        author_id: RecordId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            isbn: isbn.into(),
            year,
            author_id,
        }
    }
}
