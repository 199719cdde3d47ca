//! Catalog domain model.
//!
//! # Responsibility
//! - Define the four record shapes held by the catalog store.
//! - Name each collection for error reporting and log events.
//!
//! # Invariants
//! - Every record is identified by a `RecordId` unique within its own
//!   collection; ids of different kinds may collide.
//! - Identity is immutable once a record is stored.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod author;
pub mod book;
pub mod loan;
pub mod student;

/// Identifier shared by all record kinds.
pub type RecordId = i64;

/// Collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Author,
    Book,
    Student,
    Loan,
}

impl RecordKind {
    /// Stable lowercase name used in messages and log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Book => "book",
            Self::Student => "student",
            Self::Loan => "loan",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
