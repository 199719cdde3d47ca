//! Author record.

use super::RecordId;
use serde::{Deserialize, Serialize};

/// Book author. Referenced by `Book::author_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: RecordId,
    pub name: String,
    pub nationality: String,
}

impl Author {
    pub fn new(id: RecordId, name: impl Into<String>, nationality: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            nationality: nationality.into(),
        }
    }
}
