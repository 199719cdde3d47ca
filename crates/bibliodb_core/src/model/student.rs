//! Student record.

use super::RecordId;
use serde::{Deserialize, Serialize};

/// Library member who can borrow books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: RecordId,
    pub name: String,
    /// Free-text school grade, e.g. `10th`.
    pub grade: String,
}

impl Student {
    pub fn new(id: RecordId, name: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            grade: grade.into(),
        }
    }
}
