//! Loan record and its active/returned lifecycle.
//!
//! # Responsibility
//! - Link one book to one student for a borrowing period.
//! - Encode the active state as an empty `return_date`.
//!
//! # Invariants
//! - A loan is active iff `return_date` is empty.
//! - Returning is one-way: once `return_date` is set it is never cleared.
//! - At most one active loan exists per book (enforced by the store).

use super::RecordId;
use serde::{Deserialize, Serialize};

/// Borrowing of a book by a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: RecordId,
    /// Foreign key into the book collection.
    pub book_id: RecordId,
    /// Foreign key into the student collection.
    pub student_id: RecordId,
    pub loan_date: String,
    /// Empty while the loan is outstanding.
    pub return_date: String,
}

impl Loan {
    /// Creates an active loan.
    pub fn new(
        id: RecordId,
        book_id: RecordId,
        student_id: RecordId,
        loan_date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            book_id,
            student_id,
            loan_date: loan_date.into(),
            return_date: String::new(),
        }
    }

    /// Returns whether the book is still out.
    pub fn is_active(&self) -> bool {
        self.return_date.is_empty()
    }
}
