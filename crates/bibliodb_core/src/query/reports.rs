//! Loan and author reports over a `CatalogStore`.
//!
//! # Invariants
//! - Reports never mutate the store.
//! - Active-loan listings follow loan insertion order.
//! - Ranking order is deterministic: `book_count DESC, author_id ASC`.

use crate::model::book::Book;
use crate::model::RecordId;
use crate::store::catalog_store::CatalogStore;
use std::collections::BTreeMap;

/// Number of authors shown by the ranking when the caller has no preference.
pub const DEFAULT_RANKING_TOP_N: usize = 10;

/// Outstanding loan of one book, as seen from the borrowing student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLoan<'a> {
    pub book: &'a Book,
    pub loan_date: &'a str,
}

/// One row of the author ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRank {
    pub author_id: RecordId,
    /// Author name, or `Author#<id>` when the author no longer resolves.
    pub author_name: String,
    pub book_count: usize,
}

/// Lists books a student currently holds, paired with their loan date.
///
/// Loans whose book id does not resolve are skipped.
pub fn active_loans_for_student(
    store: &CatalogStore,
    student_id: RecordId,
) -> Vec<ActiveLoan<'_>> {
    store
        .loans()
        .iter()
        .filter(|loan| loan.student_id == student_id && loan.is_active())
        .filter_map(|loan| {
            store.book(loan.book_id).map(|book| ActiveLoan {
                book,
                loan_date: loan.loan_date.as_str(),
            })
        })
        .collect()
}

/// Ranks authors by number of catalogued books and keeps the first `top_n`.
///
/// Authors without books are not listed. Equal counts are ordered by
/// ascending author id.
pub fn author_ranking_by_book_count(store: &CatalogStore, top_n: usize) -> Vec<AuthorRank> {
    if top_n == 0 {
        return Vec::new();
    }

    let mut counts: BTreeMap<RecordId, usize> = BTreeMap::new();
    for book in store.books() {
        *counts.entry(book.author_id).or_default() += 1;
    }

    let mut ranked: Vec<(RecordId, usize)> = counts.into_iter().collect();
    // Stable sort keeps the BTreeMap's ascending id order among ties.
    ranked.sort_by(|left, right| right.1.cmp(&left.1));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(author_id, book_count)| AuthorRank {
            author_id,
            author_name: store
                .author(author_id)
                .map(|author| author.name.clone())
                .unwrap_or_else(|| placeholder_author_name(author_id)),
            book_count,
        })
        .collect()
}

fn placeholder_author_name(author_id: RecordId) -> String {
    format!("Author#{author_id}")
}
