//! Core domain logic for BiblioDB.
//! This crate is the single source of truth for catalog invariants.

pub mod logging;
pub mod model;
pub mod persist;
pub mod query;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::author::Author;
pub use model::book::Book;
pub use model::loan::Loan;
pub use model::student::Student;
pub use model::{RecordId, RecordKind};
pub use persist::{
    CatalogStorage, CsvCatalogStorage, LoadReport, LoadedCatalog, PersistError, PersistResult,
    SkippedLine, DEFAULT_DATA_DIR,
};
pub use query::reports::{
    active_loans_for_student, author_ranking_by_book_count, ActiveLoan, AuthorRank,
    DEFAULT_RANKING_TOP_N,
};
pub use service::catalog_service::{CatalogService, ServiceError, ServiceResult};
pub use store::catalog_store::{CatalogStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
