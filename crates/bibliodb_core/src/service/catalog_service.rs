//! Catalog session service.
//!
//! # Responsibility
//! - Own one `CatalogStore` for the lifetime of a session.
//! - Load it from storage at session start and save it on request.
//! - Forward CRUD and report calls, emitting one log event per mutation.
//!
//! # Invariants
//! - The service never bypasses store validation.
//! - `is_dirty()` is true iff a mutation succeeded since the last load/save.
//! - Rejected mutations leave both store and dirty flag unchanged.

use crate::model::author::Author;
use crate::model::book::Book;
use crate::model::loan::Loan;
use crate::model::student::Student;
use crate::model::{RecordId, RecordKind};
use crate::persist::{CatalogStorage, LoadReport, PersistError};
use crate::query::reports::{
    active_loans_for_student, author_ranking_by_book_count, ActiveLoan, AuthorRank,
};
use crate::store::catalog_store::{CatalogStore, StoreError, StoreResult};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Operation rejected by store validation.
    Store(StoreError),
    /// Loading or saving failed.
    Persist(PersistError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<PersistError> for ServiceError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// Use-case service around one catalog session.
pub struct CatalogService<S: CatalogStorage> {
    storage: S,
    store: CatalogStore,
    load_report: LoadReport,
    dirty: bool,
}

impl<S: CatalogStorage> CatalogService<S> {
    /// Loads the catalog from `storage` and starts a session.
    pub fn open(storage: S) -> ServiceResult<Self> {
        let loaded = storage.load()?;
        if !loaded.report.is_clean() {
            warn!(
                "event=session_open module=service status=partial skipped_lines={}",
                loaded.report.skipped.len()
            );
        }
        Ok(Self {
            storage,
            store: loaded.store,
            load_report: loaded.report,
            dirty: false,
        })
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Lines skipped while opening this session.
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes every collection to storage.
    pub fn save(&mut self) -> ServiceResult<()> {
        self.storage.save(&self.store)?;
        self.dirty = false;
        Ok(())
    }

    /// Saves only when a mutation happened since the last load/save.
    ///
    /// Returns whether a save was performed.
    pub fn save_if_dirty(&mut self) -> ServiceResult<bool> {
        if !self.dirty {
            debug!("event=session_save module=service status=skipped reason=clean");
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn add_author(&mut self, author: Author) -> ServiceResult<()> {
        let id = author.id;
        let result = self.store.add_author(author);
        self.record("add", RecordKind::Author, id, result)
    }

    pub fn update_author(
        &mut self,
        id: RecordId,
        name: impl Into<String>,
        nationality: impl Into<String>,
    ) -> ServiceResult<()> {
        let result = self.store.update_author(id, name, nationality);
        self.record("update", RecordKind::Author, id, result)
    }

    pub fn delete_author(&mut self, id: RecordId) -> ServiceResult<Author> {
        let result = self.store.delete_author(id);
        self.record("delete", RecordKind::Author, id, result)
    }

    pub fn add_book(&mut self, book: Book) -> ServiceResult<()> {
        let id = book.id;
        let result = self.store.add_book(book);
        self.record("add", RecordKind::Book, id, result)
    }

    pub fn update_book(
        &mut self,
        id: RecordId,
        title: impl Into<String>,
        isbn: impl Into<String>,
        year: i32,
        author_id: RecordId,
    ) -> ServiceResult<()> {
        let result = self.store.update_book(id, title, isbn, year, author_id);
        self.record("update", RecordKind::Book, id, result)
    }

    pub fn delete_book(&mut self, id: RecordId) -> ServiceResult<Book> {
        let result = self.store.delete_book(id);
        self.record("delete", RecordKind::Book, id, result)
    }

    pub fn add_student(&mut self, student: Student) -> ServiceResult<()> {
        let id = student.id;
        let result = self.store.add_student(student);
        self.record("add", RecordKind::Student, id, result)
    }

    pub fn update_student(
        &mut self,
        id: RecordId,
        name: impl Into<String>,
        grade: impl Into<String>,
    ) -> ServiceResult<()> {
        let result = self.store.update_student(id, name, grade);
        self.record("update", RecordKind::Student, id, result)
    }

    pub fn delete_student(&mut self, id: RecordId) -> ServiceResult<Student> {
        let result = self.store.delete_student(id);
        self.record("delete", RecordKind::Student, id, result)
    }

    pub fn add_loan(&mut self, loan: Loan) -> ServiceResult<()> {
        let id = loan.id;
        let result = self.store.add_loan(loan);
        self.record("add", RecordKind::Loan, id, result)
    }

    pub fn return_loan(
        &mut self,
        id: RecordId,
        return_date: impl Into<String>,
    ) -> ServiceResult<()> {
        let result = self.store.return_loan(id, return_date);
        self.record("return", RecordKind::Loan, id, result)
    }

    pub fn delete_loan(&mut self, id: RecordId) -> ServiceResult<Loan> {
        let result = self.store.delete_loan(id);
        self.record("delete", RecordKind::Loan, id, result)
    }

    pub fn is_book_available(&self, book_id: RecordId) -> bool {
        self.store.is_book_available(book_id)
    }

    pub fn active_loans_for_student(&self, student_id: RecordId) -> Vec<ActiveLoan<'_>> {
        active_loans_for_student(&self.store, student_id)
    }

    pub fn author_ranking_by_book_count(&self, top_n: usize) -> Vec<AuthorRank> {
        author_ranking_by_book_count(&self.store, top_n)
    }

    fn record<T>(
        &mut self,
        op: &'static str,
        kind: RecordKind,
        id: RecordId,
        result: StoreResult<T>,
    ) -> ServiceResult<T> {
        match result {
            Ok(value) => {
                self.dirty = true;
                info!("event=record_{op} module=service status=ok kind={kind} id={id}");
                Ok(value)
            }
            Err(err) => {
                info!(
                    "event=record_{op} module=service status=rejected kind={kind} id={id} error_code={}",
                    err.code()
                );
                Err(err.into())
            }
        }
    }
}
