//! Catalog store over four ordered collections.
//!
//! # Responsibility
//! - Provide validated CRUD over authors, books, students and loans.
//! - Answer the availability question that guards loan creation.
//!
//! # Invariants
//! - Ids are unique within each collection.
//! - `Book::author_id` resolves at add/update time.
//! - `Loan::book_id` and `Loan::student_id` resolve at add time.
//! - At most one active loan per book.
//! - Insertion order is preserved; lookups are linear scans.

use crate::model::author::Author;
use crate::model::book::Book;
use crate::model::loan::Loan;
use crate::model::student::Student;
use crate::model::{RecordId, RecordKind};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Validation failure reported by a store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record of this kind already uses the id.
    DuplicateId { kind: RecordKind, id: RecordId },
    /// No record of this kind has the id.
    NotFound { kind: RecordKind, id: RecordId },
    /// Author cannot be deleted while a book points at it.
    ReferencedByBook(RecordId),
    /// Book references an author that does not exist.
    UnknownAuthor(RecordId),
    /// Book cannot be deleted while it is out on loan.
    BookOnLoan(RecordId),
    /// Student cannot be deleted while any loan, active or returned, points at it.
    HasLoans(RecordId),
    /// Loan references a book that does not exist.
    UnknownBook(RecordId),
    /// Loan references a student that does not exist.
    UnknownStudent(RecordId),
    /// Book already has an active loan.
    BookUnavailable(RecordId),
    /// Loan has already been returned.
    AlreadyReturned(RecordId),
    /// Loan cannot be deleted while active.
    LoanActive(RecordId),
    /// Return date must be non-empty.
    EmptyReturnDate(RecordId),
}

impl StoreError {
    /// Stable snake_case code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "duplicate_id",
            Self::NotFound { .. } => "not_found",
            Self::ReferencedByBook(_) => "referenced_by_book",
            Self::UnknownAuthor(_) => "unknown_author",
            Self::BookOnLoan(_) => "book_on_loan",
            Self::HasLoans(_) => "has_loans",
            Self::UnknownBook(_) => "unknown_book",
            Self::UnknownStudent(_) => "unknown_student",
            Self::BookUnavailable(_) => "book_unavailable",
            Self::AlreadyReturned(_) => "already_returned",
            Self::LoanActive(_) => "loan_active",
            Self::EmptyReturnDate(_) => "empty_return_date",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId { kind, id } => write!(f, "duplicate {kind} id: {id}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::ReferencedByBook(id) => {
                write!(f, "author {id} is referenced by at least one book")
            }
            Self::UnknownAuthor(id) => write!(f, "unknown author: {id}"),
            Self::BookOnLoan(id) => write!(f, "book {id} has an active loan"),
            Self::HasLoans(id) => write!(f, "student {id} has loan records"),
            Self::UnknownBook(id) => write!(f, "unknown book: {id}"),
            Self::UnknownStudent(id) => write!(f, "unknown student: {id}"),
            Self::BookUnavailable(id) => write!(f, "book {id} is not available"),
            Self::AlreadyReturned(id) => write!(f, "loan {id} was already returned"),
            Self::LoanActive(id) => write!(f, "loan {id} is still active"),
            Self::EmptyReturnDate(id) => write!(f, "return date for loan {id} cannot be empty"),
        }
    }
}

impl Error for StoreError {}

/// Four related record collections for one catalog session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStore {
    authors: Vec<Author>,
    books: Vec<Book>,
    students: Vec<Student>,
    loans: Vec<Loan>,
}

impl CatalogStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already-persisted collections.
    ///
    /// Persisted data is trusted as-is: neither uniqueness nor references
    /// are rechecked.
    pub fn from_parts(
        authors: Vec<Author>,
        books: Vec<Book>,
        students: Vec<Student>,
        loans: Vec<Loan>,
    ) -> Self {
        Self {
            authors,
            books,
            students,
            loans,
        }
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn author(&self, id: RecordId) -> Option<&Author> {
        self.authors.iter().find(|author| author.id == id)
    }

    pub fn book(&self, id: RecordId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn student(&self, id: RecordId) -> Option<&Student> {
        self.students.iter().find(|student| student.id == id)
    }

    pub fn loan(&self, id: RecordId) -> Option<&Loan> {
        self.loans.iter().find(|loan| loan.id == id)
    }

    /// Returns true iff no active loan references `book_id`.
    ///
    /// Unknown book ids are reported as available.
    pub fn is_book_available(&self, book_id: RecordId) -> bool {
        !self
            .loans
            .iter()
            .any(|loan| loan.book_id == book_id && loan.is_active())
    }

    pub fn add_author(&mut self, author: Author) -> StoreResult<()> {
        if self.author(author.id).is_some() {
            return Err(StoreError::DuplicateId {
                kind: RecordKind::Author,
                id: author.id,
            });
        }
        self.authors.push(author);
        Ok(())
    }

    /// Replaces name and nationality; identity is kept.
    pub fn update_author(
        &mut self,
        id: RecordId,
        name: impl Into<String>,
        nationality: impl Into<String>,
    ) -> StoreResult<()> {
        let author = self
            .authors
            .iter_mut()
            .find(|author| author.id == id)
            .ok_or(StoreError::NotFound {
                kind: RecordKind::Author,
                id,
            })?;
        author.name = name.into();
        author.nationality = nationality.into();
        Ok(())
    }

    pub fn delete_author(&mut self, id: RecordId) -> StoreResult<Author> {
        if self.books.iter().any(|book| book.author_id == id) {
            return Err(StoreError::ReferencedByBook(id));
        }
        remove_by_id(
            &mut self.authors,
            RecordKind::Author,
            id,
            |author| author.id,
        )
    }

    pub fn add_book(&mut self, book: Book) -> StoreResult<()> {
        if self.book(book.id).is_some() {
            return Err(StoreError::DuplicateId {
                kind: RecordKind::Book,
                id: book.id,
            });
        }
        if self.author(book.author_id).is_none() {
            return Err(StoreError::UnknownAuthor(book.author_id));
        }
        self.books.push(book);
        Ok(())
    }

    /// Replaces every mutable book field.
    ///
    /// A missing book is reported before an unresolved author.
    pub fn update_book(
        &mut self,
        id: RecordId,
        title: impl Into<String>,
        isbn: impl Into<String>,
        year: i32,
        author_id: RecordId,
    ) -> StoreResult<()> {
        let index = self
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or(StoreError::NotFound {
                kind: RecordKind::Book,
                id,
            })?;
        if self.author(author_id).is_none() {
            return Err(StoreError::UnknownAuthor(author_id));
        }

        let book = &mut self.books[index];
        book.title = title.into();
        book.isbn = isbn.into();
        book.year = year;
        book.author_id = author_id;
        Ok(())
    }

    pub fn delete_book(&mut self, id: RecordId) -> StoreResult<Book> {
        if !self.is_book_available(id) {
            return Err(StoreError::BookOnLoan(id));
        }
        remove_by_id(&mut self.books, RecordKind::Book, id, |book| book.id)
    }

    pub fn add_student(&mut self, student: Student) -> StoreResult<()> {
        if self.student(student.id).is_some() {
            return Err(StoreError::DuplicateId {
                kind: RecordKind::Student,
                id: student.id,
            });
        }
        self.students.push(student);
        Ok(())
    }

    pub fn update_student(
        &mut self,
        id: RecordId,
        name: impl Into<String>,
        grade: impl Into<String>,
    ) -> StoreResult<()> {
        let student = self
            .students
            .iter_mut()
            .find(|student| student.id == id)
            .ok_or(StoreError::NotFound {
                kind: RecordKind::Student,
                id,
            })?;
        student.name = name.into();
        student.grade = grade.into();
        Ok(())
    }

    /// Deletes a student with no loan history at all.
    pub fn delete_student(&mut self, id: RecordId) -> StoreResult<Student> {
        if self.loans.iter().any(|loan| loan.student_id == id) {
            return Err(StoreError::HasLoans(id));
        }
        remove_by_id(
            &mut self.students,
            RecordKind::Student,
            id,
            |student| student.id,
        )
    }

    /// Appends a new active loan.
    ///
    /// Checks run in order: duplicate id, unknown book, unknown student,
    /// availability. Any return date on the input is discarded.
    pub fn add_loan(&mut self, mut loan: Loan) -> StoreResult<()> {
        if self.loan(loan.id).is_some() {
            return Err(StoreError::DuplicateId {
                kind: RecordKind::Loan,
                id: loan.id,
            });
        }
        if self.book(loan.book_id).is_none() {
            return Err(StoreError::UnknownBook(loan.book_id));
        }
        if self.student(loan.student_id).is_none() {
            return Err(StoreError::UnknownStudent(loan.student_id));
        }
        if !self.is_book_available(loan.book_id) {
            return Err(StoreError::BookUnavailable(loan.book_id));
        }

        loan.return_date.clear();
        self.loans.push(loan);
        Ok(())
    }

    /// Marks an active loan as returned on `return_date`.
    pub fn return_loan(
        &mut self,
        id: RecordId,
        return_date: impl Into<String>,
    ) -> StoreResult<()> {
        let return_date = return_date.into();
        let loan = self
            .loans
            .iter_mut()
            .find(|loan| loan.id == id)
            .ok_or(StoreError::NotFound {
                kind: RecordKind::Loan,
                id,
            })?;
        if !loan.is_active() {
            return Err(StoreError::AlreadyReturned(id));
        }
        if return_date.is_empty() {
            return Err(StoreError::EmptyReturnDate(id));
        }
        loan.return_date = return_date;
        Ok(())
    }

    /// Deletes a returned (historical) loan.
    pub fn delete_loan(&mut self, id: RecordId) -> StoreResult<Loan> {
        if self
            .loans
            .iter()
            .any(|loan| loan.id == id && loan.is_active())
        {
            return Err(StoreError::LoanActive(id));
        }
        remove_by_id(&mut self.loans, RecordKind::Loan, id, |loan| loan.id)
    }
}

fn remove_by_id<T>(
    records: &mut Vec<T>,
    kind: RecordKind,
    id: RecordId,
    id_of: impl Fn(&T) -> RecordId,
) -> StoreResult<T> {
    let index = records
        .iter()
        .position(|record| id_of(record) == id)
        .ok_or(StoreError::NotFound { kind, id })?;
    Ok(records.remove(index))
}
