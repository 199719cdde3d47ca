//! Directory of four CSV files backing a catalog.
//!
//! # Responsibility
//! - Map each collection to one header-prefixed CSV file.
//! - Replace files atomically on save (write `.tmp`, then rename).
//!
//! # Invariants
//! - The first record of every file is a header and is never parsed.
//! - Records with too few fields, unparsable numbers or invalid UTF-8 are
//!   skipped and reported, never fatal.
//! - Quoted fields may span lines; records are split outside quotes only.
//! - A missing file loads as an empty collection.

use super::csv_codec::{join_fields, split_line, split_records};
use super::{CatalogStorage, LoadReport, LoadedCatalog, PersistError, PersistResult, SkippedLine};
use crate::model::author::Author;
use crate::model::book::Book;
use crate::model::loan::Loan;
use crate::model::student::Student;
use crate::model::RecordKind;
use crate::store::catalog_store::CatalogStore;
use log::{error, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

/// Relative directory used when no data directory is configured.
pub const DEFAULT_DATA_DIR: &str = "./data";

pub const AUTHORS_FILE_NAME: &str = "authors.csv";
pub const BOOKS_FILE_NAME: &str = "books.csv";
pub const STUDENTS_FILE_NAME: &str = "students.csv";
pub const LOANS_FILE_NAME: &str = "loans.csv";

const AUTHORS_HEADER: &str = "id,name,nationality";
const BOOKS_HEADER: &str = "id,title,isbn,year,author_id";
const STUDENTS_HEADER: &str = "id,name,grade";
const LOANS_HEADER: &str = "id,book_id,student_id,loan_date,return_date";

/// CSV-backed catalog storage rooted at one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvCatalogStorage {
    data_dir: PathBuf,
}

impl CsvCatalogStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn file_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    fn load_all(&self, report: &mut LoadReport) -> PersistResult<CatalogStore> {
        let authors = load_records(
            &self.file_path(AUTHORS_FILE_NAME),
            RecordKind::Author,
            3,
            parse_author,
            report,
        )?;
        let books = load_records(
            &self.file_path(BOOKS_FILE_NAME),
            RecordKind::Book,
            5,
            parse_book,
            report,
        )?;
        let students = load_records(
            &self.file_path(STUDENTS_FILE_NAME),
            RecordKind::Student,
            3,
            parse_student,
            report,
        )?;
        let loans = load_records(
            &self.file_path(LOANS_FILE_NAME),
            RecordKind::Loan,
            5,
            parse_loan,
            report,
        )?;
        Ok(CatalogStore::from_parts(authors, books, students, loans))
    }

    fn save_all(&self, store: &CatalogStore) -> PersistResult<()> {
        fs::create_dir_all(&self.data_dir).map_err(|source| PersistError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        write_file_atomic(
            &self.file_path(AUTHORS_FILE_NAME),
            AUTHORS_HEADER,
            store.authors().iter().map(|author| {
                join_fields([
                    author.id.to_string().as_str(),
                    author.name.as_str(),
                    author.nationality.as_str(),
                ])
            }),
        )?;
        write_file_atomic(
            &self.file_path(BOOKS_FILE_NAME),
            BOOKS_HEADER,
            store.books().iter().map(|book| {
                join_fields([
                    book.id.to_string().as_str(),
                    book.title.as_str(),
                    book.isbn.as_str(),
                    book.year.to_string().as_str(),
                    book.author_id.to_string().as_str(),
                ])
            }),
        )?;
        write_file_atomic(
            &self.file_path(STUDENTS_FILE_NAME),
            STUDENTS_HEADER,
            store.students().iter().map(|student| {
                join_fields([
                    student.id.to_string().as_str(),
                    student.name.as_str(),
                    student.grade.as_str(),
                ])
            }),
        )?;
        write_file_atomic(
            &self.file_path(LOANS_FILE_NAME),
            LOANS_HEADER,
            store.loans().iter().map(|loan| {
                join_fields([
                    loan.id.to_string().as_str(),
                    loan.book_id.to_string().as_str(),
                    loan.student_id.to_string().as_str(),
                    loan.loan_date.as_str(),
                    loan.return_date.as_str(),
                ])
            }),
        )?;
        Ok(())
    }
}

impl Default for CsvCatalogStorage {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl CatalogStorage for CsvCatalogStorage {
    fn load(&self) -> PersistResult<LoadedCatalog> {
        let started_at = Instant::now();
        info!(
            "event=catalog_load module=persist status=start data_dir={}",
            self.data_dir.display()
        );

        let mut report = LoadReport::default();
        match self.load_all(&mut report) {
            Ok(store) => {
                info!(
                    "event=catalog_load module=persist status=ok duration_ms={} authors={} books={} students={} loans={} skipped_lines={}",
                    started_at.elapsed().as_millis(),
                    store.authors().len(),
                    store.books().len(),
                    store.students().len(),
                    store.loans().len(),
                    report.skipped.len()
                );
                Ok(LoadedCatalog { store, report })
            }
            Err(err) => {
                error!(
                    "event=catalog_load module=persist status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&self, store: &CatalogStore) -> PersistResult<()> {
        let started_at = Instant::now();
        info!(
            "event=catalog_save module=persist status=start data_dir={}",
            self.data_dir.display()
        );

        let result = self.save_all(store);
        match &result {
            Ok(()) => info!(
                "event=catalog_save module=persist status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=catalog_save module=persist status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn load_records<T>(
    path: &Path,
    kind: RecordKind,
    min_fields: usize,
    parse: fn(&[String]) -> Option<T>,
    report: &mut LoadReport,
) -> PersistResult<Vec<T>> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut records = Vec::new();
    for raw in split_records(&content).into_iter().skip(1) {
        if raw.bytes.is_empty() {
            continue;
        }

        let reason = match decode_record(raw.bytes, min_fields, parse) {
            Ok(record) => {
                records.push(record);
                continue;
            }
            Err(reason) => reason,
        };

        warn!(
            "event=catalog_load_skip module=persist kind={} file={} line={} reason={}",
            kind,
            path.display(),
            raw.line_number,
            reason
        );
        report.skipped.push(SkippedLine {
            kind,
            line_number: raw.line_number,
            reason,
        });
    }

    Ok(records)
}

/// Decodes one record, or explains why it is skipped.
fn decode_record<T>(
    bytes: &[u8],
    min_fields: usize,
    parse: fn(&[String]) -> Option<T>,
) -> Result<T, String> {
    let line = std::str::from_utf8(bytes)
        .map_err(|_| "line is not valid UTF-8".to_string())?;
    let fields = split_line(line);
    if fields.len() < min_fields {
        return Err(format!("expected {min_fields} fields, found {}", fields.len()));
    }
    parse(&fields).ok_or_else(|| "numeric field does not parse".to_string())
}

fn write_file_atomic(
    path: &Path,
    header: &str,
    lines: impl Iterator<Item = String>,
) -> PersistResult<()> {
    let mut output = String::from(header);
    output.push('\n');
    for line in lines {
        output.push_str(&line);
        output.push('\n');
    }

    let tmp_path = path.with_extension("csv.tmp");
    let io_error = |source: std::io::Error| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp_path, output).map_err(io_error)?;
    fs::rename(&tmp_path, path).map_err(io_error)?;
    Ok(())
}

fn parse_number<N: FromStr>(field: &str) -> Option<N> {
    field.trim().parse().ok()
}

fn parse_author(fields: &[String]) -> Option<Author> {
    Some(Author::new(
        parse_number(&fields[0])?,
        fields[1].as_str(),
        fields[2].as_str(),
    ))
}

fn parse_book(fields: &[String]) -> Option<Book> {
    Some(Book::new(
        parse_number(&fields[0])?,
        fields[1].as_str(),
        fields[2].as_str(),
        parse_number(&fields[3])?,
        parse_number(&fields[4])?,
    ))
}

fn parse_student(fields: &[String]) -> Option<Student> {
    Some(Student::new(
        parse_number(&fields[0])?,
        fields[1].as_str(),
        fields[2].as_str(),
    ))
}

fn parse_loan(fields: &[String]) -> Option<Loan> {
    let mut loan = Loan::new(
        parse_number(&fields[0])?,
        parse_number(&fields[1])?,
        parse_number(&fields[2])?,
        fields[3].as_str(),
    );
    loan.return_date = fields[4].clone();
    Some(loan)
}

#[cfg(test)]
mod tests {
    use super::{parse_book, parse_loan};

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parse_book_rejects_non_numeric_year() {
        assert!(parse_book(&fields(&["1", "T", "I", "nineteen", "1"])).is_none());
    }

    #[test]
    fn parse_loan_keeps_return_date() {
        let row = fields(&["3", "1", "2", "2024-01-01", "2024-02-01"]);
        let loan = parse_loan(&row).unwrap();
        assert_eq!(loan.return_date, "2024-02-01");
        assert!(!loan.is_active());
    }
}
