//! Flat-file persistence for the catalog store.
//!
//! # Responsibility
//! - Define the storage contract used to load and save a whole catalog.
//! - Report persistence failures and skipped input lines.
//!
//! # Invariants
//! - Loading never fails on malformed lines; they are skipped and reported.
//! - Saving writes every collection in store order.

use crate::model::RecordKind;
use crate::store::catalog_store::CatalogStore;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod csv_codec;
mod csv_files;

pub use csv_files::{
    CsvCatalogStorage, AUTHORS_FILE_NAME, BOOKS_FILE_NAME, DEFAULT_DATA_DIR, LOANS_FILE_NAME,
    STUDENTS_FILE_NAME,
};

pub type PersistResult<T> = Result<T, PersistError>;

#[derive(Debug)]
pub enum PersistError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Input line dropped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub kind: RecordKind,
    /// 1-based line number within the source file, header included.
    pub line_number: usize,
    pub reason: String,
}

/// Outcome details of one catalog load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    /// Returns whether every non-blank line was loaded.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn skipped_count(&self, kind: RecordKind) -> usize {
        self.skipped.iter().filter(|line| line.kind == kind).count()
    }
}

/// Catalog and the report produced while loading it.
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub store: CatalogStore,
    pub report: LoadReport,
}

/// Whole-catalog storage backend.
pub trait CatalogStorage {
    /// Reads all collections. Missing sources yield empty collections.
    fn load(&self) -> PersistResult<LoadedCatalog>;
    /// Writes all collections, replacing previous contents.
    fn save(&self, store: &CatalogStore) -> PersistResult<()>;
}
