//! In-memory relational record store.
//!
//! # Responsibility
//! - Hold authors, books, students and loans for one session.
//! - Enforce uniqueness and referential integrity on every mutation.
//!
//! # Invariants
//! - Failed operations leave every collection unchanged.
//! - Referential deletes are rejected, never cascaded.

pub mod catalog_store;
