//! Read-only catalog reports.
//!
//! # Responsibility
//! - Derive per-student and per-author views from store collections.
//! - Keep report shaping inside core so callers only format output.

pub mod reports;
