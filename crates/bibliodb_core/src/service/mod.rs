//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations, reports and persistence into session APIs.
//! - Keep CLI callers decoupled from storage details.

pub mod catalog_service;
