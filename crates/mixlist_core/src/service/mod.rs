//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into list, editor, and quote use-cases.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod editor_service;
pub mod list_service;
pub mod quote_service;
