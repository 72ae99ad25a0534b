//! Record model for the three stored kinds and their merged list projection.
//!
//! # Responsibility
//! - Define the canonical record shapes persisted by the store.
//! - Provide the closed `ListItem` union used by the aggregated list.
//!
//! # Invariants
//! - Every stored record carries a store-issued `RecordId`.
//! - Identifiers are unique per kind only; kinds do not share an id space.

pub mod kind;
pub mod record;
