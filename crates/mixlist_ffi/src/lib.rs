//! Flutter-facing bridge over `mixlist_core`.

pub mod api;
