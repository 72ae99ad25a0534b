//! Outbound network clients.

pub mod quote_client;
