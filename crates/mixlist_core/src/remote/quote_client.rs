//! Random-quote HTTP client.
//!
//! # Responsibility
//! - Issue one unauthenticated GET against the quote endpoint.
//! - Decode the JSON body into `QuotePayload`.
//!
//! # Invariants
//! - No retry, no pagination; one request per call.
//! - Metadata fields (`id`, `length`, `tags`) are optional and ignored by
//!   callers.

use crate::model::record::NewQuote;
use crate::repo::record_repo::RepoError;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const QUOTE_PATH: &str = "/api/quotes/random";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("quote request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("quote endpoint returned HTTP {0}")]
    Status(u16),
    #[error("malformed quote payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("quote payload has an empty quote or author")]
    EmptyQuote,
    #[error(transparent)]
    Store(#[from] RepoError),
}

/// Body returned by the quote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuotePayload {
    #[serde(default)]
    pub id: Option<i64>,
    pub quote: String,
    pub author: String,
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl QuotePayload {
    /// Converts into an insert draft, or `None` when quote or author is blank.
    pub fn into_draft(self) -> Option<NewQuote> {
        if self.quote.trim().is_empty() || self.author.trim().is_empty() {
            return None;
        }
        Some(NewQuote {
            text: self.quote,
            author: self.author,
        })
    }
}

/// Anything that can produce one random quote payload.
pub trait QuoteSource {
    fn fetch_random(&self) -> Result<QuotePayload, FetchError>;
}

/// `QuoteSource` backed by the public quote HTTP API.
pub struct HttpQuoteSource {
    client: Client,
    url: String,
}

impl HttpQuoteSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}{QUOTE_PATH}", base_url.trim_end_matches('/')),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl QuoteSource for HttpQuoteSource {
    fn fetch_random(&self) -> Result<QuotePayload, FetchError> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        parse_payload(&body)
    }
}

/// Decodes a quote endpoint body.
pub fn parse_payload(body: &str) -> Result<QuotePayload, FetchError> {
    Ok(serde_json::from_str(body)?)
}
