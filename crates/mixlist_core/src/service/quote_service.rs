//! Remote quote fetch use-case.
//!
//! # Invariants
//! - A record is written only for a payload with non-blank quote and author.
//! - Every failure is logged here before it is returned.

use crate::model::record::Quote;
use crate::remote::quote_client::{FetchError, QuoteSource};
use crate::store::RecordStore;
use log::{error, info, warn};
use std::time::Instant;

/// Fetches one quote from a `QuoteSource` and stores it.
pub struct QuoteFetcher {
    source: Box<dyn QuoteSource>,
}

impl QuoteFetcher {
    pub fn new(source: impl QuoteSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Fetches one quote and inserts it as a new record.
    pub fn fetch_one(&self, store: &RecordStore) -> Result<Quote, FetchError> {
        let started_at = Instant::now();

        let payload = self.source.fetch_random().map_err(|err| {
            warn!(
                "event=quote_fetch module=remote status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            err
        })?;

        let Some(draft) = payload.into_draft() else {
            warn!(
                "event=quote_fetch module=remote status=rejected duration_ms={} error_code=empty_quote",
                started_at.elapsed().as_millis()
            );
            return Err(FetchError::EmptyQuote);
        };

        let id = store.insert::<Quote>(&draft).map_err(|err| {
            error!(
                "event=quote_fetch module=remote status=error error_code=store_failed error={}",
                err
            );
            FetchError::from(err)
        })?;

        info!(
            "event=quote_fetch module=remote status=ok id={} duration_ms={}",
            id,
            started_at.elapsed().as_millis()
        );
        Ok(draft.into_record(id))
    }
}
