//! Cursor-driven collection walking
//!
//! listRecords pagination is an opaque-cursor chain: each page's cursor is
//! required to request the next one, so the walk is strictly sequential -
//! page N+1 is never requested before page N's response arrives.

use log::debug;

use crate::error::{PdsError, Result};
use crate::pds::PdsClient;

use super::models::ListedRecord;

/// Whether further pages exist after a walk, and the cursor to resume from.
///
/// Distinguishes exhausted-by-protocol (no cursor returned) from
/// truncated-by-caller-limit (a cursor was returned but not followed);
/// renderers need that distinction to print the resume cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationInfo {
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

impl ContinuationInfo {
    pub fn exhausted() -> Self {
        Self {
            has_more: false,
            next_cursor: None,
        }
    }

    pub fn truncated_at(cursor: String) -> Self {
        Self {
            has_more: true,
            next_cursor: Some(cursor),
        }
    }
}

/// Walk a collection from an optional starting cursor, collecting up to
/// `max_total` records (all of them when `None`).
///
/// `page_size` caps the per-request limit; the final request of a capped
/// walk asks only for the remainder, so small caps stay a single round
/// trip. Page-fetch errors abort the whole walk - no partial page results
/// are silently dropped.
pub async fn list_collection(
    client: &PdsClient,
    repo: &str,
    collection: &str,
    page_size: u32,
    start_cursor: Option<&str>,
    max_total: Option<u32>,
) -> Result<(Vec<ListedRecord>, ContinuationInfo)> {
    if page_size == 0 {
        return Err(PdsError::InvalidArgument(
            "page size limit must be at least 1".to_string(),
        ));
    }
    if max_total == Some(0) {
        return Err(PdsError::InvalidArgument(
            "record limit must be at least 1".to_string(),
        ));
    }

    let mut records: Vec<ListedRecord> = Vec::new();
    let mut cursor: Option<String> = start_cursor.map(str::to_string);
    let mut page_count = 0u32;

    loop {
        let request_limit = match max_total {
            Some(cap) => page_size.min(cap - records.len() as u32),
            None => page_size,
        };

        let page = client
            .list_records_page(repo, collection, request_limit, cursor.as_deref())
            .await?;
        page_count += 1;
        debug!(
            "Page {} of '{}': {} records, cursor {}",
            page_count,
            collection,
            page.records.len(),
            page.cursor.as_deref().unwrap_or("<none>")
        );

        let page_was_empty = page.records.is_empty();
        records.extend(page.records);

        let next = match page.cursor {
            // No cursor: the collection is exhausted
            None => return Ok((records, ContinuationInfo::exhausted())),
            Some(next) => next,
        };

        if let Some(cap) = max_total {
            if records.len() as u32 >= cap {
                return Ok((records, ContinuationInfo::truncated_at(next)));
            }
        }

        // A cursor on an empty page would walk forever; stop and report it
        if page_was_empty {
            return Ok((records, ContinuationInfo::truncated_at(next)));
        }

        cursor = Some(next);
    }
}
