//! Fetch-until-exhausted helpers for the two pagination styles the API uses.
//!
//! - Offset style (`limit` + `offset`): sub-accounts, pool RRSets.
//! - Cursor style (`limit` + `cursor`): zones.

use std::future::Future;

use crate::error::Result;

/// One page of an offset-paginated listing.
#[derive(Debug)]
pub struct OffsetPage<T> {
    pub items: Vec<T>,
    /// `resultInfo.returnedCount` as reported by the server.
    pub returned_count: u32,
}

impl<T> OffsetPage<T> {
    /// Page whose returned count is the number of items it holds.
    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        let returned_count = u32::try_from(items.len()).unwrap_or(u32::MAX);
        Self {
            items,
            returned_count,
        }
    }
}

/// One page of a cursor-paginated listing.
#[derive(Debug)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    /// Continuation token for the next page; `None` or empty ends the listing.
    pub next: Option<String>,
}

/// Collect every item of an offset-paginated listing.
///
/// `fetch_page(offset)` returns `Ok(None)` when the endpoint answered
/// "not found"; that ends the listing with whatever was gathered so far.
/// A page whose returned count is below `page_size` is the last one, and no
/// further request is made.
pub async fn fetch_all_offset<T, F, Fut>(page_size: u32, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<OffsetPage<T>>>>,
{
    let mut items = Vec::new();
    let mut offset = 0u32;

    loop {
        let Some(page) = fetch_page(offset).await? else {
            log::debug!("Listing ended with not-found at offset {offset}");
            break;
        };
        items.extend(page.items);
        if page.returned_count < page_size {
            break;
        }
        offset = offset.saturating_add(page_size);
    }

    Ok(items)
}

/// Collect every item of a cursor-paginated listing.
///
/// The first request carries no cursor; subsequent ones carry the server's
/// `next` token until it is absent.
pub async fn fetch_all_cursor<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<CursorPage<T>>>,
{
    let mut items = Vec::new();
    let mut cursor = None;

    loop {
        let page = fetch_page(cursor.take()).await?;
        items.extend(page.items);
        match page.next {
            Some(next) if !next.is_empty() => cursor = Some(next),
            _ => break,
        }
    }

    Ok(items)
}
