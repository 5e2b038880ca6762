//! Two-phase paged query driver
//!
//! The directory API paginates with a pair of endpoints: a count query for
//! the total and a list query for one window. The driver runs them in
//! order, because the count decides the effective page number and offset of
//! the list request: asking for page 9 of 3 must come back as page 3, and
//! an empty result set must not issue a list query at all.

use crate::client::{GraphQLExecutor, execute_and_decode};
use crate::core::error::OrgqlError;
use crate::core::page::{Page, PageRequest};
use crate::graphql::GraphQLRequest;
use serde::de::DeserializeOwned;

/// Run a count+list query pair and assemble the resulting page
///
/// `list_request` receives the window (`limit`, `offset`) computed from the
/// count result and builds the list document for it.
pub async fn fetch_page<T, X, F>(
    executor: &X,
    count_request: GraphQLRequest,
    page: PageRequest,
    list_request: F,
) -> Result<Page<T>, OrgqlError>
where
    T: DeserializeOwned,
    X: GraphQLExecutor + ?Sized,
    F: FnOnce(u64, u64) -> Result<GraphQLRequest, OrgqlError>,
{
    let row_count: u64 = execute_and_decode(executor, count_request).await?;
    let resolved = page.resolve(row_count);
    tracing::debug!(
        row_count,
        page_count = resolved.page_count,
        page_no = resolved.page_no,
        "resolved page window"
    );
    if resolved.is_empty() {
        return Ok(Page::empty(page.page_size));
    }

    let request = list_request(page.page_size, resolved.offset)?;
    let entities: Vec<T> = execute_and_decode(executor, request).await?;
    Ok(Page {
        page_no: resolved.page_no,
        page_size: page.page_size,
        row_count,
        page_count: resolved.page_count,
        entities,
    })
}
