//! Paginated collection helpers shared by the Octocrab gateway.

use octocrab::{Octocrab, Page};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::github::error::MonitorError;
use crate::github::rate_limit::RateLimitInfo;

use super::error_mapping::{is_rate_limit_error, map_octocrab_error};

/// Maximum page size accepted by the GitHub REST API.
pub(super) const PER_PAGE: u8 = 100;

/// Fetches the first page at `path` and follows `Link: rel="next"` headers
/// until every item has been collected.
pub(super) async fn fetch_all_pages<Api, Item, Query>(
    client: &Octocrab,
    operation: &str,
    path: String,
    query: &Query,
) -> Result<Vec<Item>, MonitorError>
where
    Api: DeserializeOwned + Into<Item> + Send,
    Item: Send,
    Query: Serialize + ?Sized + Sync,
{
    let first = match client.get::<Page<Api>, _, _>(path, Some(query)).await {
        Ok(page) => page,
        Err(error) => return Err(map_with_rate_limit(client, operation, &error).await),
    };

    match client.all_pages(first).await {
        Ok(items) => Ok(items.into_iter().map(Into::into).collect()),
        Err(error) => Err(map_with_rate_limit(client, operation, &error).await),
    }
}

/// Maps an Octocrab error, enriching rate limit failures with the reset time
/// when GitHub still answers the rate limit endpoint.
pub(super) async fn map_with_rate_limit(
    client: &Octocrab,
    operation: &str,
    error: &octocrab::Error,
) -> MonitorError {
    match error {
        octocrab::Error::GitHub { source, .. } if is_rate_limit_error(source) => {
            let rate_limit = fetch_rate_limit_info(client).await;
            let base_message = format!("{operation} failed: {message}", message = source.message);
            let message = match &rate_limit {
                Some(info) => format!(
                    "{base_message} (resets at {reset})",
                    reset = info.reset_at()
                ),
                None => base_message,
            };

            MonitorError::RateLimitExceeded {
                rate_limit,
                message,
            }
        }
        _ => map_octocrab_error(operation, error),
    }
}

pub(super) async fn fetch_rate_limit_info(client: &Octocrab) -> Option<RateLimitInfo> {
    let rate = client.ratelimit().get().await.ok()?.rate;
    let Ok(limit) = u32::try_from(rate.limit) else {
        return None;
    };
    let Ok(remaining) = u32::try_from(rate.remaining) else {
        return None;
    };
    Some(RateLimitInfo::new(limit, remaining, rate.reset))
}
