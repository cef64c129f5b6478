use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{FetchPlan, SearchPayload};

/// One POST against the record search endpoint.
///
/// Implemented by [`SearchClient`](crate::SearchClient) over HTTP and by
/// scripted fakes in tests; paging strategies only ever see this trait, so
/// the full fetch loop is exercisable without a network.
#[async_trait]
pub trait RecordSearch: Send + Sync {
    /// Issue one search request and return the parsed (or raw-wrapped)
    /// response body.
    async fn search(&self, payload: &SearchPayload) -> Result<Value>;
}

/// Fetch of the markup template a widget instance renders with.
///
/// Templates are fetched once per instance and treated as immutable for its
/// lifetime; a failure here is fatal to that instance.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Fetch the template body from the given URL.
    async fn fetch_template(&self, url: &str) -> Result<String>;
}

/// A pagination strategy over the search endpoint.
///
/// Drives repeated page requests until a termination condition is met and
/// returns the concatenated record set. Pages are requested strictly
/// sequentially; a page failure aborts the whole fetch and no partial set is
/// returned.
#[async_trait]
pub trait RecordPager: Send + Sync {
    /// Strategy identifier (for logging).
    fn id(&self) -> &'static str;

    /// Fetch every page described by `plan` and concatenate the records in
    /// fetch order.
    async fn fetch_all(&self, search: &dyn RecordSearch, plan: &FetchPlan) -> Result<Vec<Value>>;
}
