//! Numeric page/limit pagination

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::extract::extract_records;
use crate::traits::{RecordPager, RecordSearch};
use crate::types::{FetchPlan, SearchPayload};

/// Pagination via an incrementing `page` counter.
///
/// Each request carries `page` (1-indexed) and `pageLimit`; the fetch stops
/// as soon as a page comes back with fewer than `pageLimit` records, or when
/// `maxPages` round trips have been spent.
pub struct NumericPager;

#[async_trait]
impl RecordPager for NumericPager {
    fn id(&self) -> &'static str {
        "numeric"
    }

    async fn fetch_all(&self, search: &dyn RecordSearch, plan: &FetchPlan) -> Result<Vec<Value>> {
        let plan = plan.validated();
        let mut records = Vec::new();

        for page in 1..=plan.max_pages {
            let payload = SearchPayload {
                page: Some(page),
                page_limit: Some(plan.page_limit),
                sort: plan.sort_clauses(),
                ..SearchPayload::new(plan.location_id.clone())
            };

            let body = search.search(&payload).await?;
            let page_records = extract_records(body);
            let count = page_records.len();
            log::debug!("[numeric] page {page} returned {count} records");

            records.extend(page_records);

            if count < plan.page_limit as usize {
                break;
            }
        }

        log::debug!("[numeric] fetched {} records total", records.len());
        Ok(records)
    }
}
