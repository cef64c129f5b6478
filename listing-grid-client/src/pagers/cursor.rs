//! Opaque-cursor pagination with body-shape fallback

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::extract::{extract_next_cursor, extract_records};
use crate::traits::{RecordPager, RecordSearch};
use crate::types::{FetchPlan, SearchPayload};

/// Pagination via an opaque `startAfterId` cursor.
///
/// The two remote contract generations disagree on the page-size key, so each
/// page is attempted with a `pageLimit` body first and a `limit` body second;
/// the first shape that succeeds supplies the page. The fetch stops when the
/// response carries no next cursor AND the page came back short of
/// `pageLimit`, or when `maxPages` round trips have been spent.
pub struct CursorPager;

impl CursorPager {
    /// The candidate body shapes for one page, in attempt order.
    fn page_payloads(plan: &FetchPlan, cursor: Option<&String>) -> [SearchPayload; 2] {
        let base = SearchPayload {
            start_after_id: cursor.cloned(),
            sort: plan.sort_clauses(),
            ..SearchPayload::new(plan.location_id.clone())
        };
        [
            SearchPayload {
                page_limit: Some(plan.page_limit),
                ..base.clone()
            },
            SearchPayload {
                limit: Some(plan.page_limit),
                ..base
            },
        ]
    }
}

#[async_trait]
impl RecordPager for CursorPager {
    fn id(&self) -> &'static str {
        "cursor"
    }

    async fn fetch_all(&self, search: &dyn RecordSearch, plan: &FetchPlan) -> Result<Vec<Value>> {
        let plan = plan.validated();
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        for round in 1..=plan.max_pages {
            let mut body = None;
            let mut last_error = None;

            for payload in Self::page_payloads(&plan, cursor.as_ref()) {
                match search.search(&payload).await {
                    Ok(response) => {
                        body = Some(response);
                        last_error = None;
                        break;
                    }
                    Err(e) => {
                        log::debug!("[cursor] body shape rejected on round {round}: {e}");
                        last_error = Some(e);
                    }
                }
            }

            let Some(body) = body else {
                return Err(last_error.unwrap_or_else(|| ClientError::NetworkError {
                    endpoint: "search".to_string(),
                    detail: "Unable to fetch records.".to_string(),
                }));
            };

            cursor = extract_next_cursor(&body);
            let page_records = extract_records(body);
            let count = page_records.len();
            log::debug!(
                "[cursor] round {round} returned {count} records, next cursor: {}",
                cursor.as_deref().unwrap_or("<none>")
            );

            records.extend(page_records);

            if cursor.is_none() && count < plan.page_limit as usize {
                break;
            }
        }

        log::debug!("[cursor] fetched {} records total", records.len());
        Ok(records)
    }
}
