//! # listing-grid-client
//!
//! Client library for the record search API used by the listing grid widget:
//! HTTP plumbing, response-shape normalization, and the two pagination
//! strategies the remote contract variants require.
//!
//! ## Paging Strategies
//!
//! | Strategy | Mode | Termination |
//! |----------|------|-------------|
//! | [`NumericPager`] | `page` counter + `pageLimit` | short page, or `maxPages` |
//! | [`CursorPager`] | `startAfterId` cursor, `pageLimit`→`limit` body fallback | no cursor AND short page, or `maxPages` |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use listing_grid_client::{
//!     ApiCredentials, FetchPlan, PagingMode, SearchClient, create_pager,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SearchClient::new(ApiCredentials {
//!     api_token: "your-token".to_string(),
//!     schema_key: "custom_objects.service_status_events".to_string(),
//!     base_url: listing_grid_client::DEFAULT_BASE_URL.to_string(),
//!     api_version: listing_grid_client::DEFAULT_API_VERSION.to_string(),
//! });
//!
//! let plan = FetchPlan {
//!     location_id: "loc-123".to_string(),
//!     page_limit: 100,
//!     max_pages: 20,
//!     sort: None,
//! };
//!
//! let pager = create_pager(PagingMode::Numeric);
//! let records = pager.fetch_all(&client, &plan).await?;
//! println!("{} records", records.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ClientError>`](ClientError). Transport
//! failures, timeouts, and HTTP 429 are transient and retried with
//! exponential backoff when retries are enabled via
//! [`SearchClient::with_max_retries`]; a structured upstream rejection
//! surfaces as [`ClientError::RequestFailed`] with the status and the
//! best-effort `message` extracted from the body.
//!
//! A 2xx body that is not valid JSON is degraded to `{"raw": "<text>"}` and
//! flows through record extraction as an empty page — a malformed body never
//! fails a fetch on its own.

mod error;
mod extract;
mod factory;
mod http_client;
mod pagers;
mod search;
mod traits;
mod types;

// Re-export error types
pub use error::{ClientError, Result};

// Re-export factory functions
pub use factory::create_pager;

// Re-export traits
pub use traits::{RecordPager, RecordSearch, TemplateSource};

// Re-export types
pub use types::{FetchPlan, PagingMode, SearchPayload, SortClause, SortOrder, short_key};

// Re-export response-shape helpers
pub use extract::{extract_next_cursor, extract_records};

// Re-export the HTTP client
pub use search::{ApiCredentials, DEFAULT_API_VERSION, DEFAULT_BASE_URL, SearchClient};
