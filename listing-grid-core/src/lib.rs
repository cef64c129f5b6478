//! Listing Grid Core Library
//!
//! Core logic for the embeddable record listing widget:
//! - Configuration resolution with per-field defaults (Widget Config)
//! - Shape-agnostic field resolution over schemaless records (Fields)
//! - `{{ token }}` template rendering with HTML escaping (Template)
//! - Client-side pagination state and control affordances (Pagination)
//!
//! The record fetch itself lives in `listing-grid-client`; this crate
//! consumes it through the `RecordSearch`/`TemplateSource` traits, so hosts
//! and tests can substitute their own transports. Markup insertion into a
//! page, styling, and host bootstrap stay outside both crates.

pub mod config;
pub mod error;
pub mod fields;
pub mod pagination;
pub mod template;
pub mod utils;
pub mod view;
pub mod widget;

// Re-export common types
pub use config::{EventDatetimeFields, WidgetConfig, DEFAULT_EMPTY_TEXT, DEFAULT_SCHEMA_KEY};
pub use error::{ConfigError, CoreError, CoreResult};
pub use pagination::{ControlState, PageEvent, Paginator};
pub use view::RenderedView;
pub use widget::ListingWidget;

// Re-export the client surface hosts need to construct a widget
pub use listing_grid_client::{
    ApiCredentials, ClientError, PagingMode, SearchClient, SortOrder,
};
