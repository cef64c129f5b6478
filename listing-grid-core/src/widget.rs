//! Widget instance lifecycle
//!
//! One [`ListingWidget`] per widget placement, constructed by the
//! fetch-then-template pipeline and then driven synchronously by navigation
//! events. Instances share nothing: no process-wide state, no cross-instance
//! cache.

use serde_json::Value;

use listing_grid_client::{RecordSearch, TemplateSource, create_pager};

use crate::config::WidgetConfig;
use crate::error::CoreResult;
use crate::fields::{resolve_created_at, resolve_updated_at};
use crate::pagination::{PageEvent, Paginator};
use crate::view::{RenderedView, render_controls, render_empty, render_error, render_items, render_title};

/// A fully initialized widget instance.
///
/// Holds the immutable record set and template plus the pagination state.
/// Navigation never re-fetches: every transition recomputes the visible
/// slice and control state from what is already in memory.
pub struct ListingWidget {
    config: WidgetConfig,
    records: Vec<Value>,
    template: String,
    paginator: Paginator,
}

impl ListingWidget {
    /// Run the initialization pipeline: validate configuration, fetch every
    /// record page via the configured paging strategy, then fetch the
    /// template.
    ///
    /// Any stage failure aborts the whole pipeline; render the returned
    /// error's [`user_message`](crate::CoreError::user_message) via
    /// [`failure_view`](Self::failure_view) in place of the content area.
    pub async fn initialize(
        config: WidgetConfig,
        search: &dyn RecordSearch,
        templates: &dyn TemplateSource,
    ) -> CoreResult<Self> {
        config.validate()?;

        let pager = create_pager(config.paging_mode);
        let plan = config.fetch_plan();
        log::debug!(
            "[widget] fetching records: mode={}, schema={}, pageLimit={}, maxPages={}",
            pager.id(),
            config.schema_key,
            plan.page_limit,
            plan.max_pages
        );

        let records = pager.fetch_all(search, &plan).await?;
        if config.debug {
            log_first_record_shape(&records);
        }

        let template = templates.fetch_template(&config.template_url).await?;
        log::debug!(
            "[widget] initialized: {} records, template {} bytes",
            records.len(),
            template.len()
        );

        let paginator = Paginator::new(config.page_size);
        Ok(Self {
            config,
            records,
            template,
            paginator,
        })
    }

    /// The number of records fetched for this instance.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// The resolved configuration this instance runs with.
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Render the current page.
    ///
    /// Zero records renders the configured empty text exactly once; the
    /// controls are empty whenever there is at most one page.
    #[must_use]
    pub fn render(&self) -> RenderedView {
        let mut content = render_title(&self.config.title);

        if self.records.is_empty() {
            content.push_str(&render_empty(&self.config.empty_text));
        } else {
            let visible = self.paginator.page_slice(&self.records);
            content.push_str(&render_items(visible, &self.template, &self.config));
        }

        let controls = render_controls(&self.paginator.controls(self.records.len()));
        RenderedView { content, controls }
    }

    /// Apply a page-change event value (`"prev"`, `"next"`, or an index) and
    /// re-render. An unparseable value changes nothing but still re-renders,
    /// so the caller always receives a consistent view.
    pub fn handle_page_event(&mut self, raw: &str) -> RenderedView {
        match PageEvent::parse(raw) {
            Some(event) => {
                let page = self.paginator.apply(event, self.records.len());
                log::debug!("[widget] page event '{raw}' -> page {page}");
            }
            None => log::debug!("[widget] ignoring unparseable page event '{raw}'"),
        }
        self.render()
    }

    /// The view shown when initialization fails: a single human-readable
    /// message in the content area and no controls.
    #[must_use]
    pub fn failure_view(message: &str) -> RenderedView {
        RenderedView {
            content: render_error(message),
            controls: String::new(),
        }
    }
}

/// Debug aid: log the shape of the first fetched record so field-key
/// misconfigurations are diagnosable from the host page.
fn log_first_record_shape(records: &[Value]) {
    let Some(first) = records.first() else {
        log::debug!("[widget] fetch returned no records");
        return;
    };
    if let Some(map) = first.as_object() {
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        log::debug!("[widget] first record keys: {keys:?}");
        if let Some(meta) = map.get("meta").and_then(Value::as_object) {
            let meta_keys: Vec<&str> = meta.keys().map(String::as_str).collect();
            log::debug!("[widget] first record meta keys: {meta_keys:?}");
        }
    }
    log::debug!(
        "[widget] first record createdAt: {:?}, updatedAt: {:?}",
        resolve_created_at(first),
        resolve_updated_at(first)
    );
}
