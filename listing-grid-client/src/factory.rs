//! Pager factory functions.

use std::sync::Arc;

use crate::pagers::{CursorPager, NumericPager};
use crate::traits::RecordPager;
use crate::types::PagingMode;

/// Creates a [`RecordPager`] for the given paging mode.
///
/// The returned pager is wrapped in `Arc<dyn RecordPager>` for easy sharing
/// across async tasks.
///
/// # Examples
///
/// ```rust
/// use listing_grid_client::{PagingMode, create_pager};
///
/// let pager = create_pager(PagingMode::Cursor);
/// assert_eq!(pager.id(), "cursor");
/// ```
#[must_use]
pub fn create_pager(mode: PagingMode) -> Arc<dyn RecordPager> {
    match mode {
        PagingMode::Numeric => Arc::new(NumericPager),
        PagingMode::Cursor => Arc::new(CursorPager),
    }
}
