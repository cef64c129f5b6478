//! Paging strategy implementations

mod cursor;
mod numeric;

pub use cursor::CursorPager;
pub use numeric::NumericPager;
