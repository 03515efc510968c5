//! Query Layer
//!
//! Page arithmetic, the query cache, per-screen list state and the quotes
//! search/sort/paginate pipeline.

mod cache;
mod list;
mod pagination;
mod quotes;

pub use cache::{Lookup, QueryCache, QueryKey, QueryParams};
pub use list::{PagedList, Ticket};
pub use pagination::{
    page_count, parse_page, slice_page, PageRequest, PagerState, DEFAULT_PAGE_SIZE,
};
pub use quotes::{
    compose, matches_branch, quote_cells, QuotePage, QuoteView, SortColumn, SortKey, SortOrder,
    SortState, QUOTE_COLUMNS,
};
