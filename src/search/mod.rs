//! Search page logic: filters, their URL form, the staged filter panel and the result list.

pub mod codec;
mod controller;
mod filters;
mod pagination;
mod panel;
mod query;
mod results;

pub use controller::{FetchTicket, MemoryHistory, Navigator, SearchController};
pub use filters::{
    FilterField, SearchFilters, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PRICE_SLIDER_MAX,
    PRICE_SLIDER_MIN,
};
pub use pagination::{page_window, Pagination, WINDOW};
pub use panel::{reduce, FilterEdit, FilterPanel, PanelState, PriceBound, PriceRange};
pub use query::{FixedConstraints, QueryBuilder};
pub use results::{ResultAction, ResultState};
