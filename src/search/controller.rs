//! The search page: canonical filters live in the location, the panel stages edits, and each
//! committed change navigates and refetches.

use super::codec;
use super::filters::SearchFilters;
use super::panel::{FilterEdit, FilterPanel};
use super::query::QueryBuilder;
use super::results::ResultState;
use crate::api::{ApiClient, ApiError};
use crate::models::{Listing, PaginatedResponse, SortBy};
use std::sync::Arc;
use tracing::{debug, info};

/// Where the current location comes from and where navigations go
pub trait Navigator {
    fn location(&self) -> String;
    fn navigate(&mut self, location: &str);
}

/// In-memory history stack with back/forward
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> String {
        self.entries[self.index].clone()
    }

    fn navigate(&mut self, location: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location.to_string());
        self.index += 1;
    }
}

/// Identifies one dispatched search so a late answer to a superseded query can be dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub params: Vec<(String, String)>,
}

pub struct SearchController<N: Navigator> {
    client: Arc<ApiClient>,
    builder: QueryBuilder,
    navigator: N,
    filters: SearchFilters,
    panel: FilterPanel,
    results: ResultState,
    generation: u64,
    last_params: Option<Vec<(String, String)>>,
}

impl<N: Navigator> SearchController<N> {
    /// Reads the canonical filters from the navigator's current location.
    pub fn new(client: Arc<ApiClient>, builder: QueryBuilder, navigator: N) -> Self {
        let filters = codec::parse(codec::query_of(&navigator.location()));
        Self {
            client,
            builder,
            navigator,
            panel: FilterPanel::new(filters.clone()),
            results: ResultState::loading(filters.limit),
            filters,
            generation: 0,
            last_params: None,
        }
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn panel(&self) -> &FilterPanel {
        &self.panel
    }

    pub fn results(&self) -> &ResultState {
        &self.results
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    /// Heading for the result list
    pub fn title(&self) -> String {
        self.filters.title(&self.builder.fixed().city)
    }

    /// Parameters the next fetch will send
    pub fn params(&self) -> Vec<(String, String)> {
        self.builder.build(&self.filters)
    }

    /// Re-reads the location after a navigation this controller did not make (back/forward,
    /// a pasted link). Returns true when the canonical filters changed.
    pub fn on_location_change(&mut self) -> bool {
        let filters = codec::parse(codec::query_of(&self.navigator.location()));
        if filters == self.filters {
            return false;
        }
        debug!(location = %self.navigator.location(), "search location changed");
        self.panel.sync(filters.clone());
        self.filters = filters;
        true
    }

    fn commit(&mut self, filters: SearchFilters) -> bool {
        let location = codec::to_location(&filters);
        if location == codec::to_location(&self.filters) {
            return false;
        }
        info!("navigating to {}", location);
        self.navigator.navigate(&location);
        self.on_location_change()
    }

    /// Stages one panel edit. The canonical filters are not touched.
    pub fn edit(&mut self, edit: FilterEdit) {
        self.panel.edit(edit);
    }

    pub fn cancel_edits(&mut self) {
        self.panel.cancel();
    }

    pub fn apply_panel(&mut self) -> bool {
        let applied = self.panel.apply();
        self.commit(applied)
    }

    pub fn clear_all(&mut self) -> bool {
        let cleared = self.panel.clear_all();
        self.commit(cleared)
    }

    pub fn change_sort(&mut self, sort_by: SortBy) -> bool {
        self.commit(SearchFilters {
            sort_by,
            page: 1,
            ..self.filters.clone()
        })
    }

    pub fn change_page(&mut self, page: u32) -> bool {
        self.commit(SearchFilters {
            page: page.max(1),
            ..self.filters.clone()
        })
    }

    /// Marks the result area as loading and hands out the query to run.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.begin_with(self.params())
    }

    fn begin_with(&mut self, params: Vec<(String, String)>) -> FetchTicket {
        self.generation += 1;
        self.results = ResultState::loading(self.filters.limit);
        self.last_params = Some(params.clone());
        FetchTicket {
            generation: self.generation,
            params,
        }
    }

    /// Records the outcome of `ticket`. Answers to anything but the latest ticket are dropped;
    /// returns whether this one was used.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<PaginatedResponse<Listing>, ApiError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!("discarding result of superseded search");
            return false;
        }
        self.results = ResultState::from_result(result);
        true
    }

    /// Fetches the page for the canonical filters.
    pub async fn fetch(&mut self) -> &ResultState {
        let ticket = self.begin_fetch();
        self.run(ticket).await
    }

    /// Re-issues the last query with identical parameters.
    pub async fn retry(&mut self) -> &ResultState {
        let params = self.last_params.clone().unwrap_or_else(|| self.params());
        let ticket = self.begin_with(params);
        self.run(ticket).await
    }

    async fn run(&mut self, ticket: FetchTicket) -> &ResultState {
        let result = self.client.search_listings(&ticket.params).await;
        self.finish_fetch(ticket, result);
        &self.results
    }
}
