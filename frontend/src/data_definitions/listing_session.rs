//! State of one listing session: filters, facet catalog and the page shown.

use common::{
    request_generation::{PendingQuery, RequestGeneration},
    search_query::FilterState,
    search_result::{FilterOptions, Opportunity, PageResult},
};
use tracing::debug;

use crate::api::search_api::SearchApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Country,
    Organization,
    ResearchArea,
    Tag,
}

#[derive(Debug, Clone, Default)]
pub struct ListingSession {
    pub filters: FilterState,
    options: Option<FilterOptions>,
    result: PageResult<Opportunity>,
    generations: RequestGeneration,
    loading: bool,
}

impl ListingSession {
    pub fn new(filters: FilterState) -> Self {
        Self { filters, ..Self::default() }
    }

    pub fn result(&self) -> &PageResult<Opportunity> {
        &self.result
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_options(&mut self, options: FilterOptions) {
        self.options = Some(options);
    }

    /// Fetches the facet catalog on first use only.
    pub async fn load_options(&mut self, api: &SearchApi) -> &FilterOptions {
        if self.options.is_none() {
            let options = api.filter_options().await;
            self.set_options(options);
        }
        self.options.get_or_insert_with(FilterOptions::default)
    }

    /// Selects a facet value offered by the catalog. Selecting a value twice
    /// keeps it selected. Values the catalog does not list are refused.
    pub fn select_facet(&mut self, facet: Facet, value: &str) -> bool {
        let Some(options) = &self.options else {
            return false;
        };
        let offered = match facet {
            Facet::Country => &options.countries,
            Facet::Organization => &options.organizations,
            Facet::ResearchArea => &options.research_areas,
            Facet::Tag => &options.tags,
        };
        if !offered.iter().any(|v| v == value) {
            return false;
        }
        match facet {
            Facet::Country if self.filters.country != value => self.filters.toggle_country(value),
            Facet::Organization if self.filters.organization != value => self.filters.toggle_organization(value),
            Facet::ResearchArea if self.filters.research_area != value => self.filters.toggle_research_area(value),
            Facet::Tag => self.filters.set_tag(value, true),
            _ => {}
        }
        true
    }

    /// Starts a query for the current filters, superseding any query still in
    /// flight.
    pub fn begin_query(&mut self) -> PendingQuery {
        self.loading = true;
        PendingQuery::issue(&mut self.generations, &self.filters)
    }

    /// Applies a response unless a newer query was started after it. Returns
    /// whether the response was applied.
    pub fn complete_query(&mut self, pending: &PendingQuery, result: PageResult<Opportunity>) -> bool {
        if !self.generations.is_current(pending.generation) {
            debug!(
                "dropping stale response for generation {} (current is {})",
                pending.generation,
                self.generations.current()
            );
            return false;
        }
        self.result = result;
        self.loading = false;
        true
    }

    pub async fn refresh(&mut self, api: &SearchApi) -> bool {
        let pending = self.begin_query();
        let result = api.search_with_params(&pending.params).await;
        self.complete_query(&pending, result)
    }

    pub fn next_page(&mut self) -> bool {
        let page = self.filters.current_page();
        if u64::from(page) >= self.result.total_pages {
            return false;
        }
        self.filters.set_page(page + 1);
        true
    }

    pub fn previous_page(&mut self) -> bool {
        let page = self.filters.current_page();
        if page <= 1 {
            return false;
        }
        self.filters.set_page(page - 1);
        true
    }

    /// "Showing 11-20 of 23 results", or "0 results" for an empty page.
    pub fn showing_summary(&self) -> String {
        let total = self.result.total_count;
        if self.result.items.is_empty() {
            return format!("{total} results");
        }
        let page_size = u64::from(self.filters.page_size_or_default());
        let first = (u64::from(self.filters.current_page()) - 1) * page_size + 1;
        let last = (first - 1 + self.result.items.len() as u64).min(total.max(first));
        format!("Showing {first}-{last} of {total} results")
    }
}
