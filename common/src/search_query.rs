//! Listing filter state and its translation into search request parameters.

use std::{
    collections::{BTreeMap, BTreeSet},
    num::NonZeroU32,
};

use serde::Serialize;

use crate::funding_amount::AmountRange;
use crate::search_const::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PARAM_COUNTRY, PARAM_KEYWORD, PARAM_MAX_AMOUNT, PARAM_MIN_AMOUNT,
    PARAM_ORGANIZATION, PARAM_PAGE, PARAM_PER_PAGE, PARAM_RESEARCH_AREA, PARAM_TAGS,
};


/// Filters and pagination cursor of one listing session. Empty strings, an
/// empty tag set and `AmountRange::Any` mean "unconstrained".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub keyword: String,
    pub country: String,
    pub organization: String,
    pub research_area: String,
    pub tags: BTreeSet<String>,
    pub amount_range: AmountRange,
    pub page: Option<NonZeroU32>,
    pub page_size: Option<NonZeroU32>,
}

impl FilterState {
    pub fn current_page(&self) -> u32 {
        self.page.map_or(1, NonZeroU32::get)
    }

    /// Capped at `MAX_PAGE_SIZE`, the most the API will return per page.
    pub fn page_size_or_default(&self) -> u32 {
        self.page_size.map_or(DEFAULT_PAGE_SIZE, |size| size.get().min(MAX_PAGE_SIZE))
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = NonZeroU32::new(page);
    }

    fn reset_page(&mut self) {
        self.page = None;
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
        self.reset_page();
    }

    pub fn toggle_country(&mut self, country: &str) {
        toggle_single(&mut self.country, country);
        self.reset_page();
    }

    pub fn toggle_organization(&mut self, organization: &str) {
        toggle_single(&mut self.organization, organization);
        self.reset_page();
    }

    pub fn toggle_research_area(&mut self, research_area: &str) {
        toggle_single(&mut self.research_area, research_area);
        self.reset_page();
    }

    pub fn set_tag(&mut self, tag: &str, selected: bool) {
        if selected {
            self.tags.insert(tag.to_string());
        } else {
            self.tags.remove(tag);
        }
        self.reset_page();
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        let selected = !self.tags.contains(tag);
        self.set_tag(tag, selected);
    }

    pub fn set_amount_range(&mut self, amount_range: AmountRange) {
        self.amount_range = amount_range;
        self.reset_page();
    }

    /// Drops every filter and the page cursor; the page size survives.
    pub fn clear_all(&mut self) {
        *self = FilterState { page_size: self.page_size, ..FilterState::default() };
    }

    pub fn has_active_filters(&self) -> bool {
        !self.keyword.is_empty()
            || !self.country.is_empty()
            || !self.organization.is_empty()
            || !self.research_area.is_empty()
            || !self.tags.is_empty()
            || self.amount_range != AmountRange::Any
    }
}

// selecting the value that is already selected clears the facet
fn toggle_single(slot: &mut String, value: &str) {
    if slot == value {
        slot.clear();
    } else {
        *slot = value.to_string();
    }
}


/// Query string parameters of one search request, keyed by wire name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ParamMap(BTreeMap<String, String>);

impl ParamMap {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, name: &str, value: impl ToString) {
        self.0.insert(name.to_string(), value.to_string());
    }

    fn insert_non_empty(&mut self, name: &str, value: &str) {
        if !value.is_empty() {
            self.insert(name, value);
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        ParamMap(iter.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }
}


/// Builds the query parameters for `GET /opportunities`, leaving out every
/// filter that is unconstrained. Page and page size are always present.
pub fn build_request_params(state: &FilterState) -> ParamMap {
    let mut params = ParamMap::default();

    params.insert(PARAM_PAGE, state.current_page());
    params.insert(PARAM_PER_PAGE, state.page_size_or_default());

    params.insert_non_empty(PARAM_KEYWORD, &state.keyword);
    params.insert_non_empty(PARAM_COUNTRY, &state.country);
    params.insert_non_empty(PARAM_ORGANIZATION, &state.organization);
    params.insert_non_empty(PARAM_RESEARCH_AREA, &state.research_area);

    // tags containing a comma cannot be told apart on the wire
    if !state.tags.is_empty() {
        let tags = state.tags.iter().map(String::as_str).collect::<Vec<_>>().join(",");
        params.insert(PARAM_TAGS, tags);
    }

    let interval = state.amount_range.interval();
    if let Some(min) = interval.min {
        params.insert(PARAM_MIN_AMOUNT, min);
    }
    if let Some(max) = interval.max {
        params.insert(PARAM_MAX_AMOUNT, max);
    }

    params
}
