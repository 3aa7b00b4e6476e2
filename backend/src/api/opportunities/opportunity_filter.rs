//! Filtering, ordering and pagination for the opportunity listing.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::{config::Config, db_utils::opportunity_store::FundingRecord};

/// Raw query string of `GET /opportunities`. Numbers stay strings here so a
/// malformed one is ignored instead of rejecting the whole request.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct OpportunityQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub keyword: Option<String>,
    pub country: Option<String>,
    pub organization: Option<String>,
    pub research_area: Option<String>,
    pub tags: Option<String>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunitiesResponse {
    pub opportunities: Vec<FundingRecord>,
    pub total: u64,
    pub pages: u64,
    pub current_page: u32,
}

/// Normalized filter: lowercased needles, parsed bounds, split tags.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpportunityFilter {
    keyword: Option<String>,
    country: Option<String>,
    organization: Option<String>,
    research_area: Option<String>,
    min_amount: Option<u64>,
    max_amount: Option<u64>,
    tags: Vec<String>,
}

fn needle(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_lowercase)
}

fn number<T: std::str::FromStr>(value: &Option<String>) -> Option<T> {
    value.as_deref().and_then(|v| v.trim().parse().ok())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl OpportunityFilter {
    pub fn from_query(query: &OpportunityQuery) -> Self {
        Self {
            keyword: needle(&query.keyword),
            country: needle(&query.country),
            organization: needle(&query.organization),
            research_area: needle(&query.research_area),
            min_amount: number(&query.min_amount),
            max_amount: number(&query.max_amount),
            tags: query
                .tags
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn matches(&self, record: &FundingRecord) -> bool {
        let o = &record.opportunity;

        if let Some(keyword) = &self.keyword {
            let hit = contains_ignore_case(&o.title, keyword)
                || contains_ignore_case(&o.description, keyword)
                || contains_ignore_case(&o.organization, keyword);
            if !hit {
                return false;
            }
        }
        if let Some(country) = &self.country {
            if !contains_ignore_case(&o.country, country) {
                return false;
            }
        }
        if let Some(organization) = &self.organization {
            if !contains_ignore_case(&o.organization, organization) {
                return false;
            }
        }
        if let Some(research_area) = &self.research_area {
            if !contains_ignore_case(&o.research_area, research_area) {
                return false;
            }
        }
        // a record is kept when its own amount range overlaps the requested one
        if let Some(min) = self.min_amount {
            match o.amount_max.or(o.amount_min) {
                Some(upper) if upper >= min => {}
                _ => return false,
            }
        }
        if let Some(max) = self.max_amount {
            match o.amount_min.or(o.amount_max) {
                Some(lower) if lower <= max => {}
                _ => return false,
            }
        }
        if !self.tags.is_empty() && !o.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }
        true
    }
}

/// Resolved `(page, per_page)`: page at least 1, page size defaulted when
/// missing or zero and capped at `max_per_page`.
pub fn resolve_pagination(query: &OpportunityQuery, config: &Config) -> (u32, u32) {
    let page = number::<u32>(&query.page).filter(|p| *p >= 1).unwrap_or(1);
    let per_page = number::<u32>(&query.per_page)
        .filter(|p| *p >= 1)
        .unwrap_or(config.default_per_page)
        .min(config.max_per_page);
    (page, per_page)
}

/// Soonest deadline first with undated records last, then newest first.
pub fn sort_for_listing(records: &mut [FundingRecord]) {
    records.sort_by_key(|r| {
        (
            r.opportunity.deadline.is_none(),
            r.opportunity.deadline,
            Reverse(r.created_at),
            r.opportunity.id,
        )
    });
}

pub fn search_opportunities(
    active_records: Vec<FundingRecord>,
    query: &OpportunityQuery,
    config: &Config,
) -> OpportunitiesResponse {
    let filter = OpportunityFilter::from_query(query);
    let (page, per_page) = resolve_pagination(query, config);

    let mut matching = active_records.into_iter().filter(|r| filter.matches(r)).collect::<Vec<_>>();
    sort_for_listing(&mut matching);

    let total = matching.len() as u64;
    let pages = total.div_ceil(per_page as u64);
    let offset = (page as usize - 1).saturating_mul(per_page as usize);
    let opportunities = matching.into_iter().skip(offset).take(per_page as usize).collect();

    OpportunitiesResponse { opportunities, total, pages, current_page: page }
}
