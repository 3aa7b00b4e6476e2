//! `GET /filters`: facet catalog built from the stored opportunities.

use std::{collections::BTreeSet, sync::Arc};

use axum::{Json, extract::State};
use common::search_result::FilterOptions;

use crate::{db_utils::opportunity_store::FundingRecord, error::AppError, state::AppState};

pub fn collect_filter_options(records: &[FundingRecord]) -> FilterOptions {
    let mut countries = BTreeSet::new();
    let mut organizations = BTreeSet::new();
    let mut research_areas = BTreeSet::new();
    let mut tags = BTreeSet::new();

    for record in records {
        let o = &record.opportunity;
        countries.insert(o.country.as_str());
        organizations.insert(o.organization.as_str());
        research_areas.insert(o.research_area.as_str());
        tags.extend(o.tags.iter().map(String::as_str));
    }

    let sorted = |values: BTreeSet<&str>| {
        values.into_iter().filter(|v| !v.is_empty()).map(str::to_string).collect::<Vec<_>>()
    };
    FilterOptions {
        countries: sorted(countries),
        organizations: sorted(organizations),
        research_areas: sorted(research_areas),
        tags: sorted(tags),
    }
}

pub async fn get_filter_options(State(state): State<Arc<AppState>>) -> Result<Json<FilterOptions>, AppError> {
    let records = state.store.snapshot()?;
    Ok(Json(collect_filter_options(&records)))
}
