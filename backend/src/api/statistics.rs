//! `GET /statistics`: headline counters for the home view.

use std::{collections::HashSet, sync::Arc};

use axum::{Json, extract::State};
use common::search_result::Statistics;

use crate::{db_utils::opportunity_store::FundingRecord, error::AppError, state::AppState};

/// Funding and country counts cover active records only; funding sources
/// count every organization in the store.
pub fn compute_statistics(records: &[FundingRecord]) -> Statistics {
    let active = records.iter().filter(|r| r.is_active()).collect::<Vec<_>>();

    let total_funding = active.iter().filter_map(|r| r.opportunity.amount_max).fold(0, u64::saturating_add);
    let countries = active
        .iter()
        .map(|r| r.opportunity.country.as_str())
        .filter(|c| !c.is_empty())
        .collect::<HashSet<_>>()
        .len() as u64;
    let funding_sources = records
        .iter()
        .map(|r| r.opportunity.organization.as_str())
        .filter(|o| !o.is_empty())
        .collect::<HashSet<_>>()
        .len() as u64;

    Statistics { active_opportunities: active.len() as u64, total_funding, countries, funding_sources }
}

pub async fn get_statistics(State(state): State<Arc<AppState>>) -> Result<Json<Statistics>, AppError> {
    let records = state.store.snapshot()?;
    Ok(Json(compute_statistics(&records)))
}
