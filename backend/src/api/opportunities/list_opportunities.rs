//! `GET /opportunities` handler.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::debug;

use crate::{
    api::opportunities::opportunity_filter::{OpportunitiesResponse, OpportunityQuery, search_opportunities},
    error::AppError,
    state::AppState,
};

pub async fn list_opportunities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OpportunityQuery>,
) -> Result<Json<OpportunitiesResponse>, AppError> {
    let active = state.store.snapshot_active()?;
    let response = search_opportunities(active, &query, &state.config);
    debug!(
        "listing page {} with {} of {} matches",
        response.current_page,
        response.opportunities.len(),
        response.total
    );
    Ok(Json(response))
}
