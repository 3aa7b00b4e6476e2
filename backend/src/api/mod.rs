//! Search API routes.

pub mod filters;
pub mod opportunities;
pub mod sample_data;
pub mod statistics;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use common::search_const::{FILTERS_PATH, OPPORTUNITIES_PATH, POPULATE_SAMPLE_DATA_PATH, STATISTICS_PATH};

use crate::state::AppState;

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(OPPORTUNITIES_PATH, get(opportunities::list_opportunities))
        .route(FILTERS_PATH, get(filters::get_filter_options))
        .route(STATISTICS_PATH, get(statistics::get_statistics))
        .route(POPULATE_SAMPLE_DATA_PATH, post(sample_data::populate_sample_data))
}
