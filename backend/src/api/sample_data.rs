//! `POST /_populate_sample_data`: loads the demo catalog into the store.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::info;

use crate::{error::AppError, state::AppState};

async fn _populate_sample_data(state: &AppState) -> anyhow::Result<usize> {
    let added = state.populate_sample_data()?;
    info!("Populated {added} sample opportunities, store now holds {}", state.store.len()?);
    Ok(added)
}

pub async fn populate_sample_data(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let added = _populate_sample_data(&state).await?;
    Ok(Json(json!({ "message": format!("Sample data populated successfully! ({added} added)") })))
}
