//! Funding opportunity search API.
//!
//! Serves the listing, facet catalog and statistics endpoints under `/api`
//! from an in-memory store that can be seeded with a demo catalog.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

pub mod api;
pub mod config;
pub mod db_utils;
pub mod error;
pub mod state;

use config::Config;
use state::AppState;

pub const API_PREFIX: &str = "/api";

pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins = config
        .cors_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| warn!("Ignoring invalid CORS origin {origin:?}: {e}"))
                .ok()
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);
    Router::new()
        .nest(API_PREFIX, api::api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    info!("Initializing state...");
    let address = config.listen_address();
    let state = AppState::new(config)?;
    let app = router(state);

    let listener = TcpListener::bind(&address).await.with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}


#[cfg(test)]
mod tests {
    use axum::{
        Json,
        extract::{Query, State},
        response::IntoResponse,
    };
    use common::search_result::{parse_filter_options, parse_page_result, parse_statistics};

    use super::*;
    use crate::api::{
        filters::get_filter_options,
        opportunities::{list_opportunities, opportunity_filter::OpportunityQuery},
        sample_data::populate_sample_data,
        statistics::get_statistics,
    };

    fn seeded_state() -> Arc<AppState> {
        AppState::new(Config::default()).unwrap()
    }

    #[tokio::test]
    async fn seeded_listing_parses_on_the_client_side() {
        let state = seeded_state();
        let query = OpportunityQuery { per_page: Some("10".to_string()), ..OpportunityQuery::default() };
        let Json(response) = list_opportunities(State(state), Query(query)).await.unwrap();

        let raw = serde_json::to_value(&response).unwrap();
        let page = parse_page_result(&raw);
        assert_eq!(page.total_count, 52);
        assert_eq!(page.total_pages, 6);
        assert_eq!(page.items.len(), 10);
        let deadlines = page.items.iter().map(|o| o.deadline.unwrap()).collect::<Vec<_>>();
        assert!(deadlines.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn catalog_and_statistics_reflect_the_seed() {
        let state = seeded_state();

        let Json(options) = get_filter_options(State(state.clone())).await.unwrap();
        let options = parse_filter_options(&serde_json::to_value(&options).unwrap());
        assert_eq!(options.countries.len(), 8);
        assert_eq!(options.tags.len(), 5);

        let Json(stats) = get_statistics(State(state)).await.unwrap();
        let stats = parse_statistics(&serde_json::to_value(&stats).unwrap());
        assert_eq!(stats.active_opportunities, 52);
        assert_eq!(stats.funding_sources, 8);
        assert!(stats.total_funding > 0);
    }

    #[tokio::test]
    async fn populating_twice_adds_nothing_new() {
        let state = AppState::new(Config { seed_sample_data: false, ..Config::default() }).unwrap();
        assert!(state.store.is_empty().unwrap());

        let response = populate_sample_data(State(state.clone())).await.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(state.store.len().unwrap(), 52);

        let _ = populate_sample_data(State(state.clone())).await;
        assert_eq!(state.store.len().unwrap(), 52);
    }

    #[test]
    fn invalid_origins_are_skipped() {
        let config = Config {
            cors_origins: vec!["http://localhost:3000".to_string(), "bad\norigin".to_string()],
            ..Config::default()
        };
        // building the layer must not panic on the bad entry
        let _ = cors_layer(&config);
    }
}
