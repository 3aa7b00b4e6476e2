//! Client API calls for search endpoints.

use std::time::Duration;

use anyhow::Context;
use common::{
    search_const::{FILTERS_PATH, OPPORTUNITIES_PATH, STATISTICS_PATH},
    search_query::{FilterState, ParamMap, build_request_params},
    search_result::{
        FilterOptions, Opportunity, PageResult, Statistics, parse_filter_options, parse_page_result,
        parse_statistics,
    },
};
use serde_json::Value;
use tracing::{debug, error};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub struct SearchApi {
    client: reqwest::Client,
    base_url: String,
}

impl SearchApi {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str, params: Option<&ParamMap>) -> anyhow::Result<Value> {
        let url = self.endpoint(path);
        let mut request = self.client.get(&url);
        if let Some(params) = params {
            request = request.query(params);
        }
        let response = request.send().await.with_context(|| format!("GET {url} failed"))?;
        let status = response.status();
        let body = response.text().await.with_context(|| format!("Failed to read body of {url}"))?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("Error: {}: {}", status, body);
        }
        serde_json::from_str(&body).with_context(|| format!("Body of {url} is not JSON"))
    }

    pub async fn fetch_opportunities(&self, params: &ParamMap) -> anyhow::Result<Value> {
        self.get_json(OPPORTUNITIES_PATH, Some(params)).await
    }

    pub async fn fetch_filter_options(&self) -> anyhow::Result<Value> {
        self.get_json(FILTERS_PATH, None).await
    }

    pub async fn fetch_statistics(&self) -> anyhow::Result<Value> {
        self.get_json(STATISTICS_PATH, None).await
    }

    /// Runs one listing query. Transport and HTTP failures are logged and
    /// shown as an empty page.
    pub async fn search_with_params(&self, params: &ParamMap) -> PageResult<Opportunity> {
        debug!(
            "searching with {}",
            params.iter().map(|(name, value)| format!("{name}={value}")).collect::<Vec<_>>().join("&")
        );
        match self.fetch_opportunities(params).await {
            Ok(raw) => parse_page_result(&raw),
            Err(e) => {
                error!("Error fetching opportunities: {:#}", e);
                PageResult::empty()
            }
        }
    }

    pub async fn search_opportunities(&self, state: &FilterState) -> PageResult<Opportunity> {
        self.search_with_params(&build_request_params(state)).await
    }

    pub async fn filter_options(&self) -> FilterOptions {
        match self.fetch_filter_options().await {
            Ok(raw) => parse_filter_options(&raw),
            Err(e) => {
                error!("Error fetching filter options: {:#}", e);
                FilterOptions::default()
            }
        }
    }

    pub async fn statistics(&self) -> Statistics {
        match self.fetch_statistics().await {
            Ok(raw) => parse_statistics(&raw),
            Err(e) => {
                error!("Error fetching statistics: {:#}", e);
                Statistics::default()
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
    use serde_json::json;

    use super::*;

    // serves `router` on an ephemeral local port and returns the API base URL
    async fn serve(router: Router) -> SearchApi {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        SearchApi::new(format!("http://{addr}/api")).unwrap()
    }

    // nothing listens on port 1, so every request fails at connect time
    fn unreachable_api() -> SearchApi {
        SearchApi::new("http://127.0.0.1:1/api/").unwrap()
    }

    #[test]
    fn endpoints_join_without_double_slash() {
        let api = unreachable_api();
        assert_eq!(api.base_url(), "http://127.0.0.1:1/api");
        assert_eq!(api.endpoint(OPPORTUNITIES_PATH), "http://127.0.0.1:1/api/opportunities");
    }

    #[tokio::test]
    async fn transport_failures_degrade_to_empty_results() {
        let api = unreachable_api();

        assert!(api.fetch_opportunities(&ParamMap::default()).await.is_err());
        assert_eq!(api.search_opportunities(&FilterState::default()).await, PageResult::empty());
        assert_eq!(api.filter_options().await, FilterOptions::default());
        assert_eq!(api.statistics().await, Statistics::default());
    }

    #[tokio::test]
    async fn error_status_degrades_to_empty_results() {
        let api = serve(Router::new().route(
            "/api/opportunities",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database is down") }),
        ))
        .await;

        let err = api.fetch_opportunities(&ParamMap::default()).await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("500"), "{message}");
        assert!(message.contains("database is down"), "{message}");
        assert_eq!(api.search_opportunities(&FilterState::default()).await, PageResult::empty());
    }

    #[tokio::test]
    async fn non_json_body_degrades_to_empty_results() {
        let api = serve(Router::new().route("/api/opportunities", get(|| async { "<html>maintenance</html>" }))).await;

        let err = api.fetch_opportunities(&ParamMap::default()).await.unwrap_err();
        assert!(format!("{err:#}").contains("is not JSON"));
        assert_eq!(api.search_opportunities(&FilterState::default()).await, PageResult::empty());
    }

    #[tokio::test]
    async fn valid_page_is_parsed_with_query_sent() {
        let api = serve(Router::new().route(
            "/api/opportunities",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let keyword = params.get("keyword").cloned().unwrap_or_default();
                Json(json!({
                    "opportunities": [
                        { "id": 7, "title": format!("{keyword} fellowship"), "amount_max": 250000 },
                        { "id": 8, "title": "Travel award", "tags": ["Travel Grant"] },
                    ],
                    "total": 12,
                    "pages": 2,
                    "current_page": params.get("page").cloned().unwrap_or_default(),
                }))
            }),
        ))
        .await;

        let mut state = FilterState::default();
        state.set_keyword("malaria");
        let page = api.search_opportunities(&state).await;
        assert_eq!(page.total_count, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "malaria fellowship");
        assert_eq!(page.items[0].amount_max, Some(250_000));
        assert_eq!(page.items[1].tags, vec!["Travel Grant".to_string()]);
    }
}
