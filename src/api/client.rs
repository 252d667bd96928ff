//! Dashboard REST API Client
//!
//! HTTP client for the trading bot's `/api/dashboard` routes.
//! One GET per call: no retry, no backoff.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::{ApiResult, LoadError};
use crate::config::ApiConfig;
use crate::model::{Account, Country, Holding, LogLine, LogType, PricePoint, StockSummary, SystemStatus};

/// Read-only dashboard endpoints
///
/// Implemented over HTTP by [`DashboardClient`]; the controller only sees
/// this trait.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /api/dashboard/account?country=..`
    async fn account(&self, country: Country) -> ApiResult<Account>;

    /// `GET /api/dashboard/holdings?country=..`
    async fn holdings(&self, country: Country) -> ApiResult<Vec<Holding>>;

    /// `GET /api/dashboard/status`
    async fn system_status(&self) -> ApiResult<SystemStatus>;

    /// `GET /api/dashboard/logs?log_type=..&lines=..`
    async fn logs(&self, log_type: LogType, lines: usize) -> ApiResult<Vec<LogLine>>;

    /// `GET /api/dashboard/stocks/search?query=..`
    async fn search_stocks(&self, query: &str) -> ApiResult<Vec<StockSummary>>;

    /// `GET /api/dashboard/stocks/{symbol}/price-history?days=..`
    async fn price_history(&self, symbol: &str, days: u32) -> ApiResult<Vec<PricePoint>>;
}

/// reqwest-backed [`DashboardApi`]
pub struct DashboardClient {
    client: Client,
    config: ApiConfig,
}

impl DashboardClient {
    /// Create a new client with the given configuration
    pub fn new(mut config: ApiConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(std::time::Duration::from_millis(ms));
        }
        let client = builder.build()?;

        // Normalize: remove trailing slash
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}/api/dashboard{}", self.config.base_url, path_and_query)
    }

    /// Issue a GET and decode a JSON body
    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> ApiResult<T> {
        let url = self.url(path_and_query);
        tracing::debug!(url = %url, "GET");

        let mut request = self.client.get(&url);
        if let Some((user, pass)) = self.config.basic_auth() {
            request = request.basic_auth(user, Some(pass));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                message: error_detail(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Extract FastAPI's `{"detail": ...}` message, falling back to the raw body
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}

#[async_trait]
impl DashboardApi for DashboardClient {
    async fn account(&self, country: Country) -> ApiResult<Account> {
        self.get_json(&format!("/account?country={}", country.code()))
            .await
    }

    async fn holdings(&self, country: Country) -> ApiResult<Vec<Holding>> {
        self.get_json(&format!("/holdings?country={}", country.code()))
            .await
    }

    async fn system_status(&self) -> ApiResult<SystemStatus> {
        self.get_json("/status").await
    }

    async fn logs(&self, log_type: LogType, lines: usize) -> ApiResult<Vec<LogLine>> {
        self.get_json(&format!("/logs?log_type={}&lines={}", log_type.as_str(), lines))
            .await
    }

    async fn search_stocks(&self, query: &str) -> ApiResult<Vec<StockSummary>> {
        self.get_json(&format!("/stocks/search?query={}", urlencoding::encode(query)))
            .await
    }

    async fn price_history(&self, symbol: &str, days: u32) -> ApiResult<Vec<PricePoint>> {
        self.get_json(&format!(
            "/stocks/{}/price-history?days={}",
            urlencoding::encode(symbol),
            days
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_normalized() {
        let client = DashboardClient::new(ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..ApiConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.url("/status"),
            "http://localhost:8000/api/dashboard/status"
        );
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(error_detail(r#"{"detail": "계좌 정보를 가져올 수 없습니다"}"#), "계좌 정보를 가져올 수 없습니다");
        assert_eq!(error_detail(r#"{"detail": [{"loc": ["query"]}]}"#), r#"[{"loc":["query"]}]"#);
        assert_eq!(error_detail("Internal Server Error"), "Internal Server Error");
    }
}
