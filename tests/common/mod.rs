//! Shared fixtures: a scripted `DashboardApi` and an axum mock backend

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

use kis_dashboard::{
    Account, ApiResult, Config, Country, DashboardApi, DashboardController, Document, Holding,
    LoadError, LogLine, LogType, PricePoint, StockSummary, SystemStatus,
};

/// A canned response returned after `delay`
#[derive(Clone)]
pub struct Scripted<T> {
    pub delay: Duration,
    pub result: ApiResult<T>,
}

impl<T> Scripted<T> {
    pub fn ok(value: T) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(value),
        }
    }

    pub fn err(err: LoadError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(err),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

fn unavailable<T>() -> Scripted<T> {
    Scripted::err(LoadError::Status {
        status: 503,
        message: "not scripted".to_string(),
    })
}

/// `DashboardApi` answering from a script and recording every call
#[derive(Default)]
pub struct StubApi {
    pub accounts: HashMap<Country, Scripted<Account>>,
    pub holdings: HashMap<Country, Scripted<Vec<Holding>>>,
    pub status: Option<Scripted<SystemStatus>>,
    pub logs: Option<Scripted<Vec<LogLine>>>,
    pub search: Option<Scripted<Vec<StockSummary>>>,
    pub history: Option<Scripted<Vec<PricePoint>>>,
    pub calls: Mutex<Vec<String>>,
}

impl StubApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

async fn play<T: Clone>(script: Option<&Scripted<T>>) -> ApiResult<T> {
    let script = script.cloned().unwrap_or_else(unavailable);
    if !script.delay.is_zero() {
        tokio::time::sleep(script.delay).await;
    }
    script.result
}

#[async_trait]
impl DashboardApi for StubApi {
    async fn account(&self, country: Country) -> ApiResult<Account> {
        self.record(format!("account {}", country));
        play(self.accounts.get(&country)).await
    }

    async fn holdings(&self, country: Country) -> ApiResult<Vec<Holding>> {
        self.record(format!("holdings {}", country));
        play(self.holdings.get(&country)).await
    }

    async fn system_status(&self) -> ApiResult<SystemStatus> {
        self.record("status".to_string());
        play(self.status.as_ref()).await
    }

    async fn logs(&self, log_type: LogType, lines: usize) -> ApiResult<Vec<LogLine>> {
        self.record(format!("logs {} {}", log_type, lines));
        play(self.logs.as_ref()).await
    }

    async fn search_stocks(&self, query: &str) -> ApiResult<Vec<StockSummary>> {
        self.record(format!("search {}", query));
        play(self.search.as_ref()).await
    }

    async fn price_history(&self, symbol: &str, days: u32) -> ApiResult<Vec<PricePoint>> {
        self.record(format!("history {} {}", symbol, days));
        play(self.history.as_ref()).await
    }
}

pub fn account(total_asset: f64, profit_loss_rate: f64) -> Account {
    Account {
        account_number: Some("12345678-01".to_string()),
        total_asset,
        cash: total_asset * 0.1,
        stock_value: total_asset * 0.9,
        profit_loss: total_asset * profit_loss_rate / 100.0,
        profit_loss_rate,
    }
}

pub fn holding(symbol: &str, profit_loss: f64) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        name: format!("{} 주식", symbol),
        quantity: 10.0,
        avg_price: 100.0,
        current_price: 100.0 + profit_loss / 10.0,
        profit_loss,
        profit_loss_rate: profit_loss / 10.0,
        country: None,
    }
}

pub fn status() -> SystemStatus {
    SystemStatus {
        scheduler_running: true,
        last_update: "2024-05-01T09:15:00.000001".to_string(),
        total_stocks: 1520,
        korea_holdings: 4,
        usa_holdings: 2,
    }
}

/// Controller over the dashboard page with the given API
pub fn setup(api: Arc<dyn DashboardApi>) -> (DashboardController, Arc<RwLock<Document>>) {
    let document = Arc::new(RwLock::new(Document::dashboard_page()));
    let controller = DashboardController::new(api, Arc::clone(&document), &Config::default());
    (controller, document)
}

pub async fn text(document: &RwLock<Document>, id: &str) -> String {
    document
        .read()
        .await
        .get_element_by_id(id)
        .map(|el| el.text_content())
        .unwrap_or_default()
}

/// Serve `router` on an ephemeral local port; returns the base URL
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
