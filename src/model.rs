//! Dashboard view models
//!
//! Typed shapes of the `/api/dashboard/*` responses:
//! - `Account`: balance summary for one country account
//! - `Holding`: one owned stock position
//! - `SystemStatus`: scheduler and holdings counters
//! - `StockSummary` / `PricePoint`: search and price-history records
//! - `Country` and `LogType`: the enumerations that parameterize requests
//!
//! None of these are kept past a single render pass.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Portfolio scope selected by the dashboard tabs
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Country {
    /// Domestic (Korea) account, valued in KRW
    #[default]
    #[serde(rename = "KOR")]
    Kor,
    /// Overseas (US) account, valued in USD
    #[serde(rename = "USA")]
    Usa,
}

impl Country {
    /// Get all countries in tab order
    pub fn all() -> &'static [Country] {
        &[Country::Kor, Country::Usa]
    }

    /// Query-string / data-attribute code
    pub fn code(&self) -> &'static str {
        match self {
            Country::Kor => "KOR",
            Country::Usa => "USA",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KOR" | "KR" => Ok(Country::Kor),
            "USA" | "US" => Ok(Country::Usa),
            _ => Err(ParseEnumError {
                kind: "country",
                value: s.to_string(),
            }),
        }
    }
}

/// Log file category served by `/api/dashboard/logs`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    #[default]
    App,
    Error,
    Trading,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::App => "app",
            LogType::Error => "error",
            LogType::Trading => "trading",
        }
    }
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "app" => Ok(LogType::App),
            "error" => Ok(LogType::Error),
            "trading" => Ok(LogType::Trading),
            _ => Err(ParseEnumError {
                kind: "log type",
                value: s.to_string(),
            }),
        }
    }
}

/// Unknown value for one of the dashboard enumerations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Account balance summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// Brokerage account number (not rendered)
    #[serde(default)]
    pub account_number: Option<String>,
    pub total_asset: f64,
    pub cash: f64,
    pub stock_value: f64,
    pub profit_loss: f64,
    /// Profit/loss in percent
    pub profit_loss_rate: f64,
}

/// One owned stock position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    pub avg_price: f64,
    pub current_price: f64,
    pub profit_loss: f64,
    pub profit_loss_rate: f64,
    #[serde(default)]
    pub country: Option<Country>,
}

impl Holding {
    /// Whether the position is at or above break-even
    pub fn is_profit(&self) -> bool {
        self.profit_loss >= 0.0
    }
}

/// Scheduler and holdings counters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemStatus {
    pub scheduler_running: bool,
    /// ISO 8601 timestamp of the last backend update
    pub last_update: String,
    pub total_stocks: u64,
    pub korea_holdings: u64,
    pub usa_holdings: u64,
}

/// Raw log line as returned by the backend
pub type LogLine = String;

/// Stock search hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockSummary {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub country: Option<Country>,
}

/// Daily OHLCV candle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}
