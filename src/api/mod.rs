//! Dashboard API Client
//!
//! Typed access to the trading bot's read-only dashboard routes.
//!
//! # Endpoints
//!
//! - `GET /api/dashboard/account?country={KOR|USA}` - Account summary
//! - `GET /api/dashboard/holdings?country={KOR|USA}` - Owned positions
//! - `GET /api/dashboard/status` - Scheduler and holdings counters
//! - `GET /api/dashboard/logs?log_type={app|error|trading}&lines={n}` - Latest log lines
//! - `GET /api/dashboard/stocks/search?query={q}` - Stock search
//! - `GET /api/dashboard/stocks/{symbol}/price-history?days={n}` - Daily candles
//!
//! # Example
//!
//! ```rust,no_run
//! use kis_dashboard::api::{DashboardApi, DashboardClient};
//! use kis_dashboard::config::ApiConfig;
//! use kis_dashboard::model::Country;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DashboardClient::new(ApiConfig::default())?;
//!     let account = client.account(Country::Kor).await?;
//!     println!("total asset: {}", account.total_asset);
//!     Ok(())
//! }
//! ```

mod client;
mod error;

pub use client::{DashboardApi, DashboardClient};
pub use error::{ApiResult, LoadError};
