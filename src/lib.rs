//! # KIS Dashboard
//!
//! Client for the trading bot's portfolio dashboard: loads account,
//! holdings, system status and log data from the `/api/dashboard` routes
//! and renders it into a page of id-addressed elements.
//!
//! ## Modules
//!
//! - [`model`]: Typed view models of the API responses
//! - [`format`]: ko-KR number, currency and date formatting
//! - [`api`]: `DashboardApi` trait and its reqwest client
//! - [`dom`]: In-memory page the loaders render into
//! - [`render`]: Markup for table rows, log lines and toasts
//! - [`controller`]: View state and the per-region loaders
//! - [`toast`]: Auto-dismissing notifications
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::RwLock;
//! use kis_dashboard::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let api = Arc::new(DashboardClient::new(config.api.clone())?);
//!     let document = Arc::new(RwLock::new(Document::dashboard_page()));
//!     let controller = DashboardController::new(api, Arc::clone(&document), &config);
//!
//!     controller.switch_country(Country::Usa).await.await?;
//!     controller.load_system_status().await;
//!
//!     println!("{}", document.read().await.snapshot());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod dom;
pub mod format;
pub mod logging;
pub mod model;
pub mod render;
pub mod toast;

// Re-export top-level types for convenience
pub use api::{ApiResult, DashboardApi, DashboardClient, LoadError};

pub use config::{
    ApiConfig, Config, ConfigError, ConfigReport, DashboardConfig, LoggingConfig, ToastConfig,
};

pub use controller::{DashboardController, LoadOutcome, ViewState};

pub use dom::{Document, DomError, Element};

pub use format::{format_currency, format_date, format_number};

pub use model::{Account, Country, Holding, LogLine, LogType, PricePoint, StockSummary, SystemStatus};

pub use toast::{Notifier, ToastId, ToastKind, ToastPhase};
