//! Dashboard View Controller
//!
//! Owns the view state (selected country, load generation) and runs the
//! loaders that fetch one endpoint each and re-render their region of the
//! page.
//!
//! ## Load generations
//!
//! Every country switch bumps the generation and aborts the reload started
//! by the previous switch. A loader that finishes under an older generation
//! discards its result, so a late response for the previous country never
//! overwrites the current view.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::{AbortHandle, JoinHandle};

use crate::api::DashboardApi;
use crate::config::{Config, DashboardConfig};
use crate::dom::{
    Document, DomResult, HOLDINGS_COUNT_ID, HOLDINGS_TABLE_ID, LOG_VIEWER_ID, TAB_BUTTON_CLASS,
};
use crate::format::{format_currency, format_date, format_number, format_signed_percent};
use crate::model::{Account, Country, Holding, LogLine, LogType, PricePoint, StockSummary, SystemStatus};
use crate::render;
use crate::toast::Notifier;

pub const ACCOUNT_ERROR_MESSAGE: &str = "계좌 정보를 불러올 수 없습니다.";
pub const HOLDINGS_ERROR_MESSAGE: &str = "보유 종목을 불러올 수 없습니다.";

/// What a loader did with its region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fresh data rendered
    Rendered,
    /// Fetch or render failed; fallback shown or logged
    Failed,
    /// Result belonged to a superseded generation and was dropped
    Stale,
}

impl LoadOutcome {
    /// Combine the outcomes of loaders that ran together
    fn merge(self, other: LoadOutcome) -> LoadOutcome {
        use LoadOutcome::*;
        match (self, other) {
            (Stale, _) | (_, Stale) => Stale,
            (Rendered, Rendered) => Rendered,
            _ => Failed,
        }
    }
}

/// Selected country and current load generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    country: Country,
    generation: u64,
}

impl ViewState {
    pub fn new(country: Country) -> Self {
        Self {
            country,
            generation: 0,
        }
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Select a country and start a new generation
    fn select(&mut self, country: Country) -> u64 {
        self.country = country;
        self.generation += 1;
        self.generation
    }
}

/// Fetches dashboard data and renders it into the shared document
#[derive(Clone)]
pub struct DashboardController {
    api: Arc<dyn DashboardApi>,
    document: Arc<RwLock<Document>>,
    notifier: Notifier,
    state: Arc<RwLock<ViewState>>,
    in_flight: Arc<Mutex<Option<AbortHandle>>>,
    settings: DashboardConfig,
}

impl DashboardController {
    pub fn new(api: Arc<dyn DashboardApi>, document: Arc<RwLock<Document>>, config: &Config) -> Self {
        Self {
            notifier: Notifier::new(Arc::clone(&document), config.toast.clone()),
            state: Arc::new(RwLock::new(ViewState::new(config.dashboard.default_country))),
            in_flight: Arc::new(Mutex::new(None)),
            settings: config.dashboard.clone(),
            api,
            document,
        }
    }

    pub fn document(&self) -> Arc<RwLock<Document>> {
        Arc::clone(&self.document)
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub async fn view_state(&self) -> ViewState {
        *self.state.read().await
    }

    pub async fn country(&self) -> Country {
        self.state.read().await.country()
    }

    /// Select a country tab and reload the dashboard for it
    ///
    /// The reload runs as a spawned task; the previous switch's reload is
    /// aborted.
    pub async fn switch_country(&self, country: Country) -> JoinHandle<LoadOutcome> {
        let generation = self.state.write().await.select(country);
        tracing::info!(country = %country, generation, "Switching country");

        self.document.write().await.for_each_with_class(TAB_BUTTON_CLASS, |button| {
            button.remove_class("active");
            if button.data("country") == Some(country.code()) {
                button.add_class("active");
            }
        });

        let this = self.clone();
        let handle = tokio::spawn(async move { this.load_generation(country, generation).await });

        if let Some(previous) = self.in_flight.lock().await.replace(handle.abort_handle()) {
            previous.abort();
        }

        handle
    }

    /// Load account info and holdings concurrently
    pub async fn load_dashboard(&self, country: Country) -> LoadOutcome {
        let generation = self.state.read().await.generation();
        self.load_generation(country, generation).await
    }

    async fn load_generation(&self, country: Country, generation: u64) -> LoadOutcome {
        let (account, holdings) = tokio::join!(
            self.load_account_at(country, generation),
            self.load_holdings_at(country, generation)
        );

        let outcome = account.merge(holdings);
        if outcome == LoadOutcome::Failed {
            tracing::warn!(country = %country, ?account, ?holdings, "Dashboard load incomplete");
        }
        outcome
    }

    /// Load and render the account summary cards
    pub async fn load_account_info(&self, country: Country) -> LoadOutcome {
        let generation = self.state.read().await.generation();
        self.load_account_at(country, generation).await
    }

    async fn load_account_at(&self, country: Country, generation: u64) -> LoadOutcome {
        let result = self.api.account(country).await;
        if self.is_stale(generation).await {
            tracing::debug!(country = %country, generation, "Discarding stale account info");
            return LoadOutcome::Stale;
        }

        match result {
            Ok(account) => {
                let mut doc = self.document.write().await;
                self.rendered(render_account(&mut doc, &account, country))
            }
            Err(e) => {
                tracing::error!(country = %country, error = %e, "Failed to load account info");
                self.notifier.show_error(ACCOUNT_ERROR_MESSAGE).await;
                LoadOutcome::Failed
            }
        }
    }

    /// Load and render the holdings table
    pub async fn load_holdings(&self, country: Country) -> LoadOutcome {
        let generation = self.state.read().await.generation();
        self.load_holdings_at(country, generation).await
    }

    async fn load_holdings_at(&self, country: Country, generation: u64) -> LoadOutcome {
        let result = self.api.holdings(country).await;
        if self.is_stale(generation).await {
            tracing::debug!(country = %country, generation, "Discarding stale holdings");
            return LoadOutcome::Stale;
        }

        match result {
            Ok(holdings) => {
                let mut doc = self.document.write().await;
                self.rendered(render_holdings(&mut doc, &holdings, country))
            }
            Err(e) => {
                tracing::error!(country = %country, error = %e, "Failed to load holdings");
                self.notifier.show_error(HOLDINGS_ERROR_MESSAGE).await;
                LoadOutcome::Failed
            }
        }
    }

    /// Load and render the system status panel (failures are only logged)
    pub async fn load_system_status(&self) -> LoadOutcome {
        match self.api.system_status().await {
            Ok(status) => {
                let mut doc = self.document.write().await;
                self.rendered(render_status(&mut doc, &status))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load system status");
                LoadOutcome::Failed
            }
        }
    }

    /// Load the latest log lines of one category into the log viewer
    pub async fn load_logs(&self, log_type: LogType) -> LoadOutcome {
        let result = self.api.logs(log_type, self.settings.log_lines).await;
        let mut doc = self.document.write().await;

        match result {
            Ok(lines) => self.rendered(render_logs(&mut doc, &lines)),
            Err(e) => {
                tracing::error!(log_type = %log_type, error = %e, "Failed to load logs");
                if let Err(e) = doc
                    .element_mut(LOG_VIEWER_ID)
                    .map(|viewer| viewer.set_inner_html(render::logs_error()))
                {
                    tracing::error!(error = %e, "Cannot show log error");
                }
                LoadOutcome::Failed
            }
        }
    }

    /// Search stocks by symbol or name; empty on failure
    pub async fn search_stocks(&self, query: &str) -> Vec<StockSummary> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match self.api.search_stocks(query).await {
            Ok(stocks) => stocks,
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Stock search failed");
                Vec::new()
            }
        }
    }

    /// Daily price history for a symbol; empty on failure
    pub async fn load_price_history(&self, symbol: &str, days: Option<u32>) -> Vec<PricePoint> {
        let days = days.unwrap_or(self.settings.price_history_days);

        match self.api.price_history(symbol, days).await {
            Ok(points) => points,
            Err(e) => {
                tracing::error!(symbol = %symbol, days, error = %e, "Failed to load price history");
                Vec::new()
            }
        }
    }

    /// Reload the current country's dashboard together with the status panel
    pub async fn refresh(&self) -> (LoadOutcome, LoadOutcome) {
        let country = self.country().await;
        tokio::join!(self.load_dashboard(country), self.load_system_status())
    }

    async fn is_stale(&self, generation: u64) -> bool {
        self.state.read().await.generation() != generation
    }

    fn rendered(&self, result: DomResult<()>) -> LoadOutcome {
        match result {
            Ok(()) => LoadOutcome::Rendered,
            Err(e) => {
                tracing::error!(error = %e, "Render failed");
                LoadOutcome::Failed
            }
        }
    }
}

/// Fill the account summary cards
pub fn render_account(doc: &mut Document, account: &Account, country: Country) -> DomResult<()> {
    doc.set_text("total-asset", format_currency(Some(account.total_asset), country))?;
    doc.set_text("cash", format_currency(Some(account.cash), country))?;
    doc.set_text("stock-value", format_currency(Some(account.stock_value), country))?;
    doc.set_text("profit-loss", format_currency(Some(account.profit_loss), country))?;

    let rate = account.profit_loss_rate;
    let class_name = format!("card-change {}", render::trend_class(rate));

    let rate_el = doc.element_mut("profit-loss-rate")?;
    rate_el.set_text(format_signed_percent(rate));
    rate_el.set_class_name(&class_name);

    let change_el = doc.element_mut("total-asset-change")?;
    change_el.set_text(format!("전일 대비 {}", format_signed_percent(rate)));
    change_el.set_class_name(&class_name);

    Ok(())
}

/// Replace the holdings table body and count label
pub fn render_holdings(doc: &mut Document, holdings: &[Holding], country: Country) -> DomResult<()> {
    let html = if holdings.is_empty() {
        render::holdings_empty_row()
    } else {
        render::holdings_rows(holdings, country)
    };

    doc.element_mut(HOLDINGS_TABLE_ID)?.set_inner_html(html);
    doc.set_text(HOLDINGS_COUNT_ID, render::holdings_count_label(holdings.len()))
}

/// Fill the system status panel
pub fn render_status(doc: &mut Document, status: &SystemStatus) -> DomResult<()> {
    let (label, badge) = if status.scheduler_running {
        ("실행 중", "badge-success")
    } else {
        ("중지됨", "badge-danger")
    };
    let scheduler = doc.element_mut("scheduler-status")?;
    scheduler.set_text(label);
    scheduler.set_class_name(&format!("badge {}", badge));

    doc.set_text("last-update", format_date(&status.last_update))?;
    doc.set_text("total-stocks", format_number(Some(status.total_stocks as f64), 0))?;
    doc.set_text("korea-holdings", format_number(Some(status.korea_holdings as f64), 0))?;
    doc.set_text("usa-holdings", format_number(Some(status.usa_holdings as f64), 0))
}

/// Replace the log viewer content and scroll to its end
pub fn render_logs(doc: &mut Document, lines: &[LogLine]) -> DomResult<()> {
    let viewer = doc.element_mut(LOG_VIEWER_ID)?;
    if lines.is_empty() {
        viewer.set_inner_html(render::logs_empty());
        return Ok(());
    }

    viewer.set_inner_html(render::log_lines(lines));
    viewer.scroll_to_bottom();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DomError;

    fn account(rate: f64) -> Account {
        Account {
            account_number: None,
            total_asset: 10_500_000.0,
            cash: 500_000.0,
            stock_value: 10_000_000.0,
            profit_loss: -120_000.0,
            profit_loss_rate: rate,
        }
    }

    #[test]
    fn test_outcome_merge() {
        use LoadOutcome::*;
        assert_eq!(Rendered.merge(Rendered), Rendered);
        assert_eq!(Rendered.merge(Failed), Failed);
        assert_eq!(Failed.merge(Stale), Stale);
    }

    #[test]
    fn test_view_state_select() {
        let mut state = ViewState::new(Country::Kor);
        assert_eq!(state.select(Country::Usa), 1);
        assert_eq!(state.select(Country::Usa), 2);
        assert_eq!(state.country(), Country::Usa);
    }

    #[test]
    fn test_render_account() {
        let mut doc = Document::dashboard_page();
        render_account(&mut doc, &account(-1.2), Country::Kor).unwrap();

        let text = |id: &str| doc.get_element_by_id(id).unwrap().text_content();
        assert_eq!(text("total-asset"), "₩10,500,000");
        assert_eq!(text("profit-loss"), "-₩120,000");
        assert_eq!(text("profit-loss-rate"), "-1.20%");
        assert_eq!(text("total-asset-change"), "전일 대비 -1.20%");

        let rate = doc.get_element_by_id("profit-loss-rate").unwrap();
        assert_eq!(rate.class_name(), "card-change negative");
    }

    #[test]
    fn test_render_account_missing_element() {
        let mut doc = Document::new();
        let err = render_account(&mut doc, &account(0.0), Country::Kor).unwrap_err();
        assert_eq!(err, DomError::MissingElement("total-asset".to_string()));
    }

    #[test]
    fn test_render_status() {
        let mut doc = Document::dashboard_page();
        let status = SystemStatus {
            scheduler_running: false,
            last_update: "2024-01-15T14:30:00".to_string(),
            total_stocks: 2345,
            korea_holdings: 3,
            usa_holdings: 0,
        };
        render_status(&mut doc, &status).unwrap();

        let scheduler = doc.get_element_by_id("scheduler-status").unwrap();
        assert_eq!(scheduler.text_content(), "중지됨");
        assert_eq!(scheduler.class_name(), "badge badge-danger");
        assert_eq!(
            doc.get_element_by_id("last-update").unwrap().text_content(),
            "2024. 01. 15. 오후 02:30"
        );
        assert_eq!(doc.get_element_by_id("total-stocks").unwrap().text_content(), "2,345");
    }

    #[test]
    fn test_render_logs_scrolls_to_bottom() {
        let mut doc = Document::dashboard_page();
        let lines: Vec<LogLine> = (0..5).map(|i| format!("line {}\n", i)).collect();
        render_logs(&mut doc, &lines).unwrap();

        let viewer = doc.get_element_by_id(LOG_VIEWER_ID).unwrap();
        assert_eq!(viewer.count_tag("div"), 5);
        assert_eq!(viewer.scroll_top(), viewer.scroll_height());
        assert_eq!(viewer.scroll_top(), 5);
    }

    #[test]
    fn test_render_logs_empty() {
        let mut doc = Document::dashboard_page();
        render_logs(&mut doc, &[]).unwrap();
        let viewer = doc.get_element_by_id(LOG_VIEWER_ID).unwrap();
        assert_eq!(viewer.text_content(), render::LOGS_EMPTY_MESSAGE);
    }
}
