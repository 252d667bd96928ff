//! KIS Dashboard CLI
//!
//! Terminal front end for the portfolio dashboard:
//! - Show the dashboard once or keep it refreshing
//! - Tail backend logs
//! - Search stocks and fetch price history
//! - Generate a config file

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use kis_dashboard::config::generate_default_config;
use kis_dashboard::dom::LOG_VIEWER_ID;
use kis_dashboard::{logging, Config, Country, DashboardClient, DashboardController, Document, LogType};

#[derive(Parser)]
#[command(name = "kis-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Portfolio dashboard for the KIS trading bot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Config file (default: ./kis-dashboard.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dashboard backend URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Country view (KOR, USA)
    #[arg(long, global = true)]
    pub country: Option<Country>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the dashboard and system status once
    Show,

    /// Refresh the dashboard periodically until Ctrl-C
    Watch {
        /// Refresh interval in seconds
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show the latest backend log lines
    Logs {
        /// Log category (app, error, trading)
        #[arg(short = 't', long = "type")]
        log_type: Option<LogType>,
    },

    /// Search stocks by symbol or name
    Search {
        query: String,
    },

    /// Daily price history of a stock
    History {
        symbol: String,
        /// Number of days
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Resolved config and a controller over a fresh dashboard page
struct Session {
    config: Config,
    controller: DashboardController,
    document: Arc<RwLock<Document>>,
}

impl Session {
    /// Load config, start logging, then build the client and controller
    fn start(args: &GlobalArgs) -> anyhow::Result<Self> {
        let (mut config, report) = match &args.config {
            Some(path) => Config::load_with_env_reported(path)?,
            None => Config::load_default_reported(),
        };
        if let Some(url) = &args.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(country) = args.country {
            config.dashboard.default_country = country;
        }

        if let Err(e) = logging::init(&config.logging) {
            eprintln!("Logging already initialized: {}", e);
        }
        report.log();

        tracing::debug!("KIS Dashboard v{} -> {}", env!("CARGO_PKG_VERSION"), config.api.base_url);

        let api = Arc::new(DashboardClient::new(config.api.clone())?);
        let document = Arc::new(RwLock::new(Document::dashboard_page()));
        let controller = DashboardController::new(api, Arc::clone(&document), &config);

        Ok(Self {
            config,
            controller,
            document,
        })
    }

    fn country(&self) -> Country {
        self.config.dashboard.default_country
    }

    async fn print_page(&self) {
        print!("{}", self.document.read().await.snapshot());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { output } => write_default_config(output.as_deref()),

        Commands::Show => {
            let session = Session::start(&cli.global)?;
            let (dashboard, status) = tokio::join!(
                async { session.controller.switch_country(session.country()).await.await },
                session.controller.load_system_status()
            );
            tracing::debug!(?dashboard, ?status, "Dashboard loaded");
            session.print_page().await;
            Ok(())
        }

        Commands::Watch { interval } => {
            let session = Session::start(&cli.global)?;
            let secs = interval
                .unwrap_or(session.config.dashboard.watch_interval_secs)
                .max(1);
            session.controller.switch_country(session.country()).await.await?;

            let mut ticker = tokio::time::interval(Duration::from_secs(secs));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        session.controller.refresh().await;
                        println!("── {} ──", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
                        session.print_page().await;
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Stopping watch");
                        return Ok(());
                    }
                }
            }
        }

        Commands::Logs { log_type } => {
            let session = Session::start(&cli.global)?;
            let log_type = log_type.unwrap_or(session.config.dashboard.default_log_type);
            session.controller.load_logs(log_type).await;

            let doc = session.document.read().await;
            if let Some(viewer) = doc.get_element_by_id(LOG_VIEWER_ID) {
                for line in viewer.text_lines() {
                    println!("{}", line);
                }
            }
            Ok(())
        }

        Commands::Search { query } => {
            let session = Session::start(&cli.global)?;
            let stocks = session.controller.search_stocks(&query).await;
            println!("{}", serde_json::to_string_pretty(&stocks)?);
            Ok(())
        }

        Commands::History { symbol, days } => {
            let session = Session::start(&cli.global)?;
            let points = session.controller.load_price_history(&symbol, days).await;
            println!("{}", serde_json::to_string_pretty(&points)?);
            Ok(())
        }
    }
}

fn write_default_config(output: Option<&Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
