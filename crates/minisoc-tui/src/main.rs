//! `minisoc`: terminal SOC dashboard for SSH, nginx and web-attack logs.
//!
//! Polls a minisoc backend (`/api/ssh/*`, `/api/nginx/*`, `/api/attacks/*`)
//! and renders one tab per domain: Overview, Attacks, SSH and Nginx. Only the
//! visible tab polls; the attack badge refreshes in the background.
//!
//! Logs go to a file (default `/tmp/minisoc.log`) so they never corrupt the
//! terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use minisoc_core::{Dashboard, DashboardConfig};

use crate::app::App;

/// Terminal dashboard for SSH, nginx and web-attack monitoring.
#[derive(Parser, Debug)]
#[command(name = "minisoc", version, about)]
struct Cli {
    /// Backend URL, host root only (e.g. http://127.0.0.1:8000)
    #[arg(short = 'u', long, env = "MINISOC_URL")]
    url: Option<String>,

    /// Stats window in hours (1-168)
    #[arg(short = 'w', long, env = "MINISOC_WINDOW_HOURS")]
    window_hours: Option<u32>,

    /// Config file (defaults to the platform config dir)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "/tmp/minisoc.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing; stdout belongs to the terminal UI. Hold the guard
/// until exit so buffered lines are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "minisoc={log_level},minisoc_core={log_level},minisoc_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("minisoc.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Config file and environment first, then CLI flags on top.
fn resolve_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = minisoc_config::load_config(cli.config.as_deref())?;
    if let Some(url) = &cli.url {
        config.backend.url.clone_from(url);
    }
    if let Some(hours) = cli.window_hours {
        config.dashboard.window_hours = hours;
    }
    config.validate()?;
    Ok(config.to_dashboard_config()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    // Bad config is reported on the plain terminal, before the UI starts.
    let config = resolve_config(&cli)?;
    info!(
        url = %config.url,
        window_hours = config.window_hours,
        "starting minisoc"
    );

    let dashboard = Dashboard::new(&config)?;
    let mut app = App::new(dashboard);
    app.run().await
}
