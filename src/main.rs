// habitui - terminal client for a habit-tracking backend
//
// Startup order matters: CLI subcommands run and exit before any terminal
// or logging setup, and tracing must be wired to the in-memory buffer
// before the alternate screen takes over stdout.

use anyhow::Result;
use habitui::api::ApiClient;
use habitui::cli;
use habitui::config::{Config, LogRotation};
use habitui::logging::{LogBuffer, LogLevel, TuiLogLayer};
use habitui::messages::ApiMsg;
use habitui::tui::{self, app::App};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    if cli::handle_cli() {
        return Ok(());
    }

    Config::ensure_config_exists();
    let config = Config::from_env();

    let log_buffer = LogBuffer::new();
    // The guard flushes the file writer on drop; keep it alive for the
    // whole run.
    let _guard = init_tracing(&config, log_buffer.clone());

    tracing::info!("starting habitui against {}", config.api_url);

    let api = ApiClient::new(&config.api_url);
    let (tx, rx) = mpsc::channel::<ApiMsg>(64);
    let app = App::new(api, tx, log_buffer.clone(), &config);

    let result = tui::run_tui(app, rx).await;

    // The alternate screen is gone now; replay anything worth seeing so
    // warnings that only flashed through the status bar aren't lost.
    for entry in log_buffer.get_all() {
        if entry.level <= LogLevel::Warn {
            eprintln!(
                "{} {:5} {}",
                entry.timestamp.format("%H:%M:%S"),
                entry.level.as_str(),
                entry.message
            );
        }
    }

    result
}

/// Wire up tracing: EnvFilter (RUST_LOG > configured level), the TUI ring
/// buffer layer, and optionally a rotating JSON file layer.
fn init_tracing(config: &Config, buffer: LogBuffer) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("habitui={}", config.logging.level)));

    let (file_layer, guard) = if config.logging.file_enabled {
        let logging = &config.logging;
        let appender = match logging.file_rotation {
            LogRotation::Hourly => {
                tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
            }
            LogRotation::Daily => {
                tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
            }
            LogRotation::Never => {
                tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
            }
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(buffer))
        .with(file_layer)
        .init();

    guard
}
