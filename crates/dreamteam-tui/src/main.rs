// Dream team builder entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the stats client and application state
// 4. Create mpsc channels
// 5. Spawn app logic task (which starts the season fetches)
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use dreamteam_app::app;
use dreamteam_app::client::{StatsClient, StatsSource};
use dreamteam_core::config;
use dreamteam_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_path = init_tracing()?;
    info!("Dream team builder starting up (logging to {})", log_path.display());

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded from {}: api={}, seasons {}..{}",
        config
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string()),
        config.api.base_url,
        config.seasons.oldest,
        config.seasons.newest
    );

    let source: Arc<dyn StatsSource> = Arc::new(StatsClient::from_config(&config));

    let (fetch_tx, fetch_rx) = mpsc::channel(app::FETCH_CHANNEL_CAPACITY);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_state = app::AppState::new(config, source, fetch_tx);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, fetch_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // Blocks until the user presses 'q' or Ctrl+C.
    let tui_result = tui::run(ui_rx, cmd_tx).await;
    if let Err(e) = &tui_result {
        error!("TUI error: {:#}", e);
    }

    // The TUI dropped its command sender, so the app loop is on its way out.
    if tokio::time::timeout(Duration::from_secs(5), app_handle)
        .await
        .is_err()
    {
        error!("Application loop did not stop within 5s");
    }

    info!("Dream team builder shut down cleanly");
    tui_result
}

/// Initialize tracing to log to a file (not the terminal, which is used by the
/// TUI). Returns the log file path.
fn init_tracing() -> anyhow::Result<PathBuf> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = match config::project_dirs() {
        Some(dirs) => dirs.data_local_dir().join("logs"),
        None => std::env::current_dir()?.join("logs"),
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_path = log_dir.join("dreamteam.log");
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("failed to create log file {}", log_path.display()))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dreamteam=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(log_path)
}
