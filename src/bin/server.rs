use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use connect_four::config::AppConfig;
use connect_four::service::{router, GameService, MoveJournal};

/// Serve Connect Four games over HTTP.
#[derive(Parser, Debug)]
#[command(name = "connect-four-server", version, about)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the move journal path
    #[arg(long)]
    move_log: Option<PathBuf>,

    /// Disable the move journal
    #[arg(long, conflicts_with = "move_log")]
    no_move_log: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if cli.no_move_log {
        config.server.move_log = None;
    } else if let Some(path) = cli.move_log {
        config.server.move_log = Some(path);
    }

    let journal = match &config.server.move_log {
        Some(path) => {
            let journal = MoveJournal::open(path)
                .with_context(|| format!("opening move log {}", path.display()))?;
            log::info!("journaling moves to {}", path.display());
            Some(journal)
        }
        None => None,
    };

    let service = Arc::new(GameService::new(config.search, journal));
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("binding {}", config.server.bind))?;
    log::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    log::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    log::info!("shutdown requested");
}
