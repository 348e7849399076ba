use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, reload, util::SubscriberInitExt};

use vigil_daemon::cli::Command;
use vigil_daemon::daily::start_daily_runner;
use vigil_daemon::AppState;
use vigil_knowledge::KnowledgeBase;

const DEFAULT_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tracing comes up before the config load so its logs are kept.
    // RUST_LOG wins over the configured level.
    let env_filter = EnvFilter::try_from_default_env();
    let level_from_env = env_filter.is_ok();
    let (filter, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = vigil_core::Config::load()?;
    if !level_from_env {
        filter_handle.reload(EnvFilter::new(config.settings.logging.level.as_str()))?;
    }

    info!("Configuration loaded ({})", config.bot_name());
    let providers = config.secrets.available_providers();
    if providers.is_empty() {
        info!("No API providers configured");
    } else {
        info!("API providers available: {}", providers.join(", "));
    }

    match Command::parse(std::env::args().skip(1))? {
        Command::Import { path, category } => {
            let mut knowledge = KnowledgeBase::open(config.knowledge_settings())?;
            let count = knowledge.import_from_file(&path, category.as_deref());
            info!("Import finished: {} entries from {}", count, path.display());
            return Ok(());
        }
        Command::Prompt { text } => {
            let state = AppState::open(config)?;
            println!("{}", state.build_prompt(&text).await?);
            return Ok(());
        }
        Command::Run => {}
    }

    let state = Arc::new(AppState::open(config)?);

    if !state.config.settings.scheduler.enabled {
        warn!("Scheduler disabled in config; nothing to run");
        return Ok(());
    }

    let runner = start_daily_runner(Arc::clone(&state));

    tokio::signal::ctrl_c().await?;
    info!("[{}] Shutting down", state.config.bot_name());
    runner.abort();

    Ok(())
}
