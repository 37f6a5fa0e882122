mod app;
mod config;
mod irc;
mod logging;

use crate::app::lifecycle;
use crate::app::Bot;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load config
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = match config::load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            logging::init(&config::LoggingConfig::default());
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    logging::init(&cfg.logging);
    info!("Config OK");

    if let Err(e) = run(cfg).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cfg: config::BotConfig) -> Result<()> {
    let (reader, writer) = irc::connection::connect(&cfg.hostname, cfg.port, cfg.tls)
        .await
        .with_context(|| format!("Connection to {}:{} failed", cfg.hostname, cfg.port))?;

    let bot = Bot::new(cfg, writer);
    lifecycle::spawn_signal_watcher(bot.events());

    let reason = bot.run(reader).await?;
    info!("Finished: {}", reason);
    Ok(())
}
