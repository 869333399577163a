pub mod bot;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod observability;

use std::sync::Arc;

use anyhow::Context;
use teloxide::Bot;
use teloxide::requests::Requester;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{error, info};

use bot::Dispatcher;
use bot::chat::TelegramChat;
use clients::omdb::OmdbClient;
pub use config::Config;
use db::Store;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    observability::init_tracing(&config)?;
    config.validate()?;
    observability::install_metrics(&config.observability)?;

    info!("Debug mode: {}", config.telegram.debug);
    info!(
        "cinemanager v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let store = Store::with_pool_options(
        &config.database.connection_url(),
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
    .context("Failed to connect to database")?;
    store.ping().await.context("Database ping failed")?;

    let bot = Bot::new(&config.telegram.token);
    let me = bot
        .get_me()
        .await
        .context("Failed to authorize with Telegram")?;
    info!("Authorized on account {}", me.username());

    let dispatcher = Dispatcher::new(
        Arc::new(TelegramChat::new(bot.clone())),
        Arc::new(OmdbClient::new(&config.omdb)?),
        store.clone(),
        me.username(),
    );

    info!("Start listening for updates. Press Enter or Ctrl+C to stop.");
    bot::poller::run(bot, &dispatcher, config.telegram.debug, shutdown_signal()).await;

    drop(dispatcher);
    store.close().await?;
    info!("Bot stopped");

    Ok(())
}

/// Resolves on a newline from stdin or Ctrl+C.
///
/// A closed stdin (e.g. a detached container) leaves only Ctrl+C.
async fn shutdown_signal() {
    let newline = async {
        let mut line = String::new();
        match BufReader::new(tokio::io::stdin()).read_line(&mut line).await {
            Ok(0) => std::future::pending::<()>().await,
            Ok(_) => info!("Shutdown requested from stdin"),
            Err(e) => {
                error!(event = "stdin_read_failed", error = %e, "Error reading stdin");
                std::future::pending::<()>().await;
            }
        }
    };

    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => {
                error!(event = "signal_listen_failed", error = %e, "Error listening for shutdown");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        () = newline => {}
        () = ctrl_c => {}
    }
}
