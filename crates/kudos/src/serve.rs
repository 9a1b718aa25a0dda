// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kudos serve` implementation.
//!
//! Opens the store, loads the ledger and catalog into the engine task, wires
//! the GroupMe client into the dispatcher, and runs the webhook listener and
//! bot loop until a shutdown signal arrives.

use std::sync::Arc;

use kudos_bot::{BotLoop, Dispatcher};
use kudos_config::KudosConfig;
use kudos_core::{HealthStatus, KudosError, PluginAdapter};
use kudos_engine::{Engine, PointAwards};
use kudos_groupme::{GroupMeClient, WebhookState};
use kudos_storage::SqliteStore;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::shutdown;

/// Capacity of the webhook-to-bot-loop channel.
const INTAKE_QUEUE_DEPTH: usize = 128;

/// Runs the bot until SIGINT/SIGTERM.
pub async fn run_serve(config: KudosConfig) -> Result<(), KudosError> {
    init_tracing(&config.bot.log_level);

    info!(name = %config.bot.name, "starting kudos serve");

    let store = Arc::new(SqliteStore::open(&config.storage).await?);
    info!(path = %store.path(), "store opened");

    let mut engine = Engine::new(store.clone(), PointAwards::from(&config.points));
    engine.load_from_store().await?;
    info!(
        users = engine.points().len(),
        pictures = engine.pictures().len(),
        "state loaded"
    );
    let (engine_handle, engine_task) = kudos_engine::spawn(engine);

    let groupme = Arc::new(GroupMeClient::new(&config.groupme)?);
    match groupme.health_check().await? {
        HealthStatus::Healthy => {}
        HealthStatus::Degraded(reason) | HealthStatus::Unhealthy(reason) => {
            warn!(adapter = groupme.name(), %reason, "adapter degraded");
        }
    }

    let dispatcher = Arc::new(Dispatcher::new(
        engine_handle.clone(),
        groupme.clone(),
        groupme,
        config.bot.command_prefix,
        config.bot.max_message_len,
    ));
    let bot_loop = BotLoop::new(engine_handle, dispatcher, config.bot.command_prefix);

    let cancel = shutdown::install_signal_handler();
    let (inbound_tx, inbound_rx) = mpsc::channel(INTAKE_QUEUE_DEPTH);

    let server_cancel = cancel.clone();
    let server_config = config.server.clone();
    let server = tokio::spawn(async move {
        kudos_groupme::start_server(&server_config, WebhookState { inbound_tx }, server_cancel)
            .await
    });

    // A bind failure cancels the loop so the process exits instead of idling.
    let watchdog_cancel = cancel.clone();
    let server = tokio::spawn(async move {
        let result = server.await;
        watchdog_cancel.cancel();
        result
    });

    bot_loop.run(inbound_rx, cancel).await;

    match server.await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => error!(error = %e, "webhook listener failed"),
        Ok(Err(e)) | Err(e) => error!(error = %e, "webhook listener task panicked"),
    }

    // All engine handles are gone once the loop returns, so the task drains and exits.
    if let Err(e) = engine_task.await {
        error!(error = %e, "engine task panicked");
    }

    if let Err(e) = store.close().await {
        warn!(error = %e, "store checkpoint failed on shutdown");
    }
    info!("kudos stopped");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kudos={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
