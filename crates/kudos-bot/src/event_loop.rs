// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main inbound event loop.
//!
//! Receives normalized events from the intake channel. For each human event it
//! scores the activity and dispatches any command on a task of its own, so a
//! slow roster or outbound call never holds up the next event.

use std::sync::Arc;

use kudos_core::InboundEvent;
use kudos_engine::EngineHandle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use crate::command;
use crate::dispatch::{CommandContext, Dispatcher};
use crate::scoring::earn_signal;

/// Consumes inbound events and drives scoring and dispatch.
pub struct BotLoop {
    engine: EngineHandle,
    dispatcher: Arc<Dispatcher>,
    prefix: char,
    last_message: Option<String>,
    tracker: TaskTracker,
}

impl BotLoop {
    pub fn new(engine: EngineHandle, dispatcher: Arc<Dispatcher>, prefix: char) -> Self {
        Self {
            engine,
            dispatcher,
            prefix,
            last_message: None,
            tracker: TaskTracker::new(),
        }
    }

    /// Runs until the channel closes or `cancel` fires, then waits for
    /// in-flight handlers to finish.
    pub async fn run(mut self, mut rx: mpsc::Receiver<InboundEvent>, cancel: CancellationToken) {
        info!("bot event loop started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping event loop");
                    break;
                }
                event = rx.recv() => match event {
                    Some(event) => {
                        self.handle_event(event);
                    }
                    None => {
                        debug!("intake channel closed");
                        break;
                    }
                },
            }
        }

        self.tracker.close();
        self.tracker.wait().await;
        info!("bot event loop stopped");
    }

    /// Processes one event. Returns the handler task, or `None` for bot events.
    ///
    /// Bot-originated events are dropped before any state is touched,
    /// including the remembered previous message.
    pub fn handle_event(&mut self, event: InboundEvent) -> Option<JoinHandle<()>> {
        if event.is_from_bot() {
            debug!(sender_id = %event.sender_id, "ignoring bot message");
            return None;
        }

        let parsed = command::parse(&event.text, self.prefix);
        let previous_text = self.last_message.clone();
        if !command::is_command(&event.text, self.prefix) {
            self.last_message = Some(event.text.clone());
        }

        let signal = earn_signal(&event, self.prefix);
        let engine = self.engine.clone();
        let dispatcher = self.dispatcher.clone();

        Some(self.tracker.spawn(async move {
            match engine.earn(&event.user_id, signal).await {
                Ok(applied) => {
                    debug!(user_id = %event.user_id, %signal, balance = applied.value, "scored message")
                }
                Err(e) => warn!(user_id = %event.user_id, error = %e, "scoring failed"),
            }

            let Some(parsed) = parsed else {
                return;
            };
            let ctx = CommandContext {
                user_id: event.user_id,
                sender_name: event.sender_name,
                attachments: event.attachments,
                previous_text,
            };
            if let Err(e) = dispatcher.dispatch(&parsed, &ctx).await {
                error!(command = %parsed.name, error = %e, "command failed");
            }
        }))
    }
}
