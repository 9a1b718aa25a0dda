// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP handlers for the webhook listener.
//!
//! Handles POST / (GroupMe callback) and GET /health.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
};
use kudos_core::InboundEvent;
use serde::Serialize;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::server::WebhookState;
use crate::wire::WebhookPayload;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// POST / -- GroupMe callback.
///
/// GroupMe only needs an acknowledgement, so the reply is always an empty
/// 200. The event is queued for the bot loop without waiting on it; malformed
/// bodies and a full queue are logged and dropped.
pub async fn post_callback(State(state): State<WebhookState>, body: Bytes) -> StatusCode {
    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, bytes = body.len(), "discarding malformed callback");
            return StatusCode::OK;
        }
    };

    let event = InboundEvent::from(payload);
    debug!(sender_id = %event.sender_id, kind = ?event.sender_kind, "callback received");
    match state.inbound_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            warn!(sender_id = %event.sender_id, "intake queue full, dropping event");
        }
        Err(TrySendError::Closed(_)) => {
            warn!("intake queue closed, dropping event");
        }
    }
    StatusCode::OK
}

/// GET /health
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
