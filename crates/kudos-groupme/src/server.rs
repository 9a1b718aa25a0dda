// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook listener setup.

use axum::{
    Router,
    routing::{get, post},
};
use kudos_config::model::ServerConfig;
use kudos_core::{InboundEvent, KudosError};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for webhook handlers.
#[derive(Clone)]
pub struct WebhookState {
    /// Sender into the bot loop's intake channel.
    pub inbound_tx: mpsc::Sender<InboundEvent>,
}

/// Builds the webhook router: POST / for callbacks, GET /health for probes.
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/", post(handlers::post_callback))
        .route("/health", get(handlers::get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the listener and serves until `cancel` fires.
pub async fn start_server(
    config: &ServerConfig,
    state: WebhookState,
    cancel: CancellationToken,
) -> Result<(), KudosError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| KudosError::Channel {
            message: format!("failed to bind webhook listener to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("webhook listener on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| KudosError::Channel {
            message: format!("webhook server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use kudos_core::SenderKind;
    use tower::ServiceExt;

    fn app(capacity: usize) -> (Router, mpsc::Receiver<InboundEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (router(WebhookState { inbound_tx: tx }), rx)
    }

    fn callback(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn callback_forwards_event_and_acks_empty() {
        let (app, mut rx) = app(4);
        let response = app
            .oneshot(callback(
                r#"{"text":"/ping","sender_type":"user","sender_id":"9","user_id":"9","name":"Al","attachments":[]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());

        let event = rx.recv().await.unwrap();
        assert_eq!(event.text, "/ping");
        assert_eq!(event.user_id, "9");
        assert_eq!(event.sender_kind, SenderKind::Human);
    }

    #[tokio::test]
    async fn malformed_callback_still_acks() {
        let (app, mut rx) = app(4);
        let response = app.oneshot(callback("not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn full_queue_drops_but_acks() {
        let (app, mut rx) = app(1);
        let body = r#"{"text":"a","sender_type":"user"}"#;
        let first = app.clone().oneshot(callback(body)).await.unwrap();
        let second = app.oneshot(callback(body)).await.unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::OK);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn health_reports_version() {
        let (app, _rx) = app(1);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
