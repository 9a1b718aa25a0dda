// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock outbound client that captures posts for assertion in tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use kudos_core::traits::adapter::PluginAdapter;
use kudos_core::traits::outbound::OutboundClient;
use kudos_core::types::{AdapterType, HealthStatus, OutboundMessage};
use kudos_core::KudosError;

/// Records every message passed to `post()`.
#[derive(Default)]
pub struct MockOutbound {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    notify: Arc<Notify>,
}

impl MockOutbound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all messages that were posted.
    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    /// Get only the text of each posted message.
    pub async fn sent_texts(&self) -> Vec<String> {
        self.sent.lock().await.iter().map(|m| m.text.clone()).collect()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Wait until at least `count` messages were posted, or the timeout passes.
    ///
    /// Returns `true` if the count was reached.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let notified = self.notify.notified();
            if self.sent.lock().await.len() >= count {
                return true;
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return self.sent.lock().await.len() >= count;
            }
        }
    }
}

#[async_trait]
impl PluginAdapter for MockOutbound {
    fn name(&self) -> &str {
        "mock-outbound"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Outbound
    }

    async fn health_check(&self) -> Result<HealthStatus, KudosError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl OutboundClient for MockOutbound {
    async fn post(&self, message: OutboundMessage) -> Result<(), KudosError> {
        self.sent.lock().await.push(message);
        self.notify.notify_waiters();
        Ok(())
    }
}
