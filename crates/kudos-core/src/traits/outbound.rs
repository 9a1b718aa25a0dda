// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound client trait for posting messages to the group.

use async_trait::async_trait;

use crate::error::KudosError;
use crate::traits::adapter::PluginAdapter;
use crate::types::OutboundMessage;

/// Posts messages back to the group chat.
#[async_trait]
pub trait OutboundClient: PluginAdapter {
    /// Posts a message with its attachments.
    async fn post(&self, message: OutboundMessage) -> Result<(), KudosError>;
}
