// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the GroupMe v3 API.
//!
//! Posts bot messages through `bots/post` and reads the group roster through
//! `groups/:id`. Either half can be left unconfigured; calls to the missing
//! half fail with a configuration error instead of reaching the network.

use std::time::Duration;

use async_trait::async_trait;
use kudos_config::model::GroupMeConfig;
use kudos_core::{
    AdapterType, HealthStatus, KudosError, Member, OutboundClient, OutboundMessage, PluginAdapter,
    RosterClient,
};
use tracing::debug;

use crate::wire::{BotPost, GroupEnvelope};

/// Request timeout for GroupMe API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GroupMe API client, implementing both outbound posting and roster lookup.
#[derive(Debug, Clone)]
pub struct GroupMeClient {
    client: reqwest::Client,
    api_base: String,
    bot_id: Option<String>,
    access_token: Option<String>,
    group_id: Option<String>,
}

impl GroupMeClient {
    /// Creates a client from the `[groupme]` config section.
    pub fn new(config: &GroupMeConfig) -> Result<Self, KudosError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| KudosError::Channel {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_id: config.bot_id.clone(),
            access_token: config.access_token.clone(),
            group_id: config.group_id.clone(),
        })
    }

    fn group_url(&self) -> Result<String, KudosError> {
        let (Some(group_id), Some(token)) = (&self.group_id, &self.access_token) else {
            return Err(KudosError::Config(
                "groupme.group_id and groupme.access_token are required for roster lookups"
                    .into(),
            ));
        };
        Ok(format!("{}/groups/{group_id}?token={token}", self.api_base))
    }
}

fn request_error(what: &str, e: reqwest::Error) -> KudosError {
    KudosError::Channel {
        message: format!("{what} request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

async fn status_error(what: &str, response: reqwest::Response) -> KudosError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    KudosError::Channel {
        message: format!("{what} returned {status}: {body}"),
        source: None,
    }
}

#[async_trait]
impl PluginAdapter for GroupMeClient {
    fn name(&self) -> &str {
        "groupme"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Outbound
    }

    async fn health_check(&self) -> Result<HealthStatus, KudosError> {
        Ok(match (&self.bot_id, &self.group_id) {
            (Some(_), Some(_)) => HealthStatus::Healthy,
            (None, _) => HealthStatus::Degraded("no bot_id configured, replies are dropped".into()),
            (_, None) => HealthStatus::Degraded("no group_id configured, roster unavailable".into()),
        })
    }
}

#[async_trait]
impl OutboundClient for GroupMeClient {
    async fn post(&self, message: OutboundMessage) -> Result<(), KudosError> {
        let Some(bot_id) = &self.bot_id else {
            return Err(KudosError::Config(
                "groupme.bot_id is required to post messages".into(),
            ));
        };

        let body = BotPost::new(bot_id, &message);
        let response = self
            .client
            .post(format!("{}/bots/post", self.api_base))
            .json(&body)
            .send()
            .await
            .map_err(|e| request_error("bots/post", e))?;

        if !response.status().is_success() {
            return Err(status_error("bots/post", response).await);
        }
        debug!(
            chars = body.text.chars().count(),
            attachments = body.attachments.len(),
            "message posted"
        );
        Ok(())
    }
}

#[async_trait]
impl RosterClient for GroupMeClient {
    async fn members(&self) -> Result<Vec<Member>, KudosError> {
        let url = self.group_url()?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error("groups", e))?;

        if !response.status().is_success() {
            return Err(status_error("groups", response).await);
        }

        let envelope: GroupEnvelope = response.json().await.map_err(|e| KudosError::Channel {
            message: format!("failed to parse group response: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(envelope
            .response
            .members
            .into_iter()
            .map(Member::from)
            .collect())
    }
}
