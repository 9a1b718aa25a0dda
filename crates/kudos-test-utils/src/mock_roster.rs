// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock roster client with a fixed member list.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use kudos_core::traits::adapter::PluginAdapter;
use kudos_core::traits::roster::RosterClient;
use kudos_core::types::{AdapterType, HealthStatus, Member};
use kudos_core::KudosError;

/// Returns the same members on every call, or a channel error when told to fail.
#[derive(Default)]
pub struct MockRoster {
    members: Vec<Member>,
    fail: AtomicBool,
}

impl MockRoster {
    /// Build a roster from `(user_id, nickname)` pairs.
    pub fn new(members: &[(&str, &str)]) -> Self {
        Self {
            members: members
                .iter()
                .map(|(user_id, nickname)| Member {
                    user_id: (*user_id).to_string(),
                    nickname: (*nickname).to_string(),
                })
                .collect(),
            fail: AtomicBool::new(false),
        }
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PluginAdapter for MockRoster {
    fn name(&self) -> &str {
        "mock-roster"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Roster
    }

    async fn health_check(&self) -> Result<HealthStatus, KudosError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl RosterClient for MockRoster {
    async fn members(&self) -> Result<Vec<Member>, KudosError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(KudosError::Channel {
                message: "roster unavailable".into(),
                source: None,
            });
        }
        Ok(self.members.clone())
    }
}
