// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Roster client trait for group membership lookups.

use async_trait::async_trait;

use crate::error::KudosError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Member;

/// Resolves the current members of the group.
#[async_trait]
pub trait RosterClient: PluginAdapter {
    /// Returns every member of the group with their current nickname.
    async fn members(&self) -> Result<Vec<Member>, KudosError>;
}
