// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the external collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod outbound;
pub mod roster;
pub mod store;

pub use adapter::PluginAdapter;
pub use outbound::OutboundClient;
pub use roster::RosterClient;
pub use store::StoreAdapter;
