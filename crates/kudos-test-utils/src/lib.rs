// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Kudos integration tests.
//!
//! Provides mock adapters and event fixtures for fast, deterministic tests
//! without a database or the GroupMe API.
//!
//! # Components
//!
//! - [`MemoryStore`] - In-memory store with failure injection and call counters
//! - [`MockOutbound`] - Captures every posted message
//! - [`MockRoster`] - Fixed group roster
//! - [`fixtures`] - Builders for inbound events

pub mod fixtures;
pub mod mock_outbound;
pub mod mock_roster;
pub mod mock_store;

pub use mock_outbound::MockOutbound;
pub use mock_roster::MockRoster;
pub use mock_store::MemoryStore;
