// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engagement ledger and media rotation engine for the Kudos group bot.
//!
//! - [`ledger`] - point balances, earning, and transfers
//! - [`catalog`] - submitted pictures, caption lookup, least-shown selection
//! - [`rotation`] - shuffled non-repeating cycle over the catalog
//! - [`engine`] - owns the three and writes mutations through to the store
//! - [`actor`] - runs the engine in a single task behind [`EngineHandle`]

pub mod actor;
pub mod catalog;
pub mod engine;
pub mod ledger;
pub mod rotation;

pub use actor::{EngineHandle, spawn};
pub use engine::Engine;
pub use ledger::PointAwards;
