// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GroupMe integration for the Kudos group bot.
//!
//! - [`server`]: axum webhook listener that turns callbacks into
//!   [`kudos_core::InboundEvent`]s on an mpsc channel
//! - [`client`]: reqwest client that posts bot messages and reads the roster
//! - [`wire`]: JSON shapes for both directions

pub mod client;
pub mod handlers;
pub mod server;
pub mod wire;

pub use client::GroupMeClient;
pub use server::{WebhookState, router, start_server};
