// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command parsing, scoring, and dispatch for the Kudos group bot.
//!
//! The [`BotLoop`] consumes normalized inbound events, awards points through
//! the engine, and hands commands to the [`Dispatcher`].

pub mod command;
pub mod dispatch;
pub mod event_loop;
pub mod format;
pub mod mention;
pub mod scoring;
pub mod text;

pub use command::{CommandKind, ParsedCommand};
pub use dispatch::{CommandContext, Dispatcher};
pub use event_loop::BotLoop;
