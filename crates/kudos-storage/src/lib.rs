// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Kudos group bot.
//!
//! Provides WAL-mode SQLite storage with embedded migrations behind the
//! [`kudos_core::StoreAdapter`] trait. The engine only ever sees the trait.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStore;
pub use database::Database;
