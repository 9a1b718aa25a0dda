// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Kudos group bot.

use thiserror::Error;

/// The primary error type used across adapter traits, the engine, and command handlers.
#[derive(Debug, Error)]
pub enum KudosError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Transport errors talking to the chat platform (posting, roster, webhook).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A balance was requested for a user with no points record.
    #[error("no points record for user {user_id}")]
    UserNotFound { user_id: String },

    /// A transfer was attempted with a negative amount.
    #[error("invalid transfer amount {amount}")]
    InvalidAmount { amount: i64 },

    /// A transfer would leave the sender with a negative balance.
    #[error("user {user_id} has {balance} points, cannot send {amount}")]
    InsufficientFunds {
        user_id: String,
        balance: i64,
        amount: i64,
    },

    /// A catalog lookup or dispense found nothing.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// A write-through to the persistent store failed.
    #[error("write to {collection} failed: {message}")]
    StoreWriteFailed { collection: String, message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl KudosError {
    /// Wraps any storage-layer error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        KudosError::Storage {
            source: Box::new(err),
        }
    }

    /// Returns `true` for the errors a command handler answers with a reply
    /// instead of logging.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            KudosError::UserNotFound { .. }
                | KudosError::InvalidAmount { .. }
                | KudosError::InsufficientFunds { .. }
                | KudosError::NotFound { .. }
        )
    }
}
