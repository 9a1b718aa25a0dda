// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Kudos group bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Kudos configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KudosConfig {
    /// Bot identity and command behavior.
    #[serde(default)]
    pub bot: BotConfig,

    /// GroupMe bot credentials and API location.
    #[serde(default)]
    pub groupme: GroupMeConfig,

    /// Webhook server bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Points awarded per kind of activity.
    #[serde(default)]
    pub points: PointsConfig,
}

/// Bot identity and command behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name used in logs.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Character that marks a message as a command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: char,

    /// Longest text the platform accepts in one post.
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
            command_prefix: default_command_prefix(),
            max_message_len: default_max_message_len(),
        }
    }
}

fn default_bot_name() -> String {
    "kudos".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_command_prefix() -> char {
    '/'
}

fn default_max_message_len() -> usize {
    1000
}

/// GroupMe bot configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GroupMeConfig {
    /// Bot id used for `bots/post`. `None` disables outbound posting.
    #[serde(default)]
    pub bot_id: Option<String>,

    /// Access token for roster lookups.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Group whose roster is queried.
    #[serde(default)]
    pub group_id: Option<String>,

    /// Base URL of the GroupMe v3 API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for GroupMeConfig {
    fn default() -> Self {
        Self {
            bot_id: None,
            access_token: None,
            group_id: None,
            api_base: default_api_base(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.groupme.com/v3".to_string()
}

/// Webhook server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the webhook listener to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("kudos").join("kudos.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("kudos.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Points awarded for each kind of activity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PointsConfig {
    /// Award for using a command.
    #[serde(default = "default_command_points")]
    pub command: i64,

    /// Award for a plain text message.
    #[serde(default = "default_text_points")]
    pub text: i64,

    /// Award for attaching media.
    #[serde(default = "default_media_points")]
    pub media: i64,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            command: default_command_points(),
            text: default_text_points(),
            media: default_media_points(),
        }
    }
}

fn default_command_points() -> i64 {
    1
}

fn default_text_points() -> i64 {
    2
}

fn default_media_points() -> i64 {
    3
}
