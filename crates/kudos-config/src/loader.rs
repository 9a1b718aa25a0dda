// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./kudos.toml` > `~/.config/kudos/kudos.toml` > `/etc/kudos/kudos.toml`
//! with environment variable overrides via `KUDOS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::KudosConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/kudos/kudos.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "kudos.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/kudos/kudos.toml` (system-wide)
/// 3. `~/.config/kudos/kudos.toml` (user XDG config)
/// 4. `./kudos.toml` (local directory)
/// 5. `KUDOS_*` environment variables
pub fn load_config() -> Result<KudosConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<KudosConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KudosConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KudosConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KudosConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(KudosConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("kudos").join(LOCAL_CONFIG_FILE))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Top-level sections that environment variables may address.
const ENV_SECTIONS: &[&str] = &["bot", "groupme", "server", "storage", "points"];

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `KUDOS_GROUPME_BOT_ID` must map to `groupme.bot_id`, not
/// `groupme.bot.id`. Only the leading section name is rewritten.
fn env_provider() -> Env {
    Env::prefixed("KUDOS_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key = key.as_str();
        let mapped = ENV_SECTIONS
            .iter()
            .find_map(|section| {
                key.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key.to_string());
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_map_to_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("KUDOS_GROUPME_BOT_ID", "bot-123");
            jail.set_env("KUDOS_SERVER_PORT", "8080");
            jail.set_env("KUDOS_POINTS_MEDIA", "5");

            let config = load_config()?;
            assert_eq!(config.groupme.bot_id.as_deref(), Some("bot-123"));
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.points.media, 5);
            Ok(())
        });
    }

    #[test]
    fn local_file_is_read_from_working_directory() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
                [bot]
                command_prefix = "!"
                "#,
            )?;

            let config = load_config()?;
            assert_eq!(config.bot.command_prefix, '!');
            Ok(())
        });
    }

    #[test]
    fn env_beats_local_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(LOCAL_CONFIG_FILE, "[server]\nport = 4000\n")?;
            jail.set_env("KUDOS_SERVER_PORT", "5000");

            let config = load_config()?;
            assert_eq!(config.server.port, 5000);
            Ok(())
        });
    }
}
