// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty paths, a usable command prefix, and non-negative awards.

use crate::diagnostic::ConfigError;
use crate::model::KudosConfig;

/// Shortest platform message length the caption listing can paginate into.
pub const MIN_MESSAGE_LEN: usize = 64;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &KudosConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.bot.command_prefix.is_whitespace() {
        errors.push(ConfigError::Validation {
            message: "bot.command_prefix must not be whitespace".to_string(),
        });
    }

    if config.bot.max_message_len < MIN_MESSAGE_LEN {
        errors.push(ConfigError::Validation {
            message: format!(
                "bot.max_message_len must be at least {MIN_MESSAGE_LEN}, got {}",
                config.bot.max_message_len
            ),
        });
    }

    for (name, value) in [
        ("points.command", config.points.command),
        ("points.text", config.points.text),
        ("points.media", config.points.media),
    ] {
        if value < 0 {
            errors.push(ConfigError::Validation {
                message: format!("{name} must be non-negative, got {value}"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = KudosConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = KudosConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("database_path"));
    }

    #[test]
    fn whitespace_prefix_fails_validation() {
        let mut config = KudosConfig::default();
        config.bot.command_prefix = ' ';
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("command_prefix"));
    }

    #[test]
    fn negative_awards_are_all_reported() {
        let mut config = KudosConfig::default();
        config.points.command = -1;
        config.points.media = -3;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn bad_host_and_short_messages_collect_together() {
        let mut config = KudosConfig::default();
        config.server.host = "not a host!".to_string();
        config.bot.max_message_len = 10;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
