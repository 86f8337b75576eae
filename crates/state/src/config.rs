//! Configuration loading and validation.
//!
//! Loads [`ClientOptions`] from a TOML file with an environment-variable
//! override for the token. All settings are validated before a client is
//! created from them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ferrocord_core::error::Error;
use ferrocord_model::intents::Intents;
use ferrocord_model::presence::PresenceUpdate;

use crate::client::ClientOptions;

/// Environment variable consulted before the config file's token.
pub const TOKEN_ENV: &str = "FERROCORD_TOKEN";

fn default_max_messages() -> usize {
    crate::cache::DEFAULT_MAX_MESSAGES
}

/// Presence section of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresenceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afk: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
}

impl PresenceConfig {
    fn is_empty(&self) -> bool {
        self.status.is_none() && self.afk.is_none() && self.since.is_none()
    }
}

/// The root configuration structure, mapping directly to the TOML file.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bot token; the [`TOKEN_ENV`] variable takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Gateway intent bits.
    #[serde(default)]
    pub intents: u32,

    /// Message-cache bound.
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,

    /// Presence applied at startup.
    #[serde(default)]
    pub presence: PresenceConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: None,
            intents: 0,
            max_messages: default_max_messages(),
            presence: PresenceConfig::default(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("intents", &self.intents)
            .field("max_messages", &self.max_messages)
            .field("presence", &self.presence)
            .finish()
    }
}

impl ClientConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path).map_err(|err| Error::Config {
            message: format!("failed to read {}: {err}", path.display()),
        })?;

        let config: Self = toml::from_str(&raw).map_err(|err| Error::Config {
            message: format!("failed to parse {}: {err}", path.display()),
        })?;

        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Apply environment overrides (currently just the token).
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                debug!(var = TOKEN_ENV, "token taken from environment");
                self.token = Some(token);
            }
        }
    }

    /// Convert into options a [`Client`](crate::client::Client) can be built
    /// from.
    pub fn into_options(self) -> Result<ClientOptions, Error> {
        let token = self.token.unwrap_or_default();
        if token.trim().is_empty() {
            return Err(Error::Config {
                message: format!("no token configured (set `token` or {TOKEN_ENV})"),
            });
        }

        let presence = if self.presence.is_empty() {
            None
        } else {
            Some(PresenceUpdate {
                since: self.presence.since,
                activities: None,
                status: self.presence.status,
                afk: self.presence.afk,
            })
        };

        Ok(ClientOptions {
            token,
            intents: Intents::from_bits(self.intents),
            max_messages: self.max_messages,
            presence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_full_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
token = "file-token"
intents = 513
max_messages = 50

[presence]
status = "idle"
afk = true
"#,
        )
        .unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.token.as_deref(), Some("file-token"));
        assert_eq!(config.intents, 513);
        assert_eq!(config.max_messages, 50);
        assert_eq!(config.presence.status.as_deref(), Some("idle"));

        let options = config.into_options().unwrap();
        assert_eq!(options.token, "file-token");
        assert_eq!(options.max_messages, 50);
        assert!(options.presence.is_some());
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "token = \"t\"\n").unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.max_messages, default_max_messages());
        assert_eq!(config.intents, 0);
        assert!(config.presence.is_empty());

        let options = config.into_options().unwrap();
        assert!(options.presence.is_none());
    }

    #[test]
    fn missing_file_reports_config_error() {
        let err = ClientConfig::load(Path::new("/nonexistent/ferrocord.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn malformed_toml_reports_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "token = [not toml").unwrap();
        assert!(matches!(ClientConfig::load(&path), Err(Error::Config { .. })));
    }

    #[test]
    fn missing_token_fails_option_conversion() {
        let err = ClientConfig::default().into_options().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn env_token_overrides_file_token() {
        let mut config = ClientConfig {
            token: Some("file-token".into()),
            ..ClientConfig::default()
        };
        // SAFETY: no other test touches this variable.
        unsafe { std::env::set_var(TOKEN_ENV, "env-token") };
        config.apply_env();
        unsafe { std::env::remove_var(TOKEN_ENV) };

        assert_eq!(config.token.as_deref(), Some("env-token"));
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = ClientConfig {
            token: Some("secret".into()),
            ..ClientConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret"));
    }
}
