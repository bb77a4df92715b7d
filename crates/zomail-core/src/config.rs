//! Client configuration
//!
//! The recognized environment variables (read by [`Config::from_env`]):
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `ZOHO_CLIENT_ID` | Yes | OAuth2 client ID |
//! | `ZOHO_CLIENT_SECRET` | Yes | OAuth2 client secret |
//! | `ZOHO_REFRESH_TOKEN` | Yes | Long-lived refresh token |
//! | `ZOHO_FROM_EMAIL` | No | Default sender address |
//! | `ZOHO_TOKEN_URL` | No | Token endpoint (default: Zoho accounts) |
//! | `ZOHO_MAIL_API_URL` | No | Mail API base URL |
//! | `ZOHO_TOKEN_STORE` | No | `file` (default) or `memory` |
//! | `ZOHO_TOKEN_FILE_PATH` | With `file` store | Path of the persisted token |
//! | `ZOHO_TIMEOUT` | No | Request timeout in seconds (default: 30) |

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

/// Default OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.zoho.com/oauth/v2/token";

/// Default mail API base URL (the accounts listing endpoint).
pub const DEFAULT_MAIL_API_URL: &str = "https://mail.zoho.com/api/accounts";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the refresh token is persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    /// Durable JSON file at `token_file_path`.
    File,
    /// Process memory only; lost on restart.
    Memory,
}

/// Configuration for the Zoho Mail client.
///
/// Built programmatically via [`Config::setup`] or from the environment via
/// [`Config::from_env`]. Validation runs once at construction; a validated
/// config is immutable for the lifetime of the client holding it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OAuth2 client ID.
    #[serde(rename = "zoho_client_id")]
    pub client_id: String,

    /// OAuth2 client secret.
    #[serde(rename = "zoho_client_secret")]
    pub client_secret: String,

    /// Long-lived refresh token, exchanged for access tokens.
    #[serde(rename = "zoho_refresh_token")]
    pub refresh_token: String,

    /// Default sender address when a send request carries none.
    #[serde(rename = "zoho_from_email")]
    pub from_email: String,

    /// OAuth2 token endpoint.
    #[serde(rename = "zoho_token_url")]
    pub token_url: String,

    /// Mail API base URL; account-scoped paths are appended to it.
    #[serde(rename = "zoho_mail_api_url")]
    pub mail_api_url: String,

    /// Refresh-token persistence strategy.
    #[serde(rename = "zoho_token_store")]
    pub token_store: TokenStoreKind,

    /// Path of the persisted refresh token (file store only).
    #[serde(rename = "zoho_token_file_path")]
    pub token_file_path: String,

    /// Request timeout in seconds.
    #[serde(rename = "zoho_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            from_email: String::new(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            mail_api_url: DEFAULT_MAIL_API_URL.to_string(),
            token_store: TokenStoreKind::File,
            token_file_path: String::new(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Apply caller overrides to a default config, then validate.
    ///
    /// ```
    /// use zomail_core::Config;
    ///
    /// let config = Config::setup(|c| {
    ///     c.client_id = "1000.ABC".into();
    ///     c.client_secret = "secret".into();
    ///     c.refresh_token = "1000.refresh".into();
    ///     c.token_file_path = "/var/lib/zomail/token.json".into();
    /// })?;
    /// # Ok::<(), zomail_core::ConfigError>(())
    /// ```
    pub fn setup(mutate: impl FnOnce(&mut Config)) -> ConfigResult<Config> {
        let mut config = Config::default();
        mutate(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Build a config from `ZOHO_*` environment variables.
    ///
    /// Loads a `.env` file first if one is present. Unset variables fall
    /// back to the same defaults as [`Config::default`].
    pub fn from_env() -> ConfigResult<Config> {
        dotenvy::dotenv().ok();

        let config: Config =
            serde_env::from_env().map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every required key is present.
    ///
    /// Reports all empty credential keys at once rather than the first one
    /// found.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut missing = Vec::new();
        if self.client_id.is_empty() {
            missing.push("client_id");
        }
        if self.client_secret.is_empty() {
            missing.push("client_secret");
        }
        if self.refresh_token.is_empty() {
            missing.push("refresh_token");
        }
        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys { keys: missing });
        }

        if self.token_store == TokenStoreKind::File && self.token_file_path.is_empty() {
            return Err(ConfigError::MissingTokenFilePath);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_setup(c: &mut Config) {
        c.client_id = "1000.CLIENT".into();
        c.client_secret = "sekrit".into();
        c.refresh_token = "1000.REFRESH".into();
        c.token_file_path = "/tmp/zomail-token.json".into();
    }

    #[test]
    fn setup_with_all_required_keys() {
        let config = Config::setup(valid_setup).unwrap();
        assert_eq!(config.client_id, "1000.CLIENT");
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.mail_api_url, DEFAULT_MAIL_API_URL);
        assert_eq!(config.token_store, TokenStoreKind::File);
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn setup_names_every_missing_key() {
        let err = Config::setup(|c| {
            c.client_secret = "sekrit".into();
        })
        .unwrap_err();

        match err {
            ConfigError::MissingKeys { keys } => {
                assert_eq!(keys, vec!["client_id", "refresh_token"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_key_error_message_lists_keys() {
        let err = Config::setup(|_| {}).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required configuration: client_id, client_secret, refresh_token"
        );
    }

    #[test]
    fn file_store_requires_a_path() {
        let err = Config::setup(|c| {
            valid_setup(c);
            c.token_file_path = String::new();
        })
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingTokenFilePath));
    }

    #[test]
    fn memory_store_does_not_require_a_path() {
        let config = Config::setup(|c| {
            valid_setup(c);
            c.token_store = TokenStoreKind::Memory;
            c.token_file_path = String::new();
        })
        .unwrap();

        assert_eq!(config.token_store, TokenStoreKind::Memory);
    }

    #[test]
    fn validation_runs_once_per_setup_call() {
        // A config mutated after setup is not re-validated until asked.
        let mut config = Config::setup(valid_setup).unwrap();
        config.client_id = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn from_env_reads_zoho_variables() {
        std::env::set_var("ZOHO_CLIENT_ID", "1000.ENV");
        std::env::set_var("ZOHO_CLIENT_SECRET", "env-secret");
        std::env::set_var("ZOHO_REFRESH_TOKEN", "1000.ENVREFRESH");
        std::env::set_var("ZOHO_TOKEN_STORE", "memory");
        std::env::set_var("ZOHO_TIMEOUT", "10");

        let config = Config::from_env().unwrap();
        assert_eq!(config.client_id, "1000.ENV");
        assert_eq!(config.token_store, TokenStoreKind::Memory);
        assert_eq!(config.timeout, 10);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);

        for key in [
            "ZOHO_CLIENT_ID",
            "ZOHO_CLIENT_SECRET",
            "ZOHO_REFRESH_TOKEN",
            "ZOHO_TOKEN_STORE",
            "ZOHO_TIMEOUT",
        ] {
            std::env::remove_var(key);
        }
    }
}
