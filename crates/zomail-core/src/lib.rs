//! Configuration for the Zomail client
//!
//! Holds the credentials, endpoints, and token-store selection used by the
//! rest of the workspace. A [`Config`] is validated once (via [`Config::setup`]
//! or [`Config::from_env`]) and treated as immutable afterwards.

mod config;
mod error;

pub use config::{Config, TokenStoreKind, DEFAULT_MAIL_API_URL, DEFAULT_TOKEN_URL};
pub use error::{ConfigError, ConfigResult};
