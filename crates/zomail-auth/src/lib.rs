//! OAuth2 token management for Zomail
//!
//! Owns the refresh-token exchange against the Zoho accounts endpoint and an
//! in-memory access-token cache. Refresh tokens survive process restarts
//! through a pluggable [`TokenStore`] (a JSON file by default).

mod error;
mod store;
mod token;

pub use error::{AuthError, AuthResult};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use token::{AccessToken, TokenManager};
