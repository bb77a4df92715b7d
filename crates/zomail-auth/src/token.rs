//! Access-token cache and refresh-token exchange

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use zomail_core::{Config, TokenStoreKind};

use crate::error::{AuthError, AuthResult};
use crate::store::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Client-side access-token lifetime in minutes.
///
/// The exchange response declares its own expiry, but issued tokens are
/// always assumed valid for exactly 30 minutes from issue. A token revoked
/// server-side before then surfaces as an API error on the next call; no
/// automatic retry is performed.
const ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

/// A cached access token with its client-side expiry.
///
/// Transient and in-memory only; never persisted.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// Bearer credential for API calls.
    pub token: String,
    /// Instant after which the token is treated as expired.
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Stamp a freshly exchanged token with the fixed lifetime.
    pub fn issue(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: Utc::now() + chrono::Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
        }
    }

    /// Whether the token's lifetime has elapsed.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Body of a successful token-exchange response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Owns the OAuth2 refresh flow and the access-token cache.
///
/// Constructed once per configuration and shared by reference. The cache
/// holds at most one token; the token and its expiry are stored as a single
/// value under one lock, so a caller never observes one without the other.
/// The lock is never held across an await, so concurrent callers may race
/// into duplicate exchanges; the last result wins.
pub struct TokenManager {
    config: Arc<Config>,
    http: reqwest::Client,
    store: Box<dyn TokenStore>,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenManager {
    /// Create a manager with the store selected by the configuration.
    pub fn new(config: Arc<Config>) -> AuthResult<Self> {
        let store: Box<dyn TokenStore> = match config.token_store {
            TokenStoreKind::File => Box::new(FileTokenStore::new(&config.token_file_path)),
            TokenStoreKind::Memory => Box::new(MemoryTokenStore::new()),
        };
        Self::with_store(config, store)
    }

    /// Create a manager with an explicit store.
    pub fn with_store(config: Arc<Config>, store: Box<dyn TokenStore>) -> AuthResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            config,
            http,
            store,
            cached: Mutex::new(None),
        })
    }

    /// Return a valid access token, exchanging the refresh token if the
    /// cached one is absent or expired.
    pub async fn access_token(&self) -> AuthResult<String> {
        if let Some(token) = self.cached_token() {
            debug!("using cached access token");
            return Ok(token);
        }

        let refresh_token = self.load_refresh_token().await;
        let response = self.exchange(&refresh_token).await?;

        let access = response.access_token.ok_or_else(|| {
            AuthError::MalformedResponse("no access_token in token response".to_string())
        })?;

        let issued = AccessToken::issue(access);
        let token = issued.token.clone();
        *self.cached.lock().unwrap() = Some(issued);
        info!("obtained new access token, valid {} minutes", ACCESS_TOKEN_TTL_MINUTES);

        if let Some(rotated) = response.refresh_token {
            self.store.save(&rotated).await?;
            info!("persisted rotated refresh token");
        }

        Ok(token)
    }

    fn cached_token(&self) -> Option<String> {
        let cached = self.cached.lock().unwrap();
        cached
            .as_ref()
            .filter(|t| !t.is_expired())
            .map(|t| t.token.clone())
    }

    /// Pick the refresh token to exchange: the persisted one when present,
    /// else the configured value. Store failures never propagate from here.
    async fn load_refresh_token(&self) -> String {
        match self.store.load().await {
            Ok(Some(token)) => token,
            Ok(None) => self.config.refresh_token.clone(),
            Err(e) => {
                warn!("failed to load persisted refresh token, using configured value: {e}");
                self.config.refresh_token.clone()
            }
        }
    }

    async fn exchange(&self, refresh_token: &str) -> AuthResult<TokenResponse> {
        debug!("exchanging refresh token at {}", self.config.token_url);

        let params = [
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::ApiError { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))
    }
}
