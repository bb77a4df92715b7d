//! Zoho Mail API client

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, info};

use zomail_auth::TokenManager;
use zomail_core::Config;

use crate::error::{ApiError, ApiResult};
use crate::mime;
use crate::types::{AttachmentRef, EmailRequest, ListResponse, SendParams, UploadedAttachment};

/// Mail API operations.
///
/// Every operation acquires its own access token; none assumes a fresh
/// token from a prior call. Implemented by [`ZohoMailClient`]; the trait is
/// the seam for alternative backends and for test doubles.
#[async_trait]
pub trait MailApi: Send + Sync {
    /// Resolve the account id for the configured credentials.
    async fn fetch_account_id(&self) -> ApiResult<String>;

    /// Upload a local file to the attachment store.
    async fn upload_attachment(&self, file_path: &Path) -> ApiResult<UploadedAttachment>;

    /// Submit a send-message request.
    async fn send_email(&self, params: SendParams) -> ApiResult<()>;

    /// Upload a file, then send a message carrying it as the sole attachment.
    async fn send_email_with_file(
        &self,
        to: &str,
        cc: Option<&str>,
        subject: &str,
        body: &str,
        file_path: &Path,
    ) -> ApiResult<()> {
        let uploaded = self.upload_attachment(file_path).await?;
        let params = SendParams {
            to: Some(to.to_string()),
            cc: cc.map(str::to_string),
            subject: Some(subject.to_string()),
            body: Some(body.to_string()),
            attachments: vec![AttachmentRef::Uploaded(uploaded)],
            ..SendParams::default()
        };
        self.send_email(params).await
    }
}

/// HTTP client for the Zoho Mail API.
pub struct ZohoMailClient {
    config: Arc<Config>,
    http: reqwest::Client,
    tokens: TokenManager,
}

impl std::fmt::Debug for ZohoMailClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZohoMailClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ZohoMailClient {
    /// Create a client, validating the configuration first.
    pub fn new(config: Config) -> ApiResult<Self> {
        config.validate()?;
        let config = Arc::new(config);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        let tokens = TokenManager::new(Arc::clone(&config))?;

        Ok(Self {
            config,
            http,
            tokens,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn auth_header(token: &str) -> String {
        format!("Zoho-oauthtoken {token}")
    }
}

#[async_trait]
impl MailApi for ZohoMailClient {
    async fn fetch_account_id(&self) -> ApiResult<String> {
        let token = self.tokens.access_token().await?;
        debug!("fetching account listing from {}", self.config.mail_api_url);

        let response = self
            .http
            .get(&self.config.mail_api_url)
            .header(AUTHORIZATION, Self::auth_header(&token))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api { status, body });
        }

        let listing: ListResponse<Value> = response
            .json()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))?;

        let first = listing.data.first().ok_or(ApiError::NoAccounts)?;
        let account_id = match first.get("accountId") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                return Err(ApiError::ParseError(
                    "no accountId in account response".to_string(),
                ))
            }
        };

        debug!("resolved account id {}", account_id);
        Ok(account_id)
    }

    async fn upload_attachment(&self, file_path: &Path) -> ApiResult<UploadedAttachment> {
        let account_id = self.fetch_account_id().await?;
        let token = self.tokens.access_token().await?;

        let data = tokio::fs::read(file_path).await?;
        let filename = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment")
            .to_string();
        let content_type = mime::content_type_for(file_path);
        debug!(
            "uploading {} ({}, {} bytes)",
            filename,
            content_type,
            data.len()
        );

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename)
            .mime_str(&content_type)?;
        let form = reqwest::multipart::Form::new().part("attach", part);

        let url = format!(
            "{}/{}/messages/attachments",
            self.config.mail_api_url, account_id
        );
        let response = self
            .http
            .post(&url)
            .query(&[("uploadType", "multipart")])
            .header(AUTHORIZATION, Self::auth_header(&token))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api { status, body });
        }

        let listing: ListResponse<UploadedAttachment> = response
            .json()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))?;

        let uploaded = listing.data.into_iter().next().ok_or_else(|| {
            ApiError::ParseError("empty data array in upload response".to_string())
        })?;

        info!(
            "uploaded attachment {} to store {}",
            uploaded.attachment_name, uploaded.store_name
        );
        Ok(uploaded)
    }

    async fn send_email(&self, params: SendParams) -> ApiResult<()> {
        // Parameter validation happens before any network traffic.
        let request = EmailRequest::from_params(&params, &self.config.from_email)?;

        let account_id = self.fetch_account_id().await?;
        let token = self.tokens.access_token().await?;

        let url = format!("{}/{}/messages", self.config.mail_api_url, account_id);
        debug!("sending message to {} via {}", request.to_address, url);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, Self::auth_header(&token))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        info!("message sent (status {})", status);
        Ok(())
    }
}
