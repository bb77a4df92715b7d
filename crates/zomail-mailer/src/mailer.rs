//! Mailer trait and the Zoho delivery adapter

use std::path::Path;

use async_trait::async_trait;
use tracing::{error, warn};

use zomail_api::{
    ApiError, ApiResult, AttachmentRef, ErrorKind, MailApi, SendParams, UploadedAttachment,
    ZohoMailClient,
};
use zomail_core::Config;

use crate::message::{Email, EmailAttachment};
use crate::MailError;

/// Mail delivery trait.
///
/// Implement this trait to provide alternative delivery backends.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver an email.
    async fn send(&self, email: &Email) -> Result<(), MailError>;
}

/// Delivery adapter over the Zoho Mail API client.
///
/// The `send_email*` methods are the compatibility surface: every failure
/// is logged with a per-category message and collapsed to `false`, so the
/// boolean alone never tells the caller what went wrong. Callers needing
/// detail use the [`MailApi`] results directly.
pub struct ZohoMailer<A: MailApi = ZohoMailClient> {
    api: A,
}

impl ZohoMailer<ZohoMailClient> {
    /// Build the mailer from `ZOHO_*` environment variables.
    ///
    /// The client is reconfigured from scratch on every construction.
    pub fn from_env() -> Result<Self, MailError> {
        Self::from_config(Config::from_env()?)
    }

    /// Build the mailer from an explicit configuration.
    pub fn from_config(config: Config) -> Result<Self, MailError> {
        Ok(Self {
            api: ZohoMailClient::new(config)?,
        })
    }
}

impl<A: MailApi> ZohoMailer<A> {
    /// Build the mailer over an existing API implementation.
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    /// Send a message, collapsing any failure to `false` after logging it.
    pub async fn send_email(&self, params: SendParams) -> bool {
        collapse(self.api.send_email(params).await)
    }

    /// Upload a file and send it as the sole attachment, collapsing any
    /// failure to `false` after logging it.
    pub async fn send_email_with_file(
        &self,
        to: &str,
        cc: Option<&str>,
        subject: &str,
        body: &str,
        file_path: &Path,
    ) -> bool {
        collapse(
            self.api
                .send_email_with_file(to, cc, subject, body, file_path)
                .await,
        )
    }

    /// Write one attachment to a scoped temp file and upload it. The temp
    /// file is removed on every exit path; removal failures are logged and
    /// swallowed.
    async fn stage_and_upload(&self, attachment: &EmailAttachment) -> Option<UploadedAttachment> {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("failed to create temp dir for {}: {e}", attachment.filename);
                return None;
            }
        };

        // Strip any path components a hostile filename might carry.
        let safe_name = Path::new(&attachment.filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment");
        let path = dir.path().join(safe_name);

        if let Err(e) = tokio::fs::write(&path, &attachment.content).await {
            error!("failed to stage attachment {}: {e}", attachment.filename);
            return None;
        }

        let result = self.api.upload_attachment(&path).await;

        if let Err(e) = dir.close() {
            warn!("failed to remove temporary attachment file: {e}");
        }

        match result {
            Ok(uploaded) => Some(uploaded),
            Err(e) => {
                log_failure(&e);
                None
            }
        }
    }
}

#[async_trait]
impl<A: MailApi + 'static> Mailer for ZohoMailer<A> {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let mut params = build_params(email);

        for attachment in &email.attachments {
            match self.stage_and_upload(attachment).await {
                Some(uploaded) => params.attachments.push(AttachmentRef::Uploaded(uploaded)),
                None => return Err(MailError::Delivery),
            }
        }

        if self.send_email(params).await {
            Ok(())
        } else {
            Err(MailError::Delivery)
        }
    }
}

/// Map a generic email onto the client's parameter shape: comma-joined
/// address lists, HTML-preferred body, explicit from when present.
fn build_params(email: &Email) -> SendParams {
    SendParams {
        from: email.from.clone(),
        to: (!email.to.is_empty()).then(|| email.to.join(",")),
        cc: (!email.cc.is_empty()).then(|| email.cc.join(",")),
        bcc: (!email.bcc.is_empty()).then(|| email.bcc.join(",")),
        subject: Some(email.subject.clone()),
        body: Some(email.body_content().to_string()),
        ..SendParams::default()
    }
}

fn collapse(result: ApiResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log_failure(&e);
            false
        }
    }
}

fn log_failure(e: &ApiError) {
    match e.kind() {
        ErrorKind::Configuration => error!("configuration error sending mail: {e}"),
        ErrorKind::Api => error!("Zoho API error sending mail: {e}"),
        ErrorKind::Unexpected => error!("unexpected error sending mail: {e}"),
    }
}
