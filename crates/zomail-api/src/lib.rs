//! Zoho Mail REST API client
//!
//! Resolves the mail account, uploads attachments, and submits send-message
//! requests, acquiring an access token from
//! [`TokenManager`](zomail_auth::TokenManager) for each operation. All
//! operations return typed results; collapsing failures to a boolean happens
//! only at the delivery-adapter boundary in `zomail-mailer`.

mod client;
mod error;
mod mime;
mod types;

pub use client::{MailApi, ZohoMailClient};
pub use error::{ApiError, ApiResult, ErrorKind};
pub use mime::content_type_for;
pub use types::{AttachmentRef, EmailRequest, ListResponse, SendParams, UploadedAttachment};
