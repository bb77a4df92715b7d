//! Mailer delivery adapter for Zoho Mail
//!
//! Adapts a generic [`Email`] to the Zoho Mail API client: joins address
//! lists, picks the body part to submit, stages binary attachments through
//! scoped temporary files, and exposes the boolean-collapse send surface
//! ([`ZohoMailer::send_email`] and friends) where every failure is logged
//! and reported as `false`. The [`Mailer`] trait converts that `false` into
//! [`MailError::Delivery`] so host-side handling governs what happens next.
//!
//! # Quick Start
//!
//! ```ignore
//! // 1. Configure through ZOHO_* environment variables
//! let mailer = ZohoMailer::from_env()?;
//!
//! // 2. Build and deliver a message
//! let email = Email::builder()
//!     .to("user@example.com")
//!     .subject("Welcome!")
//!     .text("Thanks for signing up.")
//!     .build()?;
//! mailer.send(&email).await?;
//! ```

mod mailer;
mod message;

pub use mailer::{Mailer, ZohoMailer};
pub use message::{Email, EmailAttachment, EmailBody, EmailBuilder};

use thiserror::Error;

/// Errors surfaced by the delivery adapter
#[derive(Debug, Error)]
pub enum MailError {
    /// Configuration could not be resolved or validated
    #[error("invalid configuration: {0}")]
    Config(#[from] zomail_core::ConfigError),

    /// Client construction failed
    #[error("failed to initialize client: {0}")]
    Client(#[from] zomail_api::ApiError),

    /// Message building error
    #[error("failed to build message: {0}")]
    Build(String),

    /// The underlying send reported failure (details are in the logs)
    #[error("delivery failed")]
    Delivery,
}
