//! Email message types and builder

use crate::MailError;

/// The body content of an email.
#[derive(Debug, Clone)]
pub enum EmailBody {
    /// Plain text only.
    Text(String),
    /// HTML only.
    Html(String),
    /// Both plain text and HTML.
    Multipart { text: String, html: String },
}

/// A binary attachment carried on an [`Email`].
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    /// Filename to present to the recipient.
    pub filename: String,
    /// Raw file data.
    pub content: Vec<u8>,
}

/// A complete email message ready to deliver.
#[derive(Debug, Clone)]
pub struct Email {
    /// Sender address; the configured default applies when absent.
    pub from: Option<String>,
    /// Primary recipients.
    pub to: Vec<String>,
    /// Carbon copy recipients.
    pub cc: Vec<String>,
    /// Blind carbon copy recipients.
    pub bcc: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Body content, if any.
    pub body: Option<EmailBody>,
    /// Binary attachments.
    pub attachments: Vec<EmailAttachment>,
}

impl Email {
    /// Create a new email builder.
    pub fn builder() -> EmailBuilder {
        EmailBuilder::default()
    }

    /// The body text submitted to the API: the HTML part when present,
    /// else the plain text part, else an empty string.
    pub fn body_content(&self) -> &str {
        match &self.body {
            Some(EmailBody::Html(html)) => html,
            Some(EmailBody::Multipart { html, .. }) => html,
            Some(EmailBody::Text(text)) => text,
            None => "",
        }
    }
}

/// Builder for constructing [`Email`] instances.
#[derive(Debug, Default)]
pub struct EmailBuilder {
    from: Option<String>,
    to: Vec<String>,
    cc: Vec<String>,
    bcc: Vec<String>,
    subject: Option<String>,
    text: Option<String>,
    html: Option<String>,
    attachments: Vec<EmailAttachment>,
}

impl EmailBuilder {
    /// Set the sender address (optional; defaults to the configured one).
    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from = Some(address.into());
        self
    }

    /// Add a primary recipient.
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Add a CC recipient.
    pub fn cc(mut self, address: impl Into<String>) -> Self {
        self.cc.push(address.into());
        self
    }

    /// Add a BCC recipient.
    pub fn bcc(mut self, address: impl Into<String>) -> Self {
        self.bcc.push(address.into());
        self
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set plain text body content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set HTML body content.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Add a binary attachment.
    pub fn attachment(mut self, filename: impl Into<String>, content: Vec<u8>) -> Self {
        self.attachments.push(EmailAttachment {
            filename: filename.into(),
            content,
        });
        self
    }

    /// Build the email, validating required fields.
    pub fn build(self) -> Result<Email, MailError> {
        if self.to.is_empty() {
            return Err(MailError::Build("at least one recipient required".into()));
        }

        let subject = self
            .subject
            .ok_or_else(|| MailError::Build("subject required".into()))?;

        let body = match (self.text, self.html) {
            (Some(text), Some(html)) => Some(EmailBody::Multipart { text, html }),
            (Some(text), None) => Some(EmailBody::Text(text)),
            (None, Some(html)) => Some(EmailBody::Html(html)),
            (None, None) => None,
        };

        Ok(Email {
            from: self.from,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            subject,
            body,
            attachments: self.attachments,
        })
    }
}
