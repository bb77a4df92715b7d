//! Wire types for the Zoho Mail API

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Response wrapper for Zoho list endpoints
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// An attachment already uploaded to Zoho's attachment store.
///
/// Produced by an upload call and consumed by the send call that follows;
/// it has no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAttachment {
    #[serde(rename = "storeName")]
    pub store_name: String,
    #[serde(rename = "attachmentPath")]
    pub attachment_path: String,
    #[serde(rename = "attachmentName")]
    pub attachment_name: String,
}

/// Reference to an attachment in a send request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttachmentRef {
    /// Already uploaded; serialized exactly as the upload call returned it.
    Uploaded(UploadedAttachment),
    /// A local file referenced by path.
    Path { filepath: String, filename: String },
}

impl AttachmentRef {
    /// Build a path reference; the filename is the path's final component.
    pub fn from_path(path: &str) -> Self {
        let filename = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path)
            .to_string();
        AttachmentRef::Path {
            filepath: path.to_string(),
            filename,
        }
    }
}

/// Parameters for a send call.
///
/// `to`, `subject`, and `body` are required; everything else is optional
/// and omitted from the wire payload when absent. Attachments may be
/// upload-store references or plain file paths:
///
/// ```
/// use zomail_api::{AttachmentRef, SendParams};
///
/// let params = SendParams {
///     to: Some("finance@example.com".into()),
///     subject: Some("Q3 report".into()),
///     body: Some("Report attached.".into()),
///     attachments: vec![AttachmentRef::from_path("/var/reports/q3.pdf")],
///     ..SendParams::default()
/// };
/// assert_eq!(params.attachments.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SendParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub cc: Option<String>,
    pub bcc: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub ask_receipt: bool,
    pub attachments: Vec<AttachmentRef>,
}

/// JSON body of the send-message request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub from_address: String,
    pub to_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc_address: Option<String>,
    pub subject: String,
    pub content: String,
    pub ask_receipt: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRef>,
}

impl EmailRequest {
    /// Validate the parameters and build the wire payload.
    ///
    /// Checks `to`, `subject`, and `body` before anything else; no request
    /// is constructed from partial input. The sender falls back to
    /// `default_from` when the parameters carry none.
    pub fn from_params(params: &SendParams, default_from: &str) -> ApiResult<Self> {
        // Present-but-empty values are allowed; only absent ones are missing.
        let to = params.to.as_deref();
        let subject = params.subject.as_deref();
        let body = params.body.as_deref();

        let mut missing = Vec::new();
        if to.is_none() {
            missing.push("to");
        }
        if subject.is_none() {
            missing.push("subject");
        }
        if body.is_none() {
            missing.push("body");
        }
        let (Some(to), Some(subject), Some(body)) = (to, subject, body) else {
            return Err(ApiError::MissingParams { keys: missing });
        };

        let from = params
            .from
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(default_from);

        Ok(Self {
            from_address: from.to_string(),
            to_address: to.to_string(),
            cc_address: params.cc.clone().filter(|s| !s.is_empty()),
            bcc_address: params.bcc.clone().filter(|s| !s.is_empty()),
            subject: subject.to_string(),
            content: body.to_string(),
            ask_receipt: if params.ask_receipt { "yes" } else { "no" }.to_string(),
            attachments: params.attachments.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn minimal_params() -> SendParams {
        SendParams {
            to: Some("a@x.com".into()),
            subject: Some("hi".into()),
            body: Some("hello".into()),
            ..SendParams::default()
        }
    }

    #[test]
    fn minimal_payload_omits_absent_optionals() {
        let request = EmailRequest::from_params(&minimal_params(), "me@x.com").unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "fromAddress": "me@x.com",
                "toAddress": "a@x.com",
                "subject": "hi",
                "content": "hello",
                "askReceipt": "no",
            })
        );
    }

    #[test]
    fn explicit_from_wins_over_default() {
        let mut params = minimal_params();
        params.from = Some("other@x.com".into());

        let request = EmailRequest::from_params(&params, "me@x.com").unwrap();
        assert_eq!(request.from_address, "other@x.com");
    }

    #[test]
    fn ask_receipt_serializes_as_yes() {
        let mut params = minimal_params();
        params.ask_receipt = true;

        let request = EmailRequest::from_params(&params, "me@x.com").unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["askReceipt"], "yes");
    }

    #[test]
    fn missing_subject_is_a_configuration_error() {
        let mut params = minimal_params();
        params.subject = None;

        let err = EmailRequest::from_params(&params, "me@x.com").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        match err {
            ApiError::MissingParams { keys } => assert_eq!(keys, vec!["subject"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn all_missing_params_are_named_at_once() {
        let err = EmailRequest::from_params(&SendParams::default(), "me@x.com").unwrap_err();
        match err {
            ApiError::MissingParams { keys } => {
                assert_eq!(keys, vec!["to", "subject", "body"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn path_reference_carries_filepath_and_filename() {
        let attachment = AttachmentRef::from_path("/tmp/report/q3.pdf");
        let value = serde_json::to_value(&attachment).unwrap();

        assert_eq!(
            value,
            json!({ "filepath": "/tmp/report/q3.pdf", "filename": "q3.pdf" })
        );
    }

    #[test]
    fn uploaded_reference_passes_through_unchanged() {
        let uploaded = UploadedAttachment {
            store_name: "store-7".into(),
            attachment_path: "/store/7/q3.pdf".into(),
            attachment_name: "q3.pdf".into(),
        };

        let mut params = minimal_params();
        params.attachments = vec![AttachmentRef::Uploaded(uploaded.clone())];

        let request = EmailRequest::from_params(&params, "me@x.com").unwrap();
        let value = serde_json::to_value(&request).unwrap();

        // Round-trip: the send payload carries exactly what the upload
        // call returned.
        assert_eq!(
            value["attachments"][0],
            json!({
                "storeName": "store-7",
                "attachmentPath": "/store/7/q3.pdf",
                "attachmentName": "q3.pdf",
            })
        );
        assert_eq!(
            serde_json::from_value::<UploadedAttachment>(value["attachments"][0].clone()).unwrap(),
            uploaded
        );
    }
}
