//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod notification;
mod received_text;
mod template;

use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

use crate::domain::{ApiErrorDetail, Links, TemplateId, TemplateRef, ValidationError};

pub use notification::{
    decode_notification_json_response, decode_notification_list_json_response,
    decode_send_email_json_response, decode_send_sms_json_response, encode_get_notification,
    encode_list_notifications, encode_send_email, encode_send_sms,
};
pub use received_text::{decode_received_text_list_json_response, encode_list_received_texts};
pub use template::{
    decode_template_json_response, decode_template_list_json_response,
    decode_template_preview_json_response, encode_get_template, encode_get_template_version,
    encode_list_templates, encode_preview_template,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains an invalid timestamp: {value}")]
    InvalidTimestamp { value: String },

    #[error("response contains an invalid value: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// One outbound API call before it is bound to a base URL and headers.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Empty, or a `?`-prefixed form-encoded query string.
    pub query: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: String::new(),
            body: None,
        }
    }

    fn post(path: impl Into<String>, body: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: String::new(),
            body: Some(serde_json::Value::Object(body)),
        }
    }

    fn with_query(mut self, query: String) -> Self {
        self.query = query;
        self
    }

    pub fn path_and_query(&self) -> String {
        format!("{}{}", self.path, self.query)
    }
}

/// Characters `encodeURIComponent` leaves as they are, besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Pagination cursor key shared by the listing endpoints.
const OLDER_THAN: &str = "older_than";

/// Build a query string from `(key, value)` pairs, keeping the given order and
/// skipping unset values. Keys and values are percent-encoded individually.
/// Returns an empty string when nothing is set.
fn encode_query(pairs: &[(&str, Option<&str>)]) -> String {
    let query = pairs
        .iter()
        .filter_map(|&(key, value)| {
            value.map(|value| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, URI_COMPONENT),
                    utf8_percent_encode(value, URI_COMPONENT)
                )
            })
        })
        .collect::<Vec<_>>()
        .join("&");
    if query.is_empty() {
        return String::new();
    }
    format!("?{query}")
}

fn insert_str(
    body: &mut serde_json::Map<String, serde_json::Value>,
    field: &str,
    value: Option<&str>,
) {
    if let Some(value) = value {
        body.insert(field.to_owned(), serde_json::Value::String(value.to_owned()));
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TemplateRefJson {
    id: String,
    version: u32,
    uri: String,
}

impl TryFrom<TemplateRefJson> for TemplateRef {
    type Error = TransportError;

    fn try_from(value: TemplateRefJson) -> Result<Self, Self::Error> {
        Ok(TemplateRef {
            id: TemplateId::new(value.id)?,
            version: value.version,
            uri: value.uri,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LinksJson {
    current: String,
    #[serde(default)]
    next: Option<String>,
}

impl From<LinksJson> for Links {
    fn from(value: LinksJson) -> Self {
        Links {
            current: value.current,
            next: value.next,
        }
    }
}

fn parse_timestamp(value: Option<String>) -> Result<Option<DateTime<Utc>>, TransportError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(parsed) => Ok(Some(parsed.with_timezone(&Utc))),
        Err(_) => Err(TransportError::InvalidTimestamp { value: raw }),
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorJsonResponse {
    errors: Vec<ErrorJsonDetail>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorJsonDetail {
    error: String,
    message: String,
}

/// Decode a Notify error document (`{"status_code": .., "errors": [..]}`).
///
/// Returns `None` when the body is not such a document.
pub fn decode_error_json_response(json: &str) -> Option<Vec<ApiErrorDetail>> {
    let parsed: ErrorJsonResponse = serde_json::from_str(json).ok()?;
    Some(
        parsed
            .errors
            .into_iter()
            .map(|detail| ApiErrorDetail {
                error: detail.error,
                message: detail.message,
            })
            .collect(),
    )
}
