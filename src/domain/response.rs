use chrono::{DateTime, Utc};

use crate::domain::value::{NotificationId, ReceivedTextId, TemplateId, TemplateType};

/// Template reference embedded in notification responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRef {
    pub id: TemplateId,
    pub version: u32,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub body: String,
    pub subject: String,
    pub from_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsContent {
    pub body: String,
    pub from_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendEmailResponse {
    pub id: NotificationId,
    pub reference: Option<String>,
    pub content: EmailContent,
    pub uri: String,
    pub template: TemplateRef,
    pub scheduled_for: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSmsResponse {
    pub id: NotificationId,
    pub reference: Option<String>,
    pub content: SmsContent,
    pub uri: String,
    pub template: TemplateRef,
    pub scheduled_for: Option<String>,
}

/// A notification as returned by the status and listing endpoints.
///
/// `status` is kept as the raw wire string so that statuses introduced by the
/// service later still decode; use [`crate::NotificationStatus`] to interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub reference: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub notification_type: TemplateType,
    pub status: String,
    pub template: TemplateRef,
    pub body: Option<String>,
    pub subject: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by_name: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Pagination links returned alongside list responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    pub current: String,
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub links: Links,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub name: Option<String>,
    pub template_type: TemplateType,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub version: u32,
    pub body: String,
    pub subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateList {
    pub templates: Vec<Template>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePreview {
    pub id: TemplateId,
    pub template_type: TemplateType,
    pub version: u32,
    pub body: String,
    pub subject: Option<String>,
}

/// An inbound SMS sent to the service's number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedText {
    pub id: ReceivedTextId,
    pub user_number: String,
    pub notify_number: String,
    pub service_id: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedTextList {
    pub received_text_messages: Vec<ReceivedText>,
    pub links: Links,
}

/// One entry of the `errors` array in an error response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorDetail {
    pub error: String,
    pub message: String,
}
