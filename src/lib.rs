//! Typed Rust client for the Notify (notify.gov.au) REST API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! wire-format details, and a small client layer that signs and sends requests.
//! Every request carries a freshly signed HS256 bearer token derived from the
//! service's composite API key.
//!
//! ```rust,no_run
//! use notify_gov_au::{
//!     EmailAddress, EmailOptions, NotifyClient, Personalisation, SendEmail, TemplateId,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), notify_gov_au::NotifyError> {
//!     let client = NotifyClient::new(std::env::var("NOTIFY_API_KEY").unwrap_or_default());
//!     let options = EmailOptions {
//!         personalisation: Some(Personalisation::new().insert("name", "Fred")),
//!         ..Default::default()
//!     };
//!     let request = SendEmail::new(
//!         TemplateId::new("f33517ff-2a88-4f6e-b855-c550268ce08a")?,
//!         EmailAddress::new("fred@example.com")?,
//!         options,
//!     );
//!     let response = client.send_email(request).await?;
//!     println!("sent {}", response.id.as_str());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    Clock, Credentials, DEFAULT_BASE_URL, FixedClock, IssuerId, NotifyClient, NotifyClientBuilder,
    NotifyError, SigningSecret, SystemClock, TokenError, TokenSigner, sign_token,
};
pub use domain::{
    ApiErrorDetail, BearerToken, EmailAddress, EmailContent, EmailOptions, EmailReplyToId, Links,
    Notification, NotificationFilter, NotificationId, NotificationList, NotificationStatus,
    OptionsError, Personalisation, PhoneNumber, PreviewTemplate, RawPhoneNumber, ReceivedText,
    ReceivedTextFilter, ReceivedTextId, ReceivedTextList, Reference, SendEmail, SendEmailResponse,
    SendSms, SendSmsResponse, SmsContent, SmsOptions, SmsSenderId, StatusCallbackUrl, Template,
    TemplateId, TemplateList, TemplatePreview, TemplateRef, TemplateType, TemplateVersion,
    UnixTimestamp, ValidationError,
};
