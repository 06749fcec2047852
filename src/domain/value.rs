use std::fmt;
use std::str::FromStr;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifier of a server-side template (`template_id`).
///
/// Invariant: non-empty after trimming.
pub struct TemplateId(String);

impl TemplateId {
    /// JSON field name used by Notify (`template_id`).
    pub const FIELD: &'static str = "template_id";

    /// Create a validated [`TemplateId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifier of a sent notification, as returned by the send endpoints.
///
/// Invariant: non-empty after trimming.
pub struct NotificationId(String);

impl NotificationId {
    /// Name reported by validation errors (`notification_id`).
    pub const FIELD: &'static str = "notification_id";

    /// Create a validated [`NotificationId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifier of an inbound (received) text message.
///
/// Invariant: non-empty after trimming.
pub struct ReceivedTextId(String);

impl ReceivedTextId {
    /// Name reported by validation errors (`received_text_id`).
    pub const FIELD: &'static str = "received_text_id";

    /// Create a validated [`ReceivedTextId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Email recipient (`email_address`).
///
/// Invariant: non-empty after trimming. Address syntax is checked by the service.
pub struct EmailAddress(String);

impl EmailAddress {
    /// JSON field name used by Notify (`email_address`).
    pub const FIELD: &'static str = "email_address";

    /// Create a validated [`EmailAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Recipient number exactly as sent to Notify (`phone_number`).
///
/// Invariant: non-empty after trimming. Notify accepts national and international formats,
/// so no normalization happens here; go through [`PhoneNumber`] to send E.164.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// JSON field name used by Notify (`phone_number`).
    pub const FIELD: &'static str = "phone_number";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Recipient number checked with `phonenumber` and kept in E.164 form.
///
/// `0412 345 678` parsed with region AU and `+61412345678` are the same number.
pub struct PhoneNumber {
    e164: String,
    country_code: u16,
}

impl PhoneNumber {
    /// Country calling code of Australia, the service's home region.
    const AUSTRALIA: u16 = 61;

    /// Parse `input`, reading numbers without a `+` prefix as belonging to `default_region`.
    pub fn parse(
        default_region: Option<country::Id>,
        input: &str,
    ) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, input).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: input.to_owned(),
            }
        })?;

        Ok(Self {
            e164: phonenumber::format(&parsed)
                .mode(phonenumber::Mode::E164)
                .to_string(),
            country_code: parsed.code().value(),
        })
    }

    pub fn e164(&self) -> &str {
        &self.e164
    }

    pub fn country_code(&self) -> u16 {
        self.country_code
    }

    /// Whether the number is on the Australian network. International sends may be
    /// disabled for a service.
    pub fn is_australian(&self) -> bool {
        self.country_code == Self::AUSTRALIA
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Caller-supplied reference attached to a notification (`reference`).
///
/// Invariant: non-empty after trimming. The original value is preserved.
pub struct Reference(String);

impl Reference {
    /// JSON/query field name used by Notify (`reference`).
    pub const FIELD: &'static str = "reference";

    /// Create a validated [`Reference`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the reference as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Reply-to address configured on the service (`email_reply_to_id`).
///
/// Invariant: non-empty after trimming.
pub struct EmailReplyToId(String);

impl EmailReplyToId {
    /// JSON field name used by Notify (`email_reply_to_id`).
    pub const FIELD: &'static str = "email_reply_to_id";

    /// Create a validated [`EmailReplyToId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS sender configured on the service (`sms_sender_id`).
///
/// Invariant: non-empty after trimming.
pub struct SmsSenderId(String);

impl SmsSenderId {
    /// JSON field name used by Notify (`sms_sender_id`).
    pub const FIELD: &'static str = "sms_sender_id";

    /// Create a validated [`SmsSenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// URL the service calls back with delivery status updates (`status_callback_url`).
///
/// Invariant: parses as an absolute URL.
pub struct StatusCallbackUrl(String);

impl StatusCallbackUrl {
    /// JSON field name used by Notify (`status_callback_url`).
    pub const FIELD: &'static str = "status_callback_url";

    /// Create a validated [`StatusCallbackUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
            field: Self::FIELD,
            input: trimmed.to_owned(),
        })?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the URL exactly as it will be sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Bearer token the service presents when calling the status callback
/// (`status_callback_bearer_token`).
///
/// Invariant: non-empty. `Debug` output is redacted.
pub struct BearerToken(String);

impl BearerToken {
    /// JSON field name used by Notify (`status_callback_bearer_token`).
    pub const FIELD: &'static str = "status_callback_bearer_token";

    /// Create a validated [`BearerToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([redacted])")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Template version number.
///
/// Invariant: `>= 1`.
pub struct TemplateVersion(u32);

impl TemplateVersion {
    /// Create a validated [`TemplateVersion`].
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::TemplateVersionOutOfRange { actual: value });
        }
        Ok(Self(value))
    }

    /// Get the underlying version number.
    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unix timestamp in whole seconds.
///
/// Used as the `iat` claim of the signed request token.
pub struct UnixTimestamp(i64);

impl UnixTimestamp {
    /// Create a timestamp value (no range validation is performed).
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the underlying timestamp in seconds.
    pub fn value(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Values substituted into template placeholders (`personalisation`).
pub struct Personalisation(serde_json::Map<String, serde_json::Value>);

impl Personalisation {
    /// JSON field name used by Notify (`personalisation`).
    pub const FIELD: &'static str = "personalisation";

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a placeholder value, replacing any previous value for `key`.
    pub fn insert(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.0
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Personalisation {
    fn from(value: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Kind of template / notification.
pub enum TemplateType {
    Email,
    Sms,
    Letter,
}

impl TemplateType {
    pub const FIELD: &'static str = "template_type";

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Letter => "letter",
        }
    }
}

impl FromStr for TemplateType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "letter" => Ok(Self::Letter),
            other => Err(ValidationError::UnknownVariant {
                field: Self::FIELD,
                input: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Delivery status of a notification, as used by the `status` filter.
pub enum NotificationStatus {
    Created,
    Sending,
    Pending,
    Sent,
    Delivered,
    Failed,
    TechnicalFailure,
    TemporaryFailure,
    PermanentFailure,
    Accepted,
    Received,
    PendingVirusCheck,
    VirusScanFailed,
    ValidationFailed,
    ReturnedLetter,
}

impl NotificationStatus {
    pub const FIELD: &'static str = "status";

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Sending => "sending",
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::TechnicalFailure => "technical-failure",
            Self::TemporaryFailure => "temporary-failure",
            Self::PermanentFailure => "permanent-failure",
            Self::Accepted => "accepted",
            Self::Received => "received",
            Self::PendingVirusCheck => "pending-virus-check",
            Self::VirusScanFailed => "virus-scan-failed",
            Self::ValidationFailed => "validation-failed",
            Self::ReturnedLetter => "returned-letter",
        }
    }

    /// Whether the service will not change this status any further.
    pub fn is_final(self) -> bool {
        matches!(
            self,
            Self::Delivered
                | Self::Failed
                | Self::TechnicalFailure
                | Self::TemporaryFailure
                | Self::PermanentFailure
                | Self::Received
                | Self::VirusScanFailed
                | Self::ValidationFailed
                | Self::ReturnedLetter
        )
    }
}

impl FromStr for NotificationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "created" => Self::Created,
            "sending" => Self::Sending,
            "pending" => Self::Pending,
            "sent" => Self::Sent,
            "delivered" => Self::Delivered,
            "failed" => Self::Failed,
            "technical-failure" => Self::TechnicalFailure,
            "temporary-failure" => Self::TemporaryFailure,
            "permanent-failure" => Self::PermanentFailure,
            "accepted" => Self::Accepted,
            "received" => Self::Received,
            "pending-virus-check" => Self::PendingVirusCheck,
            "virus-scan-failed" => Self::VirusScanFailed,
            "validation-failed" => Self::ValidationFailed,
            "returned-letter" => Self::ReturnedLetter,
            other => {
                return Err(ValidationError::UnknownVariant {
                    field: Self::FIELD,
                    input: other.to_owned(),
                });
            }
        })
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
