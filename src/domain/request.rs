use crate::domain::options::{EmailOptions, SmsOptions};
use crate::domain::value::{
    EmailAddress, NotificationId, NotificationStatus, Personalisation, RawPhoneNumber,
    ReceivedTextId, Reference, TemplateId, TemplateType,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SendEmail {
    template_id: TemplateId,
    email_address: EmailAddress,
    options: EmailOptions,
}

impl SendEmail {
    pub fn new(
        template_id: TemplateId,
        email_address: EmailAddress,
        options: EmailOptions,
    ) -> Self {
        Self {
            template_id,
            email_address,
            options,
        }
    }

    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    pub fn email_address(&self) -> &EmailAddress {
        &self.email_address
    }

    pub fn options(&self) -> &EmailOptions {
        &self.options
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendSms {
    template_id: TemplateId,
    phone_number: RawPhoneNumber,
    options: SmsOptions,
}

impl SendSms {
    pub fn new(template_id: TemplateId, phone_number: RawPhoneNumber, options: SmsOptions) -> Self {
        Self {
            template_id,
            phone_number,
            options,
        }
    }

    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    pub fn phone_number(&self) -> &RawPhoneNumber {
        &self.phone_number
    }

    pub fn options(&self) -> &SmsOptions {
        &self.options
    }
}

/// Filters for listing notifications. Every field is optional; unset filters are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationFilter {
    pub template_type: Option<TemplateType>,
    pub status: Option<NotificationStatus>,
    pub reference: Option<Reference>,
    /// Only return notifications older than this one (pagination cursor).
    pub older_than: Option<NotificationId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTemplate {
    template_id: TemplateId,
    personalisation: Option<Personalisation>,
}

impl PreviewTemplate {
    pub fn new(template_id: TemplateId) -> Self {
        Self {
            template_id,
            personalisation: None,
        }
    }

    pub fn with_personalisation(mut self, personalisation: Personalisation) -> Self {
        self.personalisation = Some(personalisation);
        self
    }

    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    pub fn personalisation(&self) -> Option<&Personalisation> {
        self.personalisation.as_ref()
    }
}

/// Pagination cursor for inbound text messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceivedTextFilter {
    pub older_than: Option<ReceivedTextId>,
}
