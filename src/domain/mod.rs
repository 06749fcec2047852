//! Domain layer: strong types with validation and invariants (no I/O).

mod options;
mod request;
mod response;
mod validation;
mod value;

pub use options::{EmailOptions, OptionsError, SmsOptions};
pub use request::{NotificationFilter, PreviewTemplate, ReceivedTextFilter, SendEmail, SendSms};
pub use response::{
    ApiErrorDetail, EmailContent, Links, Notification, NotificationList, ReceivedText,
    ReceivedTextList, SendEmailResponse, SendSmsResponse, SmsContent, Template, TemplateList,
    TemplatePreview, TemplateRef,
};
pub use validation::ValidationError;
pub use value::{
    BearerToken, EmailAddress, EmailReplyToId, NotificationId, NotificationStatus,
    Personalisation, PhoneNumber, RawPhoneNumber, ReceivedTextId, Reference, SmsSenderId,
    StatusCallbackUrl, TemplateId, TemplateType, TemplateVersion, UnixTimestamp,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_id_rejects_empty() {
        assert!(matches!(
            TemplateId::new("   "),
            Err(ValidationError::Empty {
                field: TemplateId::FIELD
            })
        ));
    }

    #[test]
    fn phone_number_trims_before_parsing() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::AU), " 0412345678 ").unwrap();
        let raw: RawPhoneNumber = pn.into();
        assert_eq!(raw.raw(), "+61412345678");
    }

    #[test]
    fn send_email_keeps_typed_options() {
        let options = EmailOptions {
            reference: Some(Reference::new("ref").unwrap()),
            ..Default::default()
        };
        let request = SendEmail::new(
            TemplateId::new("123").unwrap(),
            EmailAddress::new("dom@example.com").unwrap(),
            options,
        );
        assert_eq!(request.template_id().as_str(), "123");
        assert_eq!(request.email_address().as_str(), "dom@example.com");
        assert_eq!(
            request.options().reference.as_ref().map(Reference::as_str),
            Some("ref")
        );
    }

    #[test]
    fn preview_template_personalisation_is_optional() {
        let preview = PreviewTemplate::new(TemplateId::new("t").unwrap());
        assert!(preview.personalisation().is_none());

        let preview = preview.with_personalisation(Personalisation::new().insert("name", "Foo"));
        assert!(preview.personalisation().is_some());
    }

    #[test]
    fn notification_filter_defaults_to_no_filters() {
        let filter = NotificationFilter::default();
        assert!(filter.template_type.is_none());
        assert!(filter.status.is_none());
        assert!(filter.reference.is_none());
        assert!(filter.older_than.is_none());
    }
}
