use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{
    BearerToken, EmailAddress, EmailContent, EmailReplyToId, Notification, NotificationFilter,
    NotificationId, NotificationList, NotificationStatus, Personalisation, RawPhoneNumber,
    Reference, SendEmail, SendEmailResponse, SendSms, SendSmsResponse, SmsContent, SmsSenderId,
    StatusCallbackUrl, TemplateId, TemplateType,
};
use crate::transport::{
    ApiRequest, LinksJson, OLDER_THAN, TemplateRefJson, TransportError, encode_query,
    insert_str, parse_timestamp,
};

const SEND_EMAIL_PATH: &str = "/v2/notifications/email";
const SEND_SMS_PATH: &str = "/v2/notifications/sms";
const NOTIFICATIONS_PATH: &str = "/v2/notifications";

pub fn encode_send_email(request: &SendEmail) -> ApiRequest {
    let options = request.options();
    let mut body = Map::new();
    insert_str(
        &mut body,
        TemplateId::FIELD,
        Some(request.template_id().as_str()),
    );
    insert_str(
        &mut body,
        EmailAddress::FIELD,
        Some(request.email_address().as_str()),
    );
    push_common(
        &mut body,
        options.personalisation.as_ref(),
        options.reference.as_ref(),
        options.status_callback_url.as_ref(),
        options.status_callback_bearer_token.as_ref(),
    );
    insert_str(
        &mut body,
        EmailReplyToId::FIELD,
        options.email_reply_to_id.as_ref().map(EmailReplyToId::as_str),
    );
    ApiRequest::post(SEND_EMAIL_PATH, body)
}

pub fn encode_send_sms(request: &SendSms) -> ApiRequest {
    let options = request.options();
    let mut body = Map::new();
    insert_str(
        &mut body,
        TemplateId::FIELD,
        Some(request.template_id().as_str()),
    );
    insert_str(
        &mut body,
        RawPhoneNumber::FIELD,
        Some(request.phone_number().raw()),
    );
    push_common(
        &mut body,
        options.personalisation.as_ref(),
        options.reference.as_ref(),
        options.status_callback_url.as_ref(),
        options.status_callback_bearer_token.as_ref(),
    );
    insert_str(
        &mut body,
        SmsSenderId::FIELD,
        options.sms_sender_id.as_ref().map(SmsSenderId::as_str),
    );
    ApiRequest::post(SEND_SMS_PATH, body)
}

fn push_common(
    body: &mut Map<String, Value>,
    personalisation: Option<&Personalisation>,
    reference: Option<&Reference>,
    status_callback_url: Option<&StatusCallbackUrl>,
    status_callback_bearer_token: Option<&BearerToken>,
) {
    if let Some(personalisation) = personalisation {
        body.insert(
            Personalisation::FIELD.to_owned(),
            Value::Object(personalisation.as_map().clone()),
        );
    }
    insert_str(body, Reference::FIELD, reference.map(Reference::as_str));
    insert_str(
        body,
        StatusCallbackUrl::FIELD,
        status_callback_url.map(StatusCallbackUrl::as_str),
    );
    insert_str(
        body,
        BearerToken::FIELD,
        status_callback_bearer_token.map(BearerToken::as_str),
    );
}

pub fn encode_get_notification(id: &NotificationId) -> ApiRequest {
    ApiRequest::get(format!("{NOTIFICATIONS_PATH}/{}", id.as_str()))
}

pub fn encode_list_notifications(filter: &NotificationFilter) -> ApiRequest {
    let query = encode_query(&[
        (
            TemplateType::FIELD,
            filter.template_type.map(TemplateType::as_str),
        ),
        (
            NotificationStatus::FIELD,
            filter.status.map(NotificationStatus::as_str),
        ),
        (
            Reference::FIELD,
            filter.reference.as_ref().map(Reference::as_str),
        ),
        (
            OLDER_THAN,
            filter.older_than.as_ref().map(NotificationId::as_str),
        ),
    ]);
    ApiRequest::get(NOTIFICATIONS_PATH).with_query(query)
}

#[derive(Debug, Clone, Deserialize)]
struct EmailContentJson {
    body: String,
    subject: String,
    #[serde(default)]
    from_email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SmsContentJson {
    body: String,
    #[serde(default)]
    from_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SendJsonResponse<C> {
    id: String,
    #[serde(default)]
    reference: Option<String>,
    content: C,
    uri: String,
    template: TemplateRefJson,
    #[serde(default)]
    scheduled_for: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct NotificationJson {
    id: String,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    email_address: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(rename = "type")]
    notification_type: String,
    status: String,
    template: TemplateRefJson,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    created_by_name: Option<String>,
    #[serde(default)]
    sent_at: Option<String>,
    #[serde(default)]
    completed_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct NotificationListJson {
    notifications: Vec<NotificationJson>,
    links: LinksJson,
}

pub fn decode_send_email_json_response(json: &str) -> Result<SendEmailResponse, TransportError> {
    let parsed: SendJsonResponse<EmailContentJson> = serde_json::from_str(json)?;
    Ok(SendEmailResponse {
        id: NotificationId::new(parsed.id)?,
        reference: parsed.reference,
        content: EmailContent {
            body: parsed.content.body,
            subject: parsed.content.subject,
            from_email: parsed.content.from_email,
        },
        uri: parsed.uri,
        template: parsed.template.try_into()?,
        scheduled_for: parsed.scheduled_for,
    })
}

pub fn decode_send_sms_json_response(json: &str) -> Result<SendSmsResponse, TransportError> {
    let parsed: SendJsonResponse<SmsContentJson> = serde_json::from_str(json)?;
    Ok(SendSmsResponse {
        id: NotificationId::new(parsed.id)?,
        reference: parsed.reference,
        content: SmsContent {
            body: parsed.content.body,
            from_number: parsed.content.from_number,
        },
        uri: parsed.uri,
        template: parsed.template.try_into()?,
        scheduled_for: parsed.scheduled_for,
    })
}

pub fn decode_notification_json_response(json: &str) -> Result<Notification, TransportError> {
    let parsed: NotificationJson = serde_json::from_str(json)?;
    notification_from_json(parsed)
}

pub fn decode_notification_list_json_response(
    json: &str,
) -> Result<NotificationList, TransportError> {
    let parsed: NotificationListJson = serde_json::from_str(json)?;
    let notifications = parsed
        .notifications
        .into_iter()
        .map(notification_from_json)
        .collect::<Result<Vec<_>, TransportError>>()?;
    Ok(NotificationList {
        notifications,
        links: parsed.links.into(),
    })
}

fn notification_from_json(value: NotificationJson) -> Result<Notification, TransportError> {
    Ok(Notification {
        id: NotificationId::new(value.id)?,
        reference: value.reference,
        email_address: value.email_address,
        phone_number: value.phone_number,
        notification_type: TemplateType::from_str(&value.notification_type)?,
        status: value.status,
        template: value.template.try_into()?,
        body: value.body,
        subject: value.subject,
        created_at: parse_timestamp(value.created_at)?,
        created_by_name: value.created_by_name,
        sent_at: parse_timestamp(value.sent_at)?,
        completed_at: parse_timestamp(value.completed_at)?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::{EmailOptions, SmsOptions};
    use crate::transport::Method;

    use super::*;

    fn template_id() -> TemplateId {
        TemplateId::new("123").unwrap()
    }

    #[test]
    fn encode_send_email_with_personalisation_only() {
        let request = SendEmail::new(
            template_id(),
            EmailAddress::new("dom@example.com").unwrap(),
            EmailOptions {
                personalisation: Some(Personalisation::new().insert("foo", "bar")),
                ..Default::default()
            },
        );

        let encoded = encode_send_email(&request);
        assert_eq!(encoded.method, Method::Post);
        assert_eq!(encoded.path, "/v2/notifications/email");
        assert_eq!(encoded.query, "");
        assert_eq!(
            encoded.body,
            Some(json!({
                "template_id": "123",
                "email_address": "dom@example.com",
                "personalisation": { "foo": "bar" }
            }))
        );
    }

    #[test]
    fn encode_send_email_with_every_option() {
        let request = SendEmail::new(
            template_id(),
            EmailAddress::new("dom@example.com").unwrap(),
            EmailOptions {
                personalisation: Some(Personalisation::new().insert("foo", "bar")),
                reference: Some(Reference::new("client-ref").unwrap()),
                email_reply_to_id: Some(EmailReplyToId::new("456").unwrap()),
                status_callback_url: Some(
                    StatusCallbackUrl::new("https://localhost/callback").unwrap(),
                ),
                status_callback_bearer_token: Some(BearerToken::new("1234567890").unwrap()),
            },
        );

        assert_eq!(
            encode_send_email(&request).body,
            Some(json!({
                "template_id": "123",
                "email_address": "dom@example.com",
                "personalisation": { "foo": "bar" },
                "reference": "client-ref",
                "email_reply_to_id": "456",
                "status_callback_url": "https://localhost/callback",
                "status_callback_bearer_token": "1234567890"
            }))
        );
    }

    #[test]
    fn encode_send_sms_omits_absent_fields() {
        let request = SendSms::new(
            template_id(),
            RawPhoneNumber::new("07525755555").unwrap(),
            SmsOptions {
                sms_sender_id: Some(SmsSenderId::new("456").unwrap()),
                ..Default::default()
            },
        );

        let encoded = encode_send_sms(&request);
        assert_eq!(encoded.path, "/v2/notifications/sms");
        let body = encoded.body.unwrap();
        assert_eq!(
            body,
            json!({
                "template_id": "123",
                "phone_number": "07525755555",
                "sms_sender_id": "456"
            })
        );
        let object = body.as_object().unwrap();
        assert!(!object.contains_key("personalisation"));
        assert!(!object.contains_key("email_reply_to_id"));
        assert!(!object.values().any(Value::is_null));
    }

    #[test]
    fn encode_get_notification_path() {
        let encoded = encode_get_notification(&NotificationId::new("wfdfdgf").unwrap());
        assert_eq!(encoded.method, Method::Get);
        assert_eq!(encoded.path_and_query(), "/v2/notifications/wfdfdgf");
        assert!(encoded.body.is_none());
    }

    #[test]
    fn encode_list_notifications_uses_canonical_key_order() {
        let filter = NotificationFilter {
            status: Some(NotificationStatus::Failed),
            template_type: Some(TemplateType::Sms),
            ..Default::default()
        };
        assert_eq!(
            encode_list_notifications(&filter).query,
            "?template_type=sms&status=failed"
        );

        let filter = NotificationFilter {
            older_than: Some(
                NotificationId::new("35836a9e-5a97-4d99-8309-0c5a2c3dbc72").unwrap(),
            ),
            reference: Some(Reference::new("myref").unwrap()),
            status: Some(NotificationStatus::Delivered),
            template_type: Some(TemplateType::Sms),
        };
        assert_eq!(
            encode_list_notifications(&filter).path_and_query(),
            "/v2/notifications?template_type=sms&status=delivered&reference=myref\
             &older_than=35836a9e-5a97-4d99-8309-0c5a2c3dbc72"
        );
    }

    #[test]
    fn encode_list_notifications_without_filters_has_no_query() {
        let encoded = encode_list_notifications(&NotificationFilter::default());
        assert_eq!(encoded.query, "");
        assert_eq!(encoded.path_and_query(), "/v2/notifications");
    }

    #[test]
    fn encode_list_notifications_percent_encodes_reference() {
        let filter = NotificationFilter {
            reference: Some(Reference::new("my ref(1)~").unwrap()),
            ..Default::default()
        };
        assert_eq!(
            encode_list_notifications(&filter).query,
            "?reference=my%20ref(1)~"
        );
    }

    #[test]
    fn encode_list_notifications_accepts_letter_statuses() {
        for wire in [
            "pending-virus-check",
            "virus-scan-failed",
            "validation-failed",
            "returned-letter",
        ] {
            let filter = NotificationFilter {
                template_type: Some(TemplateType::Letter),
                status: Some(wire.parse().unwrap()),
                ..Default::default()
            };
            assert_eq!(
                encode_list_notifications(&filter).query,
                format!("?template_type=letter&status={wire}")
            );
            assert_eq!(filter.status.unwrap().as_str(), wire);
        }
    }

    #[test]
    fn decode_send_email_response() {
        let json = r#"
        {
          "id": "740e5834-3a29-46b4-9a6f-16142fde533a",
          "reference": "client-ref",
          "content": {
            "subject": "NodeJS integration test",
            "body": "Hello Foo",
            "from_email": "service@notify.gov.au"
          },
          "uri": "https://rest-api.notify.gov.au/v2/notifications/740e5834-3a29-46b4-9a6f-16142fde533a",
          "template": {
            "id": "f33517ff-2a88-4f6e-b855-c550268ce08a",
            "version": 1,
            "uri": "https://rest-api.notify.gov.au/v2/template/f33517ff-2a88-4f6e-b855-c550268ce08a"
          },
          "scheduled_for": null
        }
        "#;

        let resp = decode_send_email_json_response(json).unwrap();
        assert_eq!(resp.id.as_str(), "740e5834-3a29-46b4-9a6f-16142fde533a");
        assert_eq!(resp.reference.as_deref(), Some("client-ref"));
        assert_eq!(resp.content.subject, "NodeJS integration test");
        assert_eq!(resp.content.from_email.as_deref(), Some("service@notify.gov.au"));
        assert_eq!(resp.template.version, 1);
        assert!(resp.scheduled_for.is_none());
    }

    #[test]
    fn decode_send_sms_response() {
        let json = r#"
        {
          "id": "740e5834-3a29-46b4-9a6f-16142fde533a",
          "reference": null,
          "content": { "body": "Hello Foo", "from_number": "NOTIFY" },
          "uri": "https://rest-api.notify.gov.au/v2/notifications/740e5834-3a29-46b4-9a6f-16142fde533a",
          "template": { "id": "t-1", "version": 3, "uri": "https://example.invalid/t-1" }
        }
        "#;

        let resp = decode_send_sms_json_response(json).unwrap();
        assert!(resp.reference.is_none());
        assert_eq!(resp.content.body, "Hello Foo");
        assert_eq!(resp.content.from_number.as_deref(), Some("NOTIFY"));
        assert_eq!(resp.template.id.as_str(), "t-1");
    }

    #[test]
    fn decode_notification_list_response() {
        let json = r#"
        {
          "notifications": [
            {
              "id": "n-1",
              "reference": null,
              "email_address": null,
              "phone_number": "+61412345678",
              "type": "sms",
              "status": "delivered",
              "template": { "id": "t-1", "version": 1, "uri": "https://example.invalid/t-1" },
              "body": "Hello",
              "subject": null,
              "created_at": "2019-05-14T03:55:25.612018Z",
              "sent_at": "2019-05-14T03:55:26Z",
              "completed_at": null
            }
          ],
          "links": {
            "current": "https://example.invalid/v2/notifications",
            "next": "https://example.invalid/v2/notifications?older_than=n-1"
          }
        }
        "#;

        let list = decode_notification_list_json_response(json).unwrap();
        assert_eq!(list.notifications.len(), 1);
        let notification = &list.notifications[0];
        assert_eq!(notification.notification_type, TemplateType::Sms);
        assert_eq!(
            notification.status.parse::<NotificationStatus>().unwrap(),
            NotificationStatus::Delivered
        );
        assert_eq!(notification.created_at.unwrap().timestamp(), 1_557_806_125);
        assert!(notification.completed_at.is_none());
        assert!(list.links.next.unwrap().ends_with("older_than=n-1"));
    }

    #[test]
    fn decode_notification_rejects_unknown_type() {
        let json = r#"
        {
          "id": "n-1",
          "type": "fax",
          "status": "created",
          "template": { "id": "t-1", "version": 1, "uri": "u" }
        }
        "#;
        assert!(matches!(
            decode_notification_json_response(json),
            Err(TransportError::Validation(_))
        ));
    }
}
