//! Per-operation option records and validation of loosely-typed JSON options.

use serde_json::{Map, Value};

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    BearerToken, EmailReplyToId, Personalisation, Reference, SmsSenderId, StatusCallbackUrl,
};

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// Option keys outside the operation's closed set, in encounter order.
    #[error(
        "NotifyClient now uses an options configuration object. Options {} not recognised. \
         Please refer to the README.md for more information on method signatures.",
        json_array(.keys)
    )]
    Unrecognised { keys: Vec<String> },

    #[error("options must be a JSON object")]
    NotAnObject,

    #[error("option {key} must be a JSON {expected}")]
    InvalidType { key: String, expected: &'static str },

    #[error("invalid option value: {0}")]
    Validation(#[from] ValidationError),
}

fn json_array(keys: &[String]) -> String {
    Value::from(keys.to_vec()).to_string()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailOptions {
    pub personalisation: Option<Personalisation>,
    pub reference: Option<Reference>,
    pub email_reply_to_id: Option<EmailReplyToId>,
    pub status_callback_url: Option<StatusCallbackUrl>,
    pub status_callback_bearer_token: Option<BearerToken>,
}

impl EmailOptions {
    /// Option keys accepted by [`EmailOptions::from_json`].
    pub const FIELDS: &'static [&'static str] = &[
        "personalisation",
        "reference",
        "emailReplyToId",
        "statusCallbackUrl",
        "statusCallbackBearerToken",
    ];

    /// Build options from a loosely-typed JSON object.
    ///
    /// Unknown keys are rejected with [`OptionsError::Unrecognised`]. `null` and empty-string
    /// values count as absent.
    pub fn from_json(value: Value) -> Result<Self, OptionsError> {
        let Some(map) = into_object(value)? else {
            return Ok(Self::default());
        };
        reject_unrecognised(Self::FIELDS, &map)?;

        Ok(Self {
            personalisation: personalisation_option(&map)?,
            reference: string_option(&map, "reference")?
                .map(Reference::new)
                .transpose()?,
            email_reply_to_id: string_option(&map, "emailReplyToId")?
                .map(EmailReplyToId::new)
                .transpose()?,
            status_callback_url: string_option(&map, "statusCallbackUrl")?
                .map(StatusCallbackUrl::new)
                .transpose()?,
            status_callback_bearer_token: string_option(&map, "statusCallbackBearerToken")?
                .map(BearerToken::new)
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmsOptions {
    pub personalisation: Option<Personalisation>,
    pub reference: Option<Reference>,
    pub sms_sender_id: Option<SmsSenderId>,
    pub status_callback_url: Option<StatusCallbackUrl>,
    pub status_callback_bearer_token: Option<BearerToken>,
}

impl SmsOptions {
    /// Option keys accepted by [`SmsOptions::from_json`].
    pub const FIELDS: &'static [&'static str] = &[
        "personalisation",
        "reference",
        "smsSenderId",
        "statusCallbackUrl",
        "statusCallbackBearerToken",
    ];

    /// Build options from a loosely-typed JSON object.
    ///
    /// Same rules as [`EmailOptions::from_json`].
    pub fn from_json(value: Value) -> Result<Self, OptionsError> {
        let Some(map) = into_object(value)? else {
            return Ok(Self::default());
        };
        reject_unrecognised(Self::FIELDS, &map)?;

        Ok(Self {
            personalisation: personalisation_option(&map)?,
            reference: string_option(&map, "reference")?
                .map(Reference::new)
                .transpose()?,
            sms_sender_id: string_option(&map, "smsSenderId")?
                .map(SmsSenderId::new)
                .transpose()?,
            status_callback_url: string_option(&map, "statusCallbackUrl")?
                .map(StatusCallbackUrl::new)
                .transpose()?,
            status_callback_bearer_token: string_option(&map, "statusCallbackBearerToken")?
                .map(BearerToken::new)
                .transpose()?,
        })
    }
}

fn into_object(value: Value) -> Result<Option<Map<String, Value>>, OptionsError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        _ => Err(OptionsError::NotAnObject),
    }
}

fn reject_unrecognised(allowed: &[&str], map: &Map<String, Value>) -> Result<(), OptionsError> {
    let keys = map
        .keys()
        .filter(|key| !allowed.contains(&key.as_str()))
        .cloned()
        .collect::<Vec<_>>();
    if keys.is_empty() {
        Ok(())
    } else {
        Err(OptionsError::Unrecognised { keys })
    }
}

fn string_option(map: &Map<String, Value>, key: &str) -> Result<Option<String>, OptionsError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) if value.is_empty() => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(OptionsError::InvalidType {
            key: key.to_owned(),
            expected: "string",
        }),
    }
}

fn personalisation_option(
    map: &Map<String, Value>,
) -> Result<Option<Personalisation>, OptionsError> {
    match map.get("personalisation") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(values)) => Ok(Some(Personalisation::from(values.clone()))),
        Some(_) => Err(OptionsError::InvalidType {
            key: "personalisation".to_owned(),
            expected: "object",
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_keys_are_listed_in_encounter_order() {
        let err = EmailOptions::from_json(json!({
            "firstname": "Fred",
            "surname": "Smith",
            "reference": "ABC123"
        }))
        .unwrap_err();

        assert!(matches!(
            &err,
            OptionsError::Unrecognised { keys } if keys == &["firstname", "surname"]
        ));
        assert!(err.to_string().contains(r#"["firstname","surname"]"#));
        assert!(err.to_string().contains("README.md"));

        let err = SmsOptions::from_json(json!({
            "surname": "Smith",
            "reference": "ABC123",
            "firstname": "Fred"
        }))
        .unwrap_err();
        assert!(err.to_string().contains(r#"["surname","firstname"]"#));
    }

    #[test]
    fn reply_to_keys_are_operation_specific() {
        let err = EmailOptions::from_json(json!({ "smsSenderId": "456" })).unwrap_err();
        assert!(err.to_string().contains(r#"["smsSenderId"]"#));

        let err = SmsOptions::from_json(json!({ "emailReplyToId": "456" })).unwrap_err();
        assert!(err.to_string().contains(r#"["emailReplyToId"]"#));
    }

    #[test]
    fn recognised_keys_map_onto_typed_fields() {
        let options = EmailOptions::from_json(json!({
            "personalisation": { "foo": "bar" },
            "reference": "client-ref",
            "emailReplyToId": "456",
            "statusCallbackUrl": "https://localhost/callback",
            "statusCallbackBearerToken": "1234567890"
        }))
        .unwrap();

        assert_eq!(
            options.personalisation.unwrap().as_map()["foo"],
            json!("bar")
        );
        assert_eq!(options.reference.unwrap().as_str(), "client-ref");
        assert_eq!(options.email_reply_to_id.unwrap().as_str(), "456");
        assert_eq!(
            options.status_callback_url.unwrap().as_str(),
            "https://localhost/callback"
        );
        assert_eq!(
            options.status_callback_bearer_token.unwrap().as_str(),
            "1234567890"
        );
    }

    #[test]
    fn empty_and_null_values_are_absent() {
        let options = SmsOptions::from_json(json!({
            "reference": "",
            "smsSenderId": null
        }))
        .unwrap();
        assert_eq!(options, SmsOptions::default());

        assert_eq!(SmsOptions::from_json(Value::Null).unwrap(), SmsOptions::default());
    }

    #[test]
    fn wrong_value_types_are_rejected() {
        assert!(matches!(
            EmailOptions::from_json(json!({ "reference": 12 })),
            Err(OptionsError::InvalidType { .. })
        ));
        assert!(matches!(
            EmailOptions::from_json(json!({ "personalisation": "nope" })),
            Err(OptionsError::InvalidType { .. })
        ));
        assert!(matches!(
            EmailOptions::from_json(json!(["reference"])),
            Err(OptionsError::NotAnObject)
        ));
        assert!(matches!(
            EmailOptions::from_json(json!({ "statusCallbackUrl": "not a url" })),
            Err(OptionsError::Validation(_))
        ));
    }
}
