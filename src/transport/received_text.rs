use serde::Deserialize;

use crate::domain::{ReceivedText, ReceivedTextFilter, ReceivedTextId, ReceivedTextList};
use crate::transport::{
    ApiRequest, LinksJson, OLDER_THAN, TransportError, encode_query, parse_timestamp,
};

const RECEIVED_TEXTS_PATH: &str = "/v2/received-text-messages";

pub fn encode_list_received_texts(filter: &ReceivedTextFilter) -> ApiRequest {
    let query = encode_query(&[(
        OLDER_THAN,
        filter.older_than.as_ref().map(ReceivedTextId::as_str),
    )]);
    ApiRequest::get(RECEIVED_TEXTS_PATH).with_query(query)
}

#[derive(Debug, Clone, Deserialize)]
struct ReceivedTextJson {
    id: String,
    user_number: String,
    notify_number: String,
    service_id: String,
    content: String,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReceivedTextListJson {
    received_text_messages: Vec<ReceivedTextJson>,
    links: LinksJson,
}

pub fn decode_received_text_list_json_response(
    json: &str,
) -> Result<ReceivedTextList, TransportError> {
    let parsed: ReceivedTextListJson = serde_json::from_str(json)?;
    let received_text_messages = parsed
        .received_text_messages
        .into_iter()
        .map(|text| {
            Ok(ReceivedText {
                id: ReceivedTextId::new(text.id)?,
                user_number: text.user_number,
                notify_number: text.notify_number,
                service_id: text.service_id,
                content: text.content,
                created_at: parse_timestamp(text.created_at)?,
            })
        })
        .collect::<Result<Vec<_>, TransportError>>()?;

    Ok(ReceivedTextList {
        received_text_messages,
        links: parsed.links.into(),
    })
}
