use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{
    Personalisation, PreviewTemplate, Template, TemplateId, TemplateList, TemplatePreview,
    TemplateType, TemplateVersion,
};
use crate::transport::{ApiRequest, TransportError, encode_query, parse_timestamp};

const TEMPLATE_PATH: &str = "/v2/template";
const TEMPLATES_PATH: &str = "/v2/templates";

pub fn encode_get_template(id: &TemplateId) -> ApiRequest {
    ApiRequest::get(format!("{TEMPLATE_PATH}/{}", id.as_str()))
}

pub fn encode_get_template_version(id: &TemplateId, version: TemplateVersion) -> ApiRequest {
    ApiRequest::get(format!(
        "{TEMPLATE_PATH}/{}/version/{}",
        id.as_str(),
        version.value()
    ))
}

pub fn encode_list_templates(template_type: Option<TemplateType>) -> ApiRequest {
    let query = encode_query(&[("type", template_type.map(TemplateType::as_str))]);
    ApiRequest::get(TEMPLATES_PATH).with_query(query)
}

pub fn encode_preview_template(request: &PreviewTemplate) -> ApiRequest {
    let mut body = Map::new();
    if let Some(personalisation) = request.personalisation() {
        body.insert(
            Personalisation::FIELD.to_owned(),
            Value::Object(personalisation.as_map().clone()),
        );
    }
    ApiRequest::post(
        format!("{TEMPLATE_PATH}/{}/preview", request.template_id().as_str()),
        body,
    )
}

#[derive(Debug, Clone, Deserialize)]
struct TemplateJson {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    template_type: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    created_by: Option<String>,
    version: u32,
    body: String,
    #[serde(default)]
    subject: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct TemplateListJson {
    templates: Vec<TemplateJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct TemplatePreviewJson {
    id: String,
    #[serde(rename = "type")]
    template_type: String,
    version: u32,
    body: String,
    #[serde(default)]
    subject: Option<String>,
}

pub fn decode_template_json_response(json: &str) -> Result<Template, TransportError> {
    let parsed: TemplateJson = serde_json::from_str(json)?;
    template_from_json(parsed)
}

pub fn decode_template_list_json_response(json: &str) -> Result<TemplateList, TransportError> {
    let parsed: TemplateListJson = serde_json::from_str(json)?;
    let templates = parsed
        .templates
        .into_iter()
        .map(template_from_json)
        .collect::<Result<Vec<_>, TransportError>>()?;
    Ok(TemplateList { templates })
}

pub fn decode_template_preview_json_response(
    json: &str,
) -> Result<TemplatePreview, TransportError> {
    let parsed: TemplatePreviewJson = serde_json::from_str(json)?;
    Ok(TemplatePreview {
        id: TemplateId::new(parsed.id)?,
        template_type: TemplateType::from_str(&parsed.template_type)?,
        version: parsed.version,
        body: parsed.body,
        subject: parsed.subject,
    })
}

fn template_from_json(value: TemplateJson) -> Result<Template, TransportError> {
    Ok(Template {
        id: TemplateId::new(value.id)?,
        name: value.name,
        template_type: TemplateType::from_str(&value.template_type)?,
        created_at: parse_timestamp(value.created_at)?,
        updated_at: parse_timestamp(value.updated_at)?,
        created_by: value.created_by,
        version: value.version,
        body: value.body,
        subject: value.subject,
    })
}
