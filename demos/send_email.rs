use std::io;

use notify_gov_au::{EmailAddress, NotifyClientBuilder, TemplateId};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let template_id = std::env::var("NOTIFY_EMAIL_TEMPLATE_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NOTIFY_EMAIL_TEMPLATE_ID environment variable is required",
        )
    })?;
    let email = std::env::var("NOTIFY_EMAIL_ADDRESS").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NOTIFY_EMAIL_ADDRESS environment variable is required",
        )
    })?;
    let name = std::env::var("NOTIFY_NAME").unwrap_or_else(|_| "there".to_owned());

    let client = NotifyClientBuilder::from_env()?.build()?;
    let response = client
        .send_email_with_options(
            TemplateId::new(template_id)?,
            EmailAddress::new(email)?,
            json!({
                "personalisation": { "name": name },
                "reference": "notify-gov-au demo",
            }),
        )
        .await?;

    println!(
        "id: {}, subject: {:?}, template version: {}",
        response.id.as_str(),
        response.content.subject,
        response.template.version
    );

    Ok(())
}
