use std::io;

use notify_gov_au::{NotifyClientBuilder, Personalisation, PreviewTemplate, TemplateId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let template_id = std::env::var("NOTIFY_TEMPLATE_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NOTIFY_TEMPLATE_ID environment variable is required",
        )
    })?;

    let client = NotifyClientBuilder::from_env()?.build()?;
    let template_id = TemplateId::new(template_id)?;

    let template = client.get_template(&template_id).await?;
    println!(
        "template {:?} ({}) version {}",
        template.name, template.template_type, template.version
    );

    let preview = client
        .preview_template(
            PreviewTemplate::new(template_id)
                .with_personalisation(Personalisation::new().insert("name", "Fred")),
        )
        .await?;
    println!("subject: {:?}\n{}", preview.subject, preview.body);

    Ok(())
}
