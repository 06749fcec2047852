use notify_gov_au::{NotificationFilter, NotificationStatus, NotifyClientBuilder, TemplateType};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let status = std::env::var("NOTIFY_STATUS")
        .ok()
        .map(|value| value.parse::<NotificationStatus>())
        .transpose()?;

    let client = NotifyClientBuilder::from_env()?.build()?;
    let filter = NotificationFilter {
        template_type: Some(TemplateType::Sms),
        status,
        ..Default::default()
    };

    let list = client.list_notifications(&filter).await?;
    for notification in &list.notifications {
        println!(
            "{} {} {:?}",
            notification.id.as_str(),
            notification.status,
            notification.created_at
        );
    }
    if let Some(next) = &list.links.next {
        println!("next page: {next}");
    }

    Ok(())
}
