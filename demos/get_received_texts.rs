use notify_gov_au::{NotifyClientBuilder, ReceivedTextFilter, ReceivedTextId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let older_than = std::env::var("NOTIFY_OLDER_THAN")
        .ok()
        .map(ReceivedTextId::new)
        .transpose()?;

    let client = NotifyClientBuilder::from_env()?.build()?;
    let list = client
        .list_received_texts(&ReceivedTextFilter { older_than })
        .await?;

    for text in &list.received_text_messages {
        println!("{} from {}: {}", text.id.as_str(), text.user_number, text.content);
    }

    Ok(())
}
