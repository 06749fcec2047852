use std::io;

use notify_gov_au::{
    NotifyClientBuilder, Personalisation, PhoneNumber, RawPhoneNumber, SendSms, SmsOptions,
    TemplateId,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let template_id = std::env::var("NOTIFY_SMS_TEMPLATE_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NOTIFY_SMS_TEMPLATE_ID environment variable is required",
        )
    })?;
    let phone_raw = std::env::var("NOTIFY_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NOTIFY_PHONE environment variable is required",
        )
    })?;
    let code = std::env::var("NOTIFY_CODE").unwrap_or_else(|_| "123456".to_owned());

    let client = NotifyClientBuilder::from_env()?.build()?;
    let phone = PhoneNumber::parse(Some(phonenumber::country::Id::AU), &phone_raw)?;
    let request = SendSms::new(
        TemplateId::new(template_id)?,
        RawPhoneNumber::from(phone),
        SmsOptions {
            personalisation: Some(Personalisation::new().insert("code", code)),
            ..Default::default()
        },
    );

    let response = client.send_sms(request).await?;
    println!(
        "id: {}, body: {:?}, from: {:?}",
        response.id.as_str(),
        response.content.body,
        response.content.from_number
    );

    Ok(())
}
