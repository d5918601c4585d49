use std::io;
use std::time::Duration;

use smsgw::{
    CallContext, ClientConfig, Message, OriginatorSettings, Settings, SmsGatewayClient,
};
use tracing_subscriber::EnvFilter;

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base_url = required("SMSGW_BASE_URL")?;
    let service_id: u32 = required("SMSGW_SERVICE_ID")?.parse()?;
    let username = required("SMSGW_USERNAME")?;
    let password = required("SMSGW_PASSWORD")?;
    let recipient = required("SMSGW_RECIPIENT")?;
    let content = std::env::var("SMSGW_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsgw example.".to_owned());
    let batch_reference =
        std::env::var("SMSGW_BATCH_REFERENCE").unwrap_or_else(|_| "smsgw-demo".to_owned());

    let mut message = Message::new(recipient, content);
    if let Ok(originator) = std::env::var("SMSGW_ORIGINATOR") {
        message = message.with_settings(Settings {
            originator_settings: Some(OriginatorSettings::alphanumeric(originator)),
            ..Default::default()
        });
    }

    let client = SmsGatewayClient::new(ClientConfig::new(
        base_url, service_id, username, password,
    )?)?;
    let ctx = CallContext::new().with_timeout(Duration::from_secs(5));

    let response = client
        .send_messages_with_context(&ctx, vec![message], batch_reference)
        .await?;
    println!("batch: {}", response.batch_reference);
    for status in &response.message_status {
        println!(
            "{} -> {} {} (message_id: {:?})",
            status.recipient, status.status_code, status.status_message, status.message_id
        );
    }

    Ok(())
}
