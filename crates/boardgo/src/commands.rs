//! Command implementations.

use boardgo_agent::NotificationAgent;
use boardgo_api::{serve, AppState};
use boardgo_core::Settings;

use crate::cli::{Commands, OutputFormat};

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Runs one CLI command.
pub async fn execute(
    command: Commands,
    mut settings: Settings,
    polish: bool,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Commands::Send {
            flight_code,
            recipient,
        } => send(&settings, polish, format, &flight_code, &recipient).await,
        Commands::Status { flight_code } => status(&settings, polish, format, &flight_code).await,
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                settings.host = host;
            }
            if let Some(port) = port {
                settings.port = port;
            }
            let state = AppState::from_settings(&settings, polish)?;
            println!("BoardAndGo API listening on http://{}", settings.bind_address());
            serve(state).await?;
            Ok(())
        }
    }
}

async fn send(
    settings: &Settings,
    polish: bool,
    format: OutputFormat,
    flight_code: &str,
    recipient: &str,
) -> Result<()> {
    let agent = NotificationAgent::from_settings(settings, polish)?;

    let envelope = match agent.send_notification_for_flight(flight_code, recipient).await {
        Ok(envelope) => envelope,
        Err(e) => {
            if let Some(message) = e.undelivered_message() {
                eprintln!("Message not delivered:\n  {}", message);
            }
            return Err(e.into());
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&envelope)?),
        OutputFormat::Text => {
            println!("{}", envelope.final_message().unwrap_or_default());
            println!();
            println!("Category:   {}", envelope.category);
            println!("Recipient:  {}", envelope.result.recipient_number);
            println!("Message id: {}", envelope.result.provider_message_id);
        }
    }
    Ok(())
}

async fn status(
    settings: &Settings,
    polish: bool,
    format: OutputFormat,
    flight_code: &str,
) -> Result<()> {
    let agent = NotificationAgent::from_settings(settings, polish)?;
    let preview = agent.preview(flight_code).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&preview)?),
        OutputFormat::Text => {
            println!("{}", preview.message);
            println!();
            println!("Category: {}", preview.category);
            println!("Status:   {}", preview.record.status);
            if preview.polished {
                println!("(reworded by language model)");
            }
        }
    }
    Ok(())
}
