#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use clap::Parser;
use gcm_channel::config::Config;
use gcm_channel::services::channel::PacketDefaults;
use gcm_channel::{
    Device, GcmChannel, GcmMessage, HttpGcmClient, Notifiable, Notification, TracingEventSink, telemetry,
};
use std::sync::Arc;
use tracing::Instrument;

/// Send a single notification to one or more GCM registration tokens.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Notification title
    #[arg(long)]
    title: String,

    /// Notification body
    #[arg(long)]
    message: String,

    /// Extra data entries, as key=value
    #[arg(long = "data", value_parser = parse_key_value)]
    data: Vec<(String, String)>,

    /// Registration tokens to deliver to
    #[arg(required = true)]
    tokens: Vec<String>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

#[derive(Debug)]
struct Recipients(Vec<String>);

impl Notifiable for Recipients {
    fn route_notification_for(&self, channel: &str) -> Vec<Device> {
        if channel == GcmChannel::NAME { self.0.iter().map(|t| Device::from(t.as_str())).collect() } else { Vec::new() }
    }
}

#[derive(Debug)]
struct Broadcast(GcmMessage);

impl Notification for Broadcast {
    fn to_gcm(&self, _notifiable: &dyn Notifiable, _device: &Device) -> Option<GcmMessage> {
        Some(self.0.clone())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let telemetry_guard = telemetry::init_telemetry(&cli.config.telemetry)?;

    let result = async {
        let client = HttpGcmClient::new(&cli.config.gcm)?;
        tracing::info!(endpoint = client.endpoint(), recipients = cli.tokens.len(), "Sending notification");

        let channel = GcmChannel::new(Arc::new(client), Arc::new(TracingEventSink))
            .with_defaults(PacketDefaults::from(&cli.config.gcm));

        let message = cli
            .data
            .iter()
            .fold(GcmMessage::new(cli.title.as_str(), cli.message.as_str()), |msg, (key, value)| {
                msg.with_data(key.as_str(), value.as_str())
            });

        let notifiable: Arc<dyn Notifiable> = Arc::new(Recipients(cli.tokens.clone()));
        let notification: Arc<dyn Notification> = Arc::new(Broadcast(message));

        channel.send(&notifiable, &notification).await?;
        tracing::info!("Notification handed to GCM");
        Ok::<(), anyhow::Error>(())
    }
    .instrument(tracing::info_span!("gcm_send"))
    .await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Sending notification failed");
    }

    telemetry_guard.shutdown();
    result
}
