use crate::adapters::push::GcmClient;
use crate::config::GcmConfig;
use crate::domain::message::GcmMessage;
use crate::domain::notification::{FailureData, Notifiable, Notification, NotificationFailed};
use crate::domain::packet::Packet;
use crate::domain::response::GcmResponse;
use crate::error::{ChannelError, Result};
use crate::services::events::EventSink;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;

#[derive(Clone, Debug)]
struct Metrics {
    sent: Counter<u64>,
    errors: Counter<u64>,
    delivery_failures: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("gcm-channel");
        Self {
            sent: meter
                .u64_counter("gcm_packets_sent_total")
                .with_description("Total number of packets accepted by GCM")
                .build(),
            errors: meter
                .u64_counter("gcm_send_errors_total")
                .with_description("Total number of packets that could not be sent to GCM")
                .build(),
            delivery_failures: meter
                .u64_counter("gcm_delivery_failures_total")
                .with_description("Total number of per-token delivery failures reported by GCM")
                .build(),
        }
    }
}

/// Packet settings applied to every send, on top of what the message carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PacketDefaults {
    pub time_to_live: Option<u32>,
    pub dry_run: bool,
}

impl From<&GcmConfig> for PacketDefaults {
    fn from(config: &GcmConfig) -> Self {
        Self { time_to_live: config.time_to_live, dry_run: config.dry_run }
    }
}

/// Delivers notifications to GCM and reports per-token failures to an event sink.
#[derive(Clone, Debug)]
pub struct GcmChannel {
    client: Arc<dyn GcmClient>,
    events: Arc<dyn EventSink>,
    defaults: PacketDefaults,
    metrics: Metrics,
}

impl GcmChannel {
    /// Routing key notifiables are asked for.
    pub const NAME: &'static str = "gcm";

    #[must_use]
    pub fn new(client: Arc<dyn GcmClient>, events: Arc<dyn EventSink>) -> Self {
        Self { client, events, defaults: PacketDefaults::default(), metrics: Metrics::new() }
    }

    #[must_use]
    pub const fn with_defaults(mut self, defaults: PacketDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Sends `notification` to every GCM device of `notifiable`, one packet per device.
    ///
    /// Devices for which the notification renders no message are skipped.
    /// Tokens GCM refuses are published as `NotificationFailed` events.
    ///
    /// # Errors
    /// Returns `ChannelError::SendingFailed` as soon as the client fails to
    /// send a packet. Devices after the failing one are not attempted.
    #[tracing::instrument(level = "debug", skip_all, fields(notifiable = ?notifiable))]
    pub async fn send(&self, notifiable: &Arc<dyn Notifiable>, notification: &Arc<dyn Notification>) -> Result<()> {
        let devices = notifiable.route_notification_for(Self::NAME);
        if devices.is_empty() {
            tracing::debug!("Notifiable has no GCM devices");
            return Ok(());
        }

        for device in &devices {
            let token = device.token();

            let Some(message) = notification.to_gcm(notifiable.as_ref(), device) else {
                tracing::debug!(token = %token, "Notification produced no GCM message for device");
                continue;
            };

            let packet = self.build_packet(&token, &message);

            let response = match self.client.send(&packet).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(error = %e, token = %token, "Failed to send GCM packet");
                    self.metrics.errors.add(1, &[]);
                    return Err(ChannelError::SendingFailed(e));
                }
            };

            tracing::debug!(
                token = %token,
                success = response.success_count(),
                failure = response.failure_count(),
                "GCM packet sent"
            );
            self.metrics.sent.add(1, &[]);

            if response.failure_count() != 0 {
                self.handle_failed_notifications(notifiable, notification, &response);
            }
        }

        Ok(())
    }

    /// Builds the packet for one device, applying the channel's packet defaults.
    #[must_use]
    pub fn build_packet(&self, token: &str, message: &GcmMessage) -> Packet {
        Packet::build(token, message).with_time_to_live(self.defaults.time_to_live).with_dry_run(self.defaults.dry_run)
    }

    /// Publishes one `NotificationFailed` event per result that carries an error.
    pub fn handle_failed_notifications(
        &self,
        notifiable: &Arc<dyn Notifiable>,
        notification: &Arc<dyn Notification>,
        response: &GcmResponse,
    ) {
        for (token, result) in response.results() {
            let Some(error) = &result.error else {
                continue;
            };

            tracing::info!(token = %token, error = %error, "GCM reported delivery failure");
            self.metrics.delivery_failures.add(1, &[KeyValue::new("error", error.clone())]);

            self.events.publish(NotificationFailed {
                notifiable: Arc::clone(notifiable),
                notification: Arc::clone(notification),
                channel: Self::NAME,
                data: FailureData { token: token.to_string(), error: error.clone() },
            });
        }
    }
}
