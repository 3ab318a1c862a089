use crate::domain::notification::NotificationFailed;
use tokio::sync::broadcast;

/// Destination for delivery failure events.
pub trait EventSink: Send + Sync + std::fmt::Debug {
    /// Publishes a failure event. Fire-and-forget.
    fn publish(&self, event: NotificationFailed);
}

/// Fans failure events out to every subscribed receiver.
#[derive(Debug, Clone)]
pub struct BroadcastEventSink {
    tx: broadcast::Sender<NotificationFailed>,
}

impl BroadcastEventSink {
    /// Creates a sink buffering up to `capacity` events per receiver. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationFailed> {
        self.tx.subscribe()
    }
}

impl EventSink for BroadcastEventSink {
    fn publish(&self, event: NotificationFailed) {
        // No subscribers is fine
        let _ = self.tx.send(event);
    }
}

/// Writes failure events to the log and nowhere else.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: NotificationFailed) {
        tracing::warn!(
            channel = event.channel,
            token = %event.data.token,
            error = %event.data.error,
            "Notification delivery failed"
        );
    }
}
