use super::device::Device;
use super::message::GcmMessage;
use std::fmt::Debug;
use std::sync::Arc;

/// Something that can receive notifications, such as a user or a device group.
pub trait Notifiable: Send + Sync + Debug {
    /// Returns the devices this notifiable is reachable at on `channel`.
    fn route_notification_for(&self, channel: &str) -> Vec<Device>;
}

/// A notification that knows how to render itself for GCM.
pub trait Notification: Send + Sync + Debug {
    /// Renders the message for one device, or `None` to skip that device.
    fn to_gcm(&self, notifiable: &dyn Notifiable, device: &Device) -> Option<GcmMessage>;
}

/// Token and error reported by GCM for one failed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureData {
    pub token: String,
    pub error: String,
}

/// Raised once per token that GCM refused to deliver to.
#[derive(Debug, Clone)]
pub struct NotificationFailed {
    pub notifiable: Arc<dyn Notifiable>,
    pub notification: Arc<dyn Notification>,
    /// Name of the channel that attempted the delivery.
    pub channel: &'static str,
    pub data: FailureData,
}
