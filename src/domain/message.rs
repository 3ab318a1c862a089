use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Delivery priority understood by GCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
}

/// The GCM-specific rendition of a notification for one device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GcmMessage {
    pub title: String,
    pub message: String,
    pub data: Map<String, Value>,
    pub priority: Option<Priority>,
}

impl GcmMessage {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Adds one extra key to the data payload. A later value for the same key replaces the earlier one.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}
