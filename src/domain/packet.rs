use super::message::{GcmMessage, Priority};
use deunicode::deunicode_with_tofu;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const TITLE_KEY: &str = "title";
const MESSAGE_KEY: &str = "message";
const SLUG_SEPARATOR: char = '-';

/// Request body for the GCM HTTP send endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    pub registration_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapse_key: Option<String>,
    pub data: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_live: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dry_run: bool,
}

impl Packet {
    /// Builds the packet addressed to a single registration token.
    ///
    /// `title` and `message` always come from the message itself; extra data
    /// entries with those names are dropped.
    #[must_use]
    pub fn build(token: &str, message: &GcmMessage) -> Self {
        let mut data = Map::with_capacity(message.data.len() + 2);
        data.insert(TITLE_KEY.to_string(), Value::String(message.title.clone()));
        data.insert(MESSAGE_KEY.to_string(), Value::String(message.message.clone()));
        for (key, value) in &message.data {
            if key != TITLE_KEY && key != MESSAGE_KEY {
                data.insert(key.clone(), value.clone());
            }
        }

        let collapse_key = slug(&message.title);

        Self {
            registration_ids: vec![token.to_string()],
            collapse_key: (!collapse_key.is_empty()).then_some(collapse_key),
            data,
            priority: message.priority,
            time_to_live: None,
            dry_run: false,
        }
    }

    #[must_use]
    pub const fn with_time_to_live(mut self, time_to_live: Option<u32>) -> Self {
        self.time_to_live = time_to_live;
        self
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Transliterates `input` to ASCII, lowercases it and collapses every run of
/// non-alphanumeric characters into a single `-`.
#[must_use]
pub fn slug(input: &str) -> String {
    let ascii = deunicode_with_tofu(input, "");
    let mut out = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(SLUG_SEPARATOR);
            }
            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    out
}
