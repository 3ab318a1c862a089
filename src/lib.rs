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

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

pub use adapters::push::{ClientError, GcmClient, HttpGcmClient};
pub use domain::device::{Device, DeviceToken};
pub use domain::message::{GcmMessage, Priority};
pub use domain::notification::{FailureData, Notifiable, Notification, NotificationFailed};
pub use domain::packet::Packet;
pub use domain::response::{GcmResponse, TokenResult};
pub use error::ChannelError;
pub use services::channel::{GcmChannel, PacketDefaults};
pub use services::events::{BroadcastEventSink, EventSink, TracingEventSink};
