pub mod channel;
pub mod events;
