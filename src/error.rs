use crate::adapters::push::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Sending the notification to GCM failed: {0}")]
    SendingFailed(#[source] ClientError),
}

pub type Result<T> = std::result::Result<T, ChannelError>;

impl ChannelError {
    /// Returns the client error that caused the send to fail.
    #[must_use]
    pub const fn client_error(&self) -> &ClientError {
        match self {
            Self::SendingFailed(e) => e,
        }
    }
}
