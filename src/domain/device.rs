use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

/// An object that knows its own GCM registration token.
pub trait DeviceToken: Send + Sync + Debug {
    fn token(&self) -> String;
}

/// A routing target returned by a notifiable for the GCM channel.
#[derive(Debug, Clone)]
pub enum Device {
    /// A bare registration token.
    Token(String),
    /// A device record that yields its token on demand.
    Registered(Arc<dyn DeviceToken>),
}

impl Device {
    /// Resolves the registration token for this device.
    #[must_use]
    pub fn token(&self) -> Cow<'_, str> {
        match self {
            Self::Token(token) => Cow::Borrowed(token),
            Self::Registered(device) => Cow::Owned(device.token()),
        }
    }
}

impl From<String> for Device {
    fn from(token: String) -> Self {
        Self::Token(token)
    }
}

impl From<&str> for Device {
    fn from(token: &str) -> Self {
        Self::Token(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Phone {
        registration: String,
    }

    impl DeviceToken for Phone {
        fn token(&self) -> String {
            self.registration.clone()
        }
    }

    #[test]
    fn test_raw_token_is_used_as_is() {
        let device = Device::from("abc123");
        assert_eq!(device.token(), "abc123");
    }

    #[test]
    fn test_registered_device_yields_its_token() {
        let device = Device::Registered(Arc::new(Phone { registration: "phone-token".to_string() }));
        assert_eq!(device.token(), "phone-token");
    }
}
