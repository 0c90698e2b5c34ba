use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    /// Text for the scanner button. Always derived from the state, never stored.
    pub fn status_label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "Connecting…",
            ConnectionState::Connected => "Device Connected",
            ConnectionState::Disconnected => "Connect Scanner",
        }
    }

    pub fn is_device_ready(&self) -> bool {
        *self == ConnectionState::Connected
    }

    pub fn can_connect(&self) -> bool {
        *self != ConnectionState::Connecting
    }
}
