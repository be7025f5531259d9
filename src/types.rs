//! Types for CLRC663 operations

use std::fmt;

/// Errors that can occur during reader operations
#[derive(Debug)]
pub enum Clrc663Error {
    /// Transport layer error (I2C, SPI, etc.)
    Transport(String),
    /// The chip never answered during initialization
    WakeupFailed,
}

impl fmt::Display for Clrc663Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clrc663Error::Transport(e) => write!(f, "transport error: {}", e),
            Clrc663Error::WakeupFailed => write!(f, "chip wakeup failed"),
        }
    }
}

impl std::error::Error for Clrc663Error {}

/// Terminal error classification latched by the driver, readable through
/// [`error_code`](crate::Clrc663::error_code) after setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCode {
    #[default]
    None,
    WakeupFailed,
}

/// Convert bytes to uppercase hex string
pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
