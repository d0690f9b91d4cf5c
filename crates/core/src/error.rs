//! Error types for open-aria-core.

use std::fmt;
use thiserror::Error;

/// Transport-level error raised by a [`HidTransport`](crate::transport::HidTransport).
#[derive(Debug, Error)]
pub enum Error {
    /// HID device communication failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// Permission denied (udev rules missing, or another process holds the device).
    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

impl From<hidapi::HidError> for Error {
    fn from(e: hidapi::HidError) -> Self {
        let msg = e.to_string();
        if msg.contains("Permission denied") || msg.contains("EPERM") {
            Error::PermissionDenied(msg)
        } else {
            Error::Hid(msg)
        }
    }
}

/// Convenience Result alias for transport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which configurable setting a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    PollingRate,
    Dpi,
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PollingRate => f.write_str("polling rate"),
            Self::Dpi => f.write_str("DPI"),
        }
    }
}

/// A requested value is not in the device's fixed lookup table.
///
/// Always raised before any I/O takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported {setting}: {value}")]
pub struct UnsupportedValue {
    pub setting: Setting,
    pub value: u32,
}

/// Step of a handshake/payload/commit transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Handshake,
    Payload,
    Commit,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handshake => f.write_str("handshake"),
            Self::Payload => f.write_str("payload"),
            Self::Commit => f.write_str("commit"),
        }
    }
}

/// Failure to establish a device session.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// No HID interface matched VID, PID and interface index.
    #[error(
        "device not found (VID=0x{vid:04X} PID=0x{pid:04X} interface {interface}); check cable and driver"
    )]
    DeviceNotFound { vid: u16, pid: u16, interface: i32 },

    /// The matched interface could not be opened.
    #[error("failed to open {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: Error,
    },

    /// HID enumeration itself failed.
    #[error("HID enumeration failed: {0}")]
    Enumerate(#[source] Error),
}

/// Failure to apply one setting.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The value has no device code; nothing was sent.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedValue),

    /// A feature-report send failed; the remaining steps were skipped.
    #[error("{step} send failed: {source}")]
    Transport {
        step: Step,
        #[source]
        source: Error,
    },

    /// The session has no open device handle.
    #[error("device session is not connected")]
    NotConnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_value_message_names_setting() {
        let err = UnsupportedValue {
            setting: Setting::PollingRate,
            value: 125,
        };
        assert_eq!(err.to_string(), "unsupported polling rate: 125");
    }

    #[test]
    fn transport_error_names_failed_step() {
        let err = ApplyError::Transport {
            step: Step::Commit,
            source: Error::Hid("broken pipe".into()),
        };
        assert_eq!(err.to_string(), "commit send failed: HID error: broken pipe");
    }

    #[test]
    fn device_not_found_shows_identity() {
        let err = ConnectError::DeviceNotFound {
            vid: 0x25A7,
            pid: 0xFA7C,
            interface: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("0x25A7"));
        assert!(msg.contains("0xFA7C"));
    }
}
