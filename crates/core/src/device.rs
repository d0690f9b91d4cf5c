//! Device model: identity, interface selection, and configurable values.

use crate::error::{Setting, UnsupportedValue};
use crate::{ARIA_COMMAND_INTERFACE, ARIA_PID, ARIA_VID};

/// One HID interface reported by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub path: String,
    pub interface_number: i32,
    pub vendor_id: u16,
    pub product_id: u16,
    pub product: Option<String>,
}

impl InterfaceInfo {
    /// Whether this is the Aria's vendor command interface.
    pub fn is_command_interface(&self) -> bool {
        self.vendor_id == ARIA_VID
            && self.product_id == ARIA_PID
            && self.interface_number == ARIA_COMMAND_INTERFACE
    }
}

/// Pick the vendor command interface out of an enumeration result.
///
/// The Aria exposes several HID interfaces; only interface 1 accepts the
/// vendor feature reports.
pub fn select_command_interface(interfaces: &[InterfaceInfo]) -> Option<&InterfaceInfo> {
    interfaces.iter().find(|i| i.is_command_interface())
}

/// Polling rate options offered for the Aria.
///
/// 125 Hz is listed because users ask for it, but the device has no known
/// code for it: [`crate::report_rate::encode_polling`] rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u16)]
pub enum PollingRate {
    Hz125 = 125,
    Hz250 = 250,
    Hz500 = 500,
    Hz1000 = 1000,
}

impl PollingRate {
    /// Convert from raw Hz value.
    pub fn from_hz(hz: u16) -> Option<Self> {
        match hz {
            125 => Some(Self::Hz125),
            250 => Some(Self::Hz250),
            500 => Some(Self::Hz500),
            1000 => Some(Self::Hz1000),
            _ => None,
        }
    }

    /// Get the Hz value.
    pub fn as_hz(&self) -> u16 {
        *self as u16
    }

    /// Every rate shown to users, including the unsupported 125 Hz.
    pub const ALL: &'static [PollingRate] = &[
        PollingRate::Hz125,
        PollingRate::Hz250,
        PollingRate::Hz500,
        PollingRate::Hz1000,
    ];

    /// Rates the device can actually be set to.
    pub const SUPPORTED: &'static [PollingRate] =
        &[PollingRate::Hz250, PollingRate::Hz500, PollingRate::Hz1000];

    /// Whether the device has a code for this rate.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Hz125)
    }
}

impl TryFrom<u16> for PollingRate {
    type Error = UnsupportedValue;

    fn try_from(hz: u16) -> Result<Self, Self::Error> {
        Self::from_hz(hz).ok_or(UnsupportedValue {
            setting: Setting::PollingRate,
            value: hz as u32,
        })
    }
}

impl std::fmt::Display for PollingRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Hz", self.as_hz())
    }
}

/// DPI levels the Aria sensor can be set to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(u16)]
pub enum DpiLevel {
    Dpi800 = 800,
    Dpi1600 = 1600,
    Dpi3200 = 3200,
    Dpi8000 = 8000,
}

impl DpiLevel {
    /// Convert from a raw DPI value.
    pub fn from_dpi(dpi: u16) -> Option<Self> {
        match dpi {
            800 => Some(Self::Dpi800),
            1600 => Some(Self::Dpi1600),
            3200 => Some(Self::Dpi3200),
            8000 => Some(Self::Dpi8000),
            _ => None,
        }
    }

    /// Get the DPI value.
    pub fn as_dpi(&self) -> u16 {
        *self as u16
    }

    /// All levels, ascending.
    pub const ALL: &'static [DpiLevel] = &[
        DpiLevel::Dpi800,
        DpiLevel::Dpi1600,
        DpiLevel::Dpi3200,
        DpiLevel::Dpi8000,
    ];
}

impl TryFrom<u16> for DpiLevel {
    type Error = UnsupportedValue;

    fn try_from(dpi: u16) -> Result<Self, Self::Error> {
        Self::from_dpi(dpi).ok_or(UnsupportedValue {
            setting: Setting::Dpi,
            value: dpi as u32,
        })
    }
}

impl std::fmt::Display for DpiLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} DPI", self.as_dpi())
    }
}
