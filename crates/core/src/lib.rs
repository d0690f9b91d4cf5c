//! open-aria-core: command frames, device session, and HID transport.
//!
//! This crate provides the protocol core for configuring the Fantech Aria
//! mouse through vendor feature reports: encoding fixed-length command
//! frames, wrapping each configuration write in a handshake/commit sequence,
//! and owning the device connection while it happens.

pub mod configure;
pub mod device;
pub mod dpi;
pub mod error;
pub mod frame;
#[cfg(test)]
mod integration_tests;
pub mod report_rate;
pub mod session;
pub mod timing;
pub mod transport;

/// Fantech USB Vendor ID.
pub const ARIA_VID: u16 = 0x25A7;

/// Fantech Aria product ID.
pub const ARIA_PID: u16 = 0xFA7C;

/// HID interface that accepts the vendor command feature reports.
pub const ARIA_COMMAND_INTERFACE: i32 = 1;
