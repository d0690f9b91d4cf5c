//! Fixed firmware settle delays.
//!
//! These are protocol constants, not tunables: the device gives no
//! acknowledgement, so each step is followed by a blocking sleep long enough
//! for the firmware to take the previous report.

use std::time::Duration;

/// Pause after the handshake frame.
pub const HANDSHAKE_SETTLE: Duration = Duration::from_millis(10);

/// Pause after a polling or DPI payload frame, before the commit.
pub const PAYLOAD_SETTLE: Duration = Duration::from_millis(20);

/// Pause after the commit frame while the device writes flash.
pub const COMMIT_SETTLE: Duration = Duration::from_millis(10);

/// Pause between two independent setting transactions.
pub const BETWEEN_SETTINGS: Duration = Duration::from_millis(50);

/// Pause after terminating a competing vendor driver, before enumeration.
pub const PREFLIGHT_SETTLE: Duration = Duration::from_millis(500);
