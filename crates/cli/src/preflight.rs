//! Pre-connect preparation: get the vendor driver off the device.
//!
//! The Windows vendor utility keeps the command interface busy, so it is
//! terminated before enumeration. This is best-effort; failures are logged.

use open_aria_core::timing::PREFLIGHT_SETTLE;
use std::thread;
use tracing::debug;

/// Process name of the Fantech vendor driver.
pub const VENDOR_DRIVER_PROCESS: &str = "OemDrv.exe";

/// Terminate the vendor driver, then wait for the device to settle.
pub fn stop_vendor_driver() {
    kill_vendor_driver();
    thread::sleep(PREFLIGHT_SETTLE);
}

#[cfg(target_os = "windows")]
fn kill_vendor_driver() {
    use std::process::{Command, Stdio};

    let status = Command::new("taskkill")
        .args(["/F", "/IM", VENDOR_DRIVER_PROCESS])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(s) if s.success() => debug!(process = VENDOR_DRIVER_PROCESS, "Vendor driver stopped"),
        Ok(s) => debug!(process = VENDOR_DRIVER_PROCESS, status = %s, "Vendor driver not running"),
        Err(e) => debug!(error = %e, "Could not run taskkill"),
    }
}

#[cfg(not(target_os = "windows"))]
fn kill_vendor_driver() {
    debug!(
        process = VENDOR_DRIVER_PROCESS,
        "No vendor driver to stop on this platform"
    );
}
