//! Device session: connection lifecycle and handshake/commit sequencing.
//!
//! Each configuration change is its own transaction:
//!
//! 1. handshake frame, wait [`HANDSHAKE_SETTLE`]
//! 2. payload frame (polling or DPI), wait [`PAYLOAD_SETTLE`]
//! 3. commit frame, wait [`COMMIT_SETTLE`]
//!
//! The firmware sends no acknowledgement, so a transaction counts as applied
//! once all three reports were accepted by the transport. A failed send skips
//! the remaining steps of that transaction.

use crate::device::{select_command_interface, DpiLevel, PollingRate};
use crate::dpi::encode_dpi;
use crate::error::{ApplyError, ConnectError, Step};
use crate::frame::{commit_frame, handshake_frame, CommandFrame};
use crate::report_rate::encode_polling;
use crate::timing::{COMMIT_SETTLE, HANDSHAKE_SETTLE, PAYLOAD_SETTLE};
use crate::transport::HidTransport;
use crate::{ARIA_COMMAND_INTERFACE, ARIA_PID, ARIA_VID};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Platform preparation run once before the first enumeration.
///
/// Used to get competing vendor software off the device. The session makes no
/// assumption about what the hook does.
pub trait Preflight {
    fn prepare(&mut self);
}

impl<F: FnMut()> Preflight for F {
    fn prepare(&mut self) {
        self()
    }
}

/// An exclusively-owned connection to the Aria command interface.
///
/// The handle is released by [`DeviceSession::close`] or on drop, whichever
/// comes first.
pub struct DeviceSession<T: HidTransport> {
    transport: T,
    handle: Option<T::Handle>,
    preflight: Option<Box<dyn Preflight>>,
}

impl<T: HidTransport> DeviceSession<T> {
    /// Create a disconnected session over `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            handle: None,
            preflight: None,
        }
    }

    /// Run `hook` once before the first connect attempt.
    pub fn with_preflight(mut self, hook: impl Preflight + 'static) -> Self {
        self.preflight = Some(Box::new(hook));
        self
    }

    /// Whether a device handle is currently open.
    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    /// Find and open interface 1 of the Aria.
    ///
    /// A no-op when already connected.
    pub fn connect(&mut self) -> Result<(), ConnectError> {
        if self.handle.is_some() {
            debug!("Session already connected");
            return Ok(());
        }

        if let Some(mut hook) = self.preflight.take() {
            debug!("Running pre-connect hook");
            hook.prepare();
        }

        let interfaces = self
            .transport
            .enumerate(ARIA_VID, ARIA_PID)
            .map_err(ConnectError::Enumerate)?;

        let target = select_command_interface(&interfaces).ok_or(ConnectError::DeviceNotFound {
            vid: ARIA_VID,
            pid: ARIA_PID,
            interface: ARIA_COMMAND_INTERFACE,
        })?;

        let handle =
            self.transport
                .open(&target.path)
                .map_err(|source| ConnectError::OpenFailed {
                    path: target.path.clone(),
                    source,
                })?;

        info!(
            vid = format_args!("0x{:04X}", ARIA_VID),
            pid = format_args!("0x{:04X}", ARIA_PID),
            interface = target.interface_number,
            path = %target.path,
            "Connected to Aria"
        );
        self.handle = Some(handle);
        Ok(())
    }

    /// Set and commit the polling rate.
    ///
    /// 125 Hz fails with [`ApplyError::Unsupported`] before anything is sent.
    pub fn apply_polling(&mut self, rate: PollingRate) -> Result<(), ApplyError> {
        let frame = encode_polling(rate)?;
        debug!(rate = %rate, "Applying polling rate");
        self.transaction(&frame)?;
        info!(rate = %rate, "Polling rate applied");
        Ok(())
    }

    /// Set and commit the DPI level.
    pub fn apply_dpi(&mut self, level: DpiLevel) -> Result<(), ApplyError> {
        let frame = encode_dpi(level);
        debug!(dpi = level.as_dpi(), "Applying DPI");
        self.transaction(&frame)?;
        info!(dpi = level.as_dpi(), "DPI applied");
        Ok(())
    }

    /// Release the device handle.
    ///
    /// Safe to call at any time and any number of times. Close errors are
    /// logged and dropped.
    pub fn close(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        match self.transport.close(handle) {
            Ok(()) => debug!("Device closed"),
            Err(e) => debug!(error = %e, "Ignoring error while closing device"),
        }
    }

    fn transaction(&mut self, payload: &CommandFrame) -> Result<(), ApplyError> {
        let handle = self.handle.as_mut().ok_or(ApplyError::NotConnected)?;

        let steps = [
            (Step::Handshake, handshake_frame(), HANDSHAKE_SETTLE),
            (Step::Payload, payload.clone(), PAYLOAD_SETTLE),
            (Step::Commit, commit_frame(), COMMIT_SETTLE),
        ];

        for (step, frame, settle) in &steps {
            send_step(&self.transport, handle, *step, frame, *settle)?;
        }
        Ok(())
    }
}

fn send_step<T: HidTransport>(
    transport: &T,
    handle: &mut T::Handle,
    step: Step,
    frame: &CommandFrame,
    settle: Duration,
) -> Result<(), ApplyError> {
    trace!(
        step = %step,
        kind = %frame.kind(),
        report_hex = format_args!("{:02X?}", frame.as_bytes()),
        "HID TX"
    );
    if let Err(source) = transport.send_feature_report(handle, frame.as_bytes()) {
        warn!(step = %step, kind = %frame.kind(), error = %source, "Feature report send failed");
        return Err(ApplyError::Transport { step, source });
    }
    thread::sleep(settle);
    Ok(())
}

impl<T: HidTransport> Drop for DeviceSession<T> {
    fn drop(&mut self) {
        self.close();
    }
}
