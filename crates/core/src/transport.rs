//! HID transport abstraction for device communication.
//!
//! Provides a trait-based transport layer so that real HID devices and
//! mock devices share the same interface.

use crate::device::InterfaceInfo;
use crate::error::{Error, Result};
use crate::{ARIA_PID, ARIA_VID};
use std::ffi::CString;
use std::sync::Mutex;
use tracing::debug;

/// Abstraction over the HID primitives the session needs.
///
/// The transport never interprets frames; it only moves bytes.
pub trait HidTransport {
    /// Open device handle.
    type Handle;

    /// List every HID interface with the given vendor and product ID.
    fn enumerate(&self, vendor_id: u16, product_id: u16) -> Result<Vec<InterfaceInfo>>;

    /// Open the interface at `path`.
    fn open(&self, path: &str) -> Result<Self::Handle>;

    /// Send one feature report. The first byte is the report ID.
    fn send_feature_report(&self, handle: &mut Self::Handle, data: &[u8]) -> Result<()>;

    /// Release a handle.
    fn close(&self, handle: Self::Handle) -> Result<()>;
}

impl<T: HidTransport + ?Sized> HidTransport for &T {
    type Handle = T::Handle;

    fn enumerate(&self, vendor_id: u16, product_id: u16) -> Result<Vec<InterfaceInfo>> {
        (**self).enumerate(vendor_id, product_id)
    }

    fn open(&self, path: &str) -> Result<Self::Handle> {
        (**self).open(path)
    }

    fn send_feature_report(&self, handle: &mut Self::Handle, data: &[u8]) -> Result<()> {
        (**self).send_feature_report(handle, data)
    }

    fn close(&self, handle: Self::Handle) -> Result<()> {
        (**self).close(handle)
    }
}

/// List every HID interface belonging to an Aria.
pub fn list_interfaces<T: HidTransport + ?Sized>(transport: &T) -> Result<Vec<InterfaceInfo>> {
    transport.enumerate(ARIA_VID, ARIA_PID)
}

/// hidapi-backed transport.
pub struct HidApiTransport {
    api: Mutex<hidapi::HidApi>,
}

impl HidApiTransport {
    /// Initialize hidapi.
    pub fn new() -> Result<Self> {
        let api = hidapi::HidApi::new()?;
        Ok(Self {
            api: Mutex::new(api),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, hidapi::HidApi>> {
        self.api
            .lock()
            .map_err(|_| Error::Hid("hidapi context lock poisoned".to_string()))
    }
}

impl HidTransport for HidApiTransport {
    type Handle = hidapi::HidDevice;

    fn enumerate(&self, vendor_id: u16, product_id: u16) -> Result<Vec<InterfaceInfo>> {
        debug!(
            vid = format_args!("0x{:04X}", vendor_id),
            pid = format_args!("0x{:04X}", product_id),
            "Starting HID device enumeration"
        );
        let mut api = self.lock()?;
        api.refresh_devices()?;

        let interfaces: Vec<InterfaceInfo> = api
            .device_list()
            .filter(|info| info.vendor_id() == vendor_id && info.product_id() == product_id)
            .map(|info| InterfaceInfo {
                path: info.path().to_string_lossy().into_owned(),
                interface_number: info.interface_number(),
                vendor_id: info.vendor_id(),
                product_id: info.product_id(),
                product: info.product_string().map(|s| s.to_string()),
            })
            .collect();

        debug!(count = interfaces.len(), "Device enumeration complete");
        Ok(interfaces)
    }

    fn open(&self, path: &str) -> Result<Self::Handle> {
        let c_path =
            CString::new(path).map_err(|e| Error::Hid(format!("invalid device path: {e}")))?;
        let api = self.lock()?;
        Ok(api.open_path(&c_path)?)
    }

    fn send_feature_report(&self, handle: &mut Self::Handle, data: &[u8]) -> Result<()> {
        handle.send_feature_report(data)?;
        Ok(())
    }

    fn close(&self, handle: Self::Handle) -> Result<()> {
        // hidapi closes the device when the handle is dropped.
        drop(handle);
        Ok(())
    }
}

/// A mock HID transport for testing.
///
/// Records every feature report and can be told to fail specific steps.
#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::frame::CommandKind;
    use crate::ARIA_COMMAND_INTERFACE;

    /// Handle returned by [`MockTransport::open`].
    #[derive(Debug)]
    pub struct MockHandle {
        pub path: String,
    }

    /// Mock transport that records sends and injects failures.
    pub struct MockTransport {
        interfaces: Vec<InterfaceInfo>,
        sent: Mutex<Vec<Vec<u8>>>,
        fail_kinds: Mutex<Vec<CommandKind>>,
        fail_open: Mutex<bool>,
        fail_enumerate: Mutex<bool>,
        fail_close: Mutex<bool>,
        opens: Mutex<u32>,
        closes: Mutex<u32>,
    }

    impl MockTransport {
        /// A mock with the given enumeration result.
        pub fn with_interfaces(interfaces: Vec<InterfaceInfo>) -> Self {
            Self {
                interfaces,
                sent: Mutex::new(Vec::new()),
                fail_kinds: Mutex::new(Vec::new()),
                fail_open: Mutex::new(false),
                fail_enumerate: Mutex::new(false),
                fail_close: Mutex::new(false),
                opens: Mutex::new(0),
                closes: Mutex::new(0),
            }
        }

        /// A mock exposing a plugged-in Aria with interfaces 0, 1 and 2.
        pub fn aria() -> Self {
            let interfaces = (0..3)
                .map(|n| InterfaceInfo {
                    path: format!("mock-aria-if{n}"),
                    interface_number: n,
                    vendor_id: ARIA_VID,
                    product_id: ARIA_PID,
                    product: Some("ARIA XD7".to_string()),
                })
                .collect();
            Self::with_interfaces(interfaces)
        }

        /// Path of the command interface in [`MockTransport::aria`].
        pub fn aria_command_path() -> String {
            format!("mock-aria-if{ARIA_COMMAND_INTERFACE}")
        }

        /// Fail every send of a frame of this kind.
        pub fn fail_on(&self, kind: CommandKind) {
            self.fail_kinds.lock().unwrap().push(kind);
        }

        pub fn fail_open(&self) {
            *self.fail_open.lock().unwrap() = true;
        }

        pub fn fail_enumerate(&self) {
            *self.fail_enumerate.lock().unwrap() = true;
        }

        pub fn fail_close(&self) {
            *self.fail_close.lock().unwrap() = true;
        }

        /// Every report passed to `send_feature_report`, including failed ones.
        pub fn sent(&self) -> Vec<Vec<u8>> {
            self.sent.lock().unwrap().clone()
        }

        /// Kinds of the sent reports, in order.
        pub fn sent_kinds(&self) -> Vec<Option<CommandKind>> {
            self.sent()
                .iter()
                .map(|r| CommandKind::classify(r))
                .collect()
        }

        pub fn open_count(&self) -> u32 {
            *self.opens.lock().unwrap()
        }

        pub fn close_count(&self) -> u32 {
            *self.closes.lock().unwrap()
        }
    }

    impl HidTransport for MockTransport {
        type Handle = MockHandle;

        fn enumerate(&self, vendor_id: u16, product_id: u16) -> Result<Vec<InterfaceInfo>> {
            if *self.fail_enumerate.lock().unwrap() {
                return Err(Error::Hid("mock: enumeration failed".to_string()));
            }
            Ok(self
                .interfaces
                .iter()
                .filter(|i| i.vendor_id == vendor_id && i.product_id == product_id)
                .cloned()
                .collect())
        }

        fn open(&self, path: &str) -> Result<Self::Handle> {
            if *self.fail_open.lock().unwrap() {
                return Err(Error::PermissionDenied(format!("mock: cannot open {path}")));
            }
            *self.opens.lock().unwrap() += 1;
            Ok(MockHandle {
                path: path.to_string(),
            })
        }

        fn send_feature_report(&self, _handle: &mut Self::Handle, data: &[u8]) -> Result<()> {
            self.sent.lock().unwrap().push(data.to_vec());
            let kind = CommandKind::classify(data);
            let fail = self.fail_kinds.lock().unwrap();
            match kind {
                Some(kind) if fail.contains(&kind) => {
                    Err(Error::Hid(format!("mock: {kind} report rejected")))
                }
                _ => Ok(()),
            }
        }

        fn close(&self, _handle: Self::Handle) -> Result<()> {
            *self.closes.lock().unwrap() += 1;
            if *self.fail_close.lock().unwrap() {
                return Err(Error::Hid("mock: close failed".to_string()));
            }
            Ok(())
        }
    }
}
