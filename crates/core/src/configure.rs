//! Apply a polling rate and DPI pair as two independent transactions.

use crate::device::{DpiLevel, PollingRate};
use crate::session::DeviceSession;
use crate::timing::BETWEEN_SETTINGS;
use crate::transport::HidTransport;
use serde::{Deserialize, Serialize};
use std::thread;
use tracing::warn;

/// Process exit code: everything applied.
pub const EXIT_OK: i32 = 0;
/// Process exit code: the device could not be connected.
pub const EXIT_CONNECT_FAILED: i32 = 2;
/// Process exit code: the polling rate could not be applied.
pub const EXIT_POLLING_FAILED: i32 = 3;
/// Process exit code: the DPI could not be applied.
pub const EXIT_DPI_FAILED: i32 = 4;

/// Settings requested for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRequest {
    pub polling: PollingRate,
    pub dpi: DpiLevel,
}

/// Result of one setting transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SettingOutcome {
    Applied,
    /// Not attempted (125 Hz has no device code).
    Skipped,
    Failed(String),
}

impl SettingOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Per-setting results of [`apply_settings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub request: SettingsRequest,
    pub polling: SettingOutcome,
    pub dpi: SettingOutcome,
}

impl ApplyReport {
    /// Process exit status for this report. A DPI failure wins over a polling
    /// failure because it is checked last.
    pub fn exit_code(&self) -> i32 {
        if self.dpi.is_failed() {
            EXIT_DPI_FAILED
        } else if self.polling.is_failed() {
            EXIT_POLLING_FAILED
        } else {
            EXIT_OK
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code() == EXIT_OK
    }
}

/// Apply polling rate then DPI on a connected session.
///
/// A polling failure is recorded and DPI is still attempted. 125 Hz is
/// skipped rather than sent.
pub fn apply_settings<T: HidTransport>(
    session: &mut DeviceSession<T>,
    request: SettingsRequest,
) -> ApplyReport {
    let polling = if request.polling.is_supported() {
        match session.apply_polling(request.polling) {
            Ok(()) => SettingOutcome::Applied,
            Err(e) => {
                warn!(rate = %request.polling, error = %e, "Polling rate not applied");
                SettingOutcome::Failed(format!("Error applying polling: {e}"))
            }
        }
    } else {
        warn!(rate = %request.polling, "Polling rate has no device code, skipping");
        SettingOutcome::Skipped
    };

    thread::sleep(BETWEEN_SETTINGS);

    let dpi = match session.apply_dpi(request.dpi) {
        Ok(()) => SettingOutcome::Applied,
        Err(e) => {
            warn!(dpi = request.dpi.as_dpi(), error = %e, "DPI not applied");
            SettingOutcome::Failed(format!("Error applying DPI: {e}"))
        }
    };

    ApplyReport {
        request,
        polling,
        dpi,
    }
}
