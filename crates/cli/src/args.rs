//! Command-line parsing.
//!
//! Accepted forms:
//! - bare values: `--1000`, `--3200`
//! - key=value: `--poll=500`, `--polling=500`, `--dpi=1600`
//! - flag + value: `-p 500`, `--poll 500`, `-d 1600`, `--dpi 1600`
//!
//! Values the device cannot take are ignored with a warning, so the setting
//! falls back to the interactive menu. A repeated setting keeps its last value.

use clap::error::ErrorKind;
use clap::Parser;
use open_aria_core::configure::EXIT_OK;
use open_aria_core::device::{DpiLevel, PollingRate};
use tracing::warn;

/// Process exit code for malformed command lines (sysexits `EX_USAGE`).
///
/// Kept apart from the connect/apply codes 2, 3 and 4.
pub const EXIT_USAGE: i32 = 64;

#[derive(Parser, Debug)]
#[command(
    name = "open-aria",
    version,
    about = "Set polling rate and DPI on the Fantech Aria",
    args_override_self = true
)]
pub struct Cli {
    /// Polling rate in Hz (250, 500 or 1000).
    #[arg(short = 'p', long = "poll", visible_alias = "polling", value_name = "HZ")]
    pub poll: Option<String>,

    /// DPI (800, 1600, 3200 or 8000).
    #[arg(short = 'd', long = "dpi", value_name = "DPI")]
    pub dpi: Option<String>,

    /// List Aria HID interfaces and exit.
    #[arg(long)]
    pub list_devices: bool,

    /// Do not stop the vendor driver before connecting.
    #[arg(long)]
    pub no_prepare: bool,

    /// Use menu defaults instead of prompting for missing settings.
    #[arg(long)]
    pub non_interactive: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Rewrite bare numeric flags (`--1000`, `--3200`) into `--poll=`/`--dpi=`.
///
/// A value found in both tables counts as a polling rate. Bare numbers that
/// match neither table are dropped.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 {
            out.push(arg);
            continue;
        }
        let Some(digits) = arg.strip_prefix("--") else {
            out.push(arg);
            continue;
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            out.push(arg);
            continue;
        }
        let value: Option<u16> = digits.parse().ok();
        if value.and_then(supported_polling).is_some() {
            out.push(format!("--poll={digits}"));
        } else if value.and_then(DpiLevel::from_dpi).is_some() {
            out.push(format!("--dpi={digits}"));
        } else {
            warn!(arg = %arg, "Ignoring unsupported value");
        }
    }
    out
}

/// Parse the process arguments, bare numeric flags included.
pub fn parse_cli<I>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = String>,
{
    Cli::try_parse_from(normalize_args(args))
}

/// Exit code for a clap error: help and version output are not failures.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
        _ => EXIT_USAGE,
    }
}

fn supported_polling(hz: u16) -> Option<PollingRate> {
    PollingRate::from_hz(hz).filter(PollingRate::is_supported)
}

/// Polling rate from a raw argument, if the device supports it.
pub fn resolve_polling(raw: Option<&str>) -> Option<PollingRate> {
    let raw = raw?;
    let rate = raw.trim().parse::<u16>().ok().and_then(supported_polling);
    if rate.is_none() {
        warn!(value = raw, "Ignoring unsupported polling rate");
    }
    rate
}

/// DPI level from a raw argument, if the device supports it.
pub fn resolve_dpi(raw: Option<&str>) -> Option<DpiLevel> {
    let raw = raw?;
    let level = raw.trim().parse::<u16>().ok().and_then(DpiLevel::from_dpi);
    if level.is_none() {
        warn!(value = raw, "Ignoring unsupported DPI");
    }
    level
}
