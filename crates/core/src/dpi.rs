//! DPI frame encoding.
//!
//! DPI write payload (after report ID and opcode `0x07`):
//!   `[0x00, 0x00, 0x0C, 0x04, main, main, 0x00, aux, 0x00 x6]`, terminator `0xE1`.
//!
//! The main byte is sent twice; the firmware expects the pair.

use crate::device::DpiLevel;
use crate::frame::{CommandFrame, CommandKind};

/// Register address of the DPI stage.
const DPI_REGISTER: u8 = 0x0C;
/// Length byte of the DPI stage write.
const DPI_WRITE_LEN: u8 = 0x04;

/// Device code bytes for one DPI level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpiCode {
    pub main: u8,
    pub aux: u8,
}

/// Look up the code bytes for a DPI level.
pub fn dpi_code(level: DpiLevel) -> DpiCode {
    match level {
        DpiLevel::Dpi800 => DpiCode { main: 0x0F, aux: 0x37 },
        DpiLevel::Dpi1600 => DpiCode { main: 0x1F, aux: 0x17 },
        DpiLevel::Dpi3200 => DpiCode { main: 0x3F, aux: 0xD7 },
        DpiLevel::Dpi8000 => DpiCode { main: 0x9F, aux: 0x17 },
    }
}

/// Encode the DPI write frame.
///
/// Raw DPI values are checked when converting into [`DpiLevel`]; every level
/// has a code, so encoding itself cannot fail.
pub fn encode_dpi(level: DpiLevel) -> CommandFrame {
    let DpiCode { main, aux } = dpi_code(level);
    CommandFrame::with_payload(
        CommandKind::Dpi,
        &[0x00, 0x00, DPI_REGISTER, DPI_WRITE_LEN, main, main, 0x00, aux],
    )
}
