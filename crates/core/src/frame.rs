//! Aria vendor command frames.
//!
//! Every command is a single 17-byte feature report:
//!
//! ```text
//! [0x08, opcode, payload..., 0x00 padding..., terminator]
//! ```
//!
//! - `0x08` is the vendor report ID.
//! - The opcode selects the command: `0x03` handshake, `0x04` commit,
//!   `0x07` configuration write (polling rate and DPI share it).
//! - The terminator is fixed per command kind and acts as the device's
//!   checksum byte: handshake `0x4A`, commit `0x49`, polling `0xEF`, DPI `0xE1`.

use std::fmt;

/// Vendor feature report ID (first byte of every frame).
pub const REPORT_ID: u8 = 0x08;

/// Length of every command frame, including report ID and terminator.
pub const FRAME_LEN: usize = 17;

/// Bytes available between the opcode and the terminator.
pub const PAYLOAD_CAPACITY: usize = FRAME_LEN - 3;

/// Command opcodes (byte 1).
pub mod opcodes {
    /// Preamble required before each configuration write.
    pub const HANDSHAKE: u8 = 0x03;
    /// Persist the previous write to flash.
    pub const COMMIT: u8 = 0x04;
    /// Configuration write (polling rate or DPI).
    pub const WRITE: u8 = 0x07;
}

/// The kind of a command frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Handshake,
    Commit,
    PollingRate,
    Dpi,
}

impl CommandKind {
    /// All frame kinds.
    pub const ALL: &'static [CommandKind] = &[
        CommandKind::Handshake,
        CommandKind::Commit,
        CommandKind::PollingRate,
        CommandKind::Dpi,
    ];

    /// Opcode byte for this kind.
    pub const fn opcode(self) -> u8 {
        match self {
            Self::Handshake => opcodes::HANDSHAKE,
            Self::Commit => opcodes::COMMIT,
            Self::PollingRate | Self::Dpi => opcodes::WRITE,
        }
    }

    /// Trailing byte every frame of this kind ends with.
    pub const fn terminator(self) -> u8 {
        match self {
            Self::Handshake => 0x4A,
            Self::Commit => 0x49,
            Self::PollingRate => 0xEF,
            Self::Dpi => 0xE1,
        }
    }

    /// Identify the kind of a raw frame from its report ID, opcode and terminator.
    ///
    /// Returns `None` for anything that is not a well-formed Aria command.
    pub fn classify(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != FRAME_LEN || bytes[0] != REPORT_ID {
            return None;
        }
        let opcode = bytes[1];
        let terminator = bytes[FRAME_LEN - 1];
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.opcode() == opcode && kind.terminator() == terminator)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handshake => f.write_str("handshake"),
            Self::Commit => f.write_str("commit"),
            Self::PollingRate => f.write_str("polling rate"),
            Self::Dpi => f.write_str("DPI"),
        }
    }
}

/// An immutable, fully-encoded command frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    kind: CommandKind,
    bytes: [u8; FRAME_LEN],
}

impl CommandFrame {
    /// Build a frame of `kind` with `payload` placed right after the opcode.
    ///
    /// Payloads longer than [`PAYLOAD_CAPACITY`] do not compile.
    pub(crate) fn with_payload<const N: usize>(kind: CommandKind, payload: &[u8; N]) -> Self {
        const { assert!(N <= PAYLOAD_CAPACITY, "payload exceeds frame capacity") };
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = REPORT_ID;
        bytes[1] = kind.opcode();
        bytes[2..2 + N].copy_from_slice(payload);
        bytes[FRAME_LEN - 1] = kind.terminator();
        Self { kind, bytes }
    }

    /// Command kind of this frame.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Raw report bytes, report ID first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Trailing terminator byte.
    pub fn terminator(&self) -> u8 {
        self.bytes[FRAME_LEN - 1]
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Handshake frame: `[0x08, 0x03, 0x00 x14, 0x4A]`.
pub fn handshake_frame() -> CommandFrame {
    CommandFrame::with_payload(CommandKind::Handshake, &[])
}

/// Commit frame: `[0x08, 0x04, 0x00 x14, 0x49]`.
pub fn commit_frame() -> CommandFrame {
    CommandFrame::with_payload(CommandKind::Commit, &[])
}
