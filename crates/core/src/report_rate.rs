//! Polling rate frame encoding.
//!
//! Polling write payload (after report ID and opcode `0x07`):
//!   `[0x00, 0x00, 0x00, 0x02, b6, b7, 0x00 x8]`, terminator `0xEF`.
//!
//! Rate codes (b6, b7): 250 Hz = `04 51`, 500 Hz = `02 53`, 1000 Hz = `01 54`.
//! 125 Hz has no known code.

use crate::device::PollingRate;
use crate::error::{Setting, UnsupportedValue};
use crate::frame::{CommandFrame, CommandKind};

/// Sub-command byte selecting the polling rate register.
const POLLING_REGISTER: u8 = 0x02;

/// Look up the (b6, b7) code pair for a polling rate.
pub fn rate_code(rate: PollingRate) -> Result<(u8, u8), UnsupportedValue> {
    match rate {
        PollingRate::Hz250 => Ok((0x04, 0x51)),
        PollingRate::Hz500 => Ok((0x02, 0x53)),
        PollingRate::Hz1000 => Ok((0x01, 0x54)),
        PollingRate::Hz125 => Err(UnsupportedValue {
            setting: Setting::PollingRate,
            value: rate.as_hz() as u32,
        }),
    }
}

/// Encode the polling rate write frame.
pub fn encode_polling(rate: PollingRate) -> Result<CommandFrame, UnsupportedValue> {
    let (b6, b7) = rate_code(rate)?;
    Ok(CommandFrame::with_payload(
        CommandKind::PollingRate,
        &[0x00, 0x00, 0x00, POLLING_REGISTER, b6, b7],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FRAME_LEN;

    #[test]
    fn supported_rates_encode_to_table_codes() {
        let table = [
            (PollingRate::Hz250, 0x04, 0x51),
            (PollingRate::Hz500, 0x02, 0x53),
            (PollingRate::Hz1000, 0x01, 0x54),
        ];
        for (rate, b6, b7) in table {
            let frame = encode_polling(rate).unwrap();
            let bytes = frame.as_bytes();
            assert_eq!(bytes.len(), FRAME_LEN);
            assert_eq!(bytes[FRAME_LEN - 1], 0xEF);
            assert_eq!(&bytes[6..8], &[b6, b7]);
            assert_eq!(frame.kind(), CommandKind::PollingRate);
        }
    }

    #[test]
    fn polling_500hz_full_layout() {
        let frame = encode_polling(PollingRate::Hz500).unwrap();
        assert_eq!(
            frame.as_bytes(),
            &[
                0x08, 0x07, 0x00, 0x00, 0x00, 0x02, 0x02, 0x53, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0xEF
            ]
        );
    }

    #[test]
    fn every_supported_rate_has_a_code() {
        for rate in PollingRate::SUPPORTED {
            assert!(rate_code(*rate).is_ok());
        }
    }

    #[test]
    fn hz125_is_rejected() {
        let err = encode_polling(PollingRate::Hz125).unwrap_err();
        assert_eq!(err.setting, Setting::PollingRate);
        assert_eq!(err.value, 125);
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(
            encode_polling(PollingRate::Hz1000).unwrap(),
            encode_polling(PollingRate::Hz1000).unwrap()
        );
    }
}
