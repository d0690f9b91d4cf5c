//! Interactive numbered menus for settings not given on the command line.

use open_aria_core::device::{DpiLevel, PollingRate};
use open_aria_core::dpi::dpi_code;
use std::io::{self, BufRead, Write};

/// Polling menu entries, 1-based.
const POLLING_MENU: [PollingRate; 4] = [
    PollingRate::Hz125,
    PollingRate::Hz250,
    PollingRate::Hz500,
    PollingRate::Hz1000,
];

/// Menu choice used on empty input.
pub const DEFAULT_POLLING_CHOICE: &str = "2";
/// Rate used when the input is not a valid menu entry.
pub const FALLBACK_POLLING: PollingRate = PollingRate::Hz250;

pub const DEFAULT_DPI_CHOICE: &str = "3";
pub const FALLBACK_DPI: DpiLevel = DpiLevel::Dpi3200;

/// Map a polling menu answer to a rate.
pub fn parse_polling_choice(answer: &str) -> PollingRate {
    let answer = answer.trim();
    let answer = if answer.is_empty() {
        DEFAULT_POLLING_CHOICE
    } else {
        answer
    };
    answer
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| POLLING_MENU.get(i).copied())
        .unwrap_or(FALLBACK_POLLING)
}

/// Map a DPI menu answer to a level.
pub fn parse_dpi_choice(answer: &str) -> DpiLevel {
    let answer = answer.trim();
    let answer = if answer.is_empty() {
        DEFAULT_DPI_CHOICE
    } else {
        answer
    };
    answer
        .parse::<usize>()
        .ok()
        // 0 is out of range, not an alias for the last entry.
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| DpiLevel::ALL.get(i).copied())
        .unwrap_or(FALLBACK_DPI)
}

fn read_answer(input: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Show the polling menu and read one answer.
pub fn choose_polling(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<PollingRate> {
    writeln!(out, "Choose polling rate (1-{}):", POLLING_MENU.len())?;
    for (i, rate) in POLLING_MENU.iter().enumerate() {
        if rate.is_supported() {
            writeln!(out, " {} -> {}", i + 1, rate)?;
        } else {
            writeln!(out, " {} -> {} (not working)", i + 1, rate)?;
        }
    }
    write!(
        out,
        "Polling (1-{}) [default {DEFAULT_POLLING_CHOICE}]: ",
        POLLING_MENU.len()
    )?;
    out.flush()?;

    let rate = parse_polling_choice(&read_answer(input)?);
    if !rate.is_supported() {
        writeln!(out, "Warning: {rate} is not supported by the device, it won't be applied.")?;
    }
    Ok(rate)
}

/// Show the DPI menu and read one answer.
pub fn choose_dpi(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<DpiLevel> {
    writeln!(out, "Choose DPI:")?;
    for (i, level) in DpiLevel::ALL.iter().enumerate() {
        let code = dpi_code(*level);
        writeln!(
            out,
            " {} -> {} (main {:02x}, aux {:02x})",
            i + 1,
            level,
            code.main,
            code.aux
        )?;
    }
    write!(
        out,
        "Choose (1-{}) [default {DEFAULT_DPI_CHOICE}]: ",
        DpiLevel::ALL.len()
    )?;
    out.flush()?;

    Ok(parse_dpi_choice(&read_answer(input)?))
}
