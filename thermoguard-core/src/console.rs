//! Single-key console
//!
//! Commands are one character, optionally followed by a number on the same
//! line:
//!
//! ```text
//! l 19.5    lower limit
//! u 23      upper limit
//! d 2       hysteresis
//! a 405     local altitude
//! i 2000    refresh interval in ms
//! t         toggle heating control
//! v         show values
//! S         show menu
//! ```
//!
//! Numbers are read leniently, the way a serial monitor user types them:
//! the last number in the text wins and text without a number reads as 0.
//! There is no error path; a typo shows up as a strange setting in the next
//! values dump.

use core::fmt;

use heapless::String;

use crate::controller::Thermostat;
use crate::sensor::SensorSource;

/// Console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `l`: lower limit in °C
    SetLowLimit,
    /// `u`: upper limit in °C
    SetHighLimit,
    /// `d`: hysteresis in °C, upper limit held
    SetDelta,
    /// `a`: local altitude in meters
    SetAltitude,
    /// `i`: sampling interval in ms
    SetRefreshInterval,
    /// `t`: switch heating control on or off
    ToggleEnabled,
    /// `v`: print the values dump
    ShowValues,
    /// `S`: print the menu
    ShowMenu,
}

/// Menu entry
#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    /// Key typed on the console
    pub key: char,
    /// Menu line
    pub text: &'static str,
    /// Command bound to the key
    pub command: Command,
}

/// Every command with its key, in menu order
pub const MENU: [MenuItem; 8] = [
    MenuItem { key: 'l', text: "[l] Set lower limit [°C]", command: Command::SetLowLimit },
    MenuItem { key: 'u', text: "[u] Set upper limit [°C]", command: Command::SetHighLimit },
    MenuItem { key: 'd', text: "[d] Set delta T", command: Command::SetDelta },
    MenuItem { key: 'a', text: "[a] Set local altitude [m]", command: Command::SetAltitude },
    MenuItem { key: 'i', text: "[i] Set refresh interval", command: Command::SetRefreshInterval },
    MenuItem { key: 't', text: "[t] Toggle heating on/off", command: Command::ToggleEnabled },
    MenuItem { key: 'v', text: "[v] Show values", command: Command::ShowValues },
    MenuItem { key: 'S', text: "[S] Show menu", command: Command::ShowMenu },
];

/// What the console should do after a command ran
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandOutcome {
    /// A setting changed
    Updated,
    /// Heating control switched, carries the new state
    Toggled(bool),
    /// Print the values dump
    ShowValues,
    /// Print the menu
    ShowMenu,
}

impl Command {
    /// Look up a key, case sensitive
    pub fn from_key(key: char) -> Option<Self> {
        MENU.iter().find(|item| item.key == key).map(|item| item.command)
    }

    /// Whether a number is read after the key
    pub fn takes_argument(self) -> bool {
        matches!(
            self,
            Command::SetLowLimit
                | Command::SetHighLimit
                | Command::SetDelta
                | Command::SetAltitude
                | Command::SetRefreshInterval
        )
    }

    /// Run the command against `thermostat`, `argument` is the text after the key
    pub fn apply<S: SensorSource>(self, thermostat: &mut Thermostat<S>, argument: &str) -> CommandOutcome {
        match self {
            Command::SetLowLimit => thermostat.set_limit_low(parse_lenient_f32(argument)),
            Command::SetHighLimit => thermostat.set_limit_high(parse_lenient_f32(argument)),
            Command::SetDelta => thermostat.set_temp_delta(parse_lenient_f32(argument)),
            Command::SetAltitude => thermostat.set_local_altitude(parse_lenient_f32(argument)),
            Command::SetRefreshInterval => thermostat.set_refresh_interval(parse_lenient_u32(argument)),
            Command::ToggleEnabled => return CommandOutcome::Toggled(thermostat.toggle()),
            Command::ShowValues => return CommandOutcome::ShowValues,
            Command::ShowMenu => return CommandOutcome::ShowMenu,
        }
        log::debug!("Command {:?} applied with {:?}", self, argument);
        CommandOutcome::Updated
    }
}

/// Split a console line into command and argument text
///
/// Leading whitespace is skipped. `None` for empty lines and unknown keys.
pub fn parse_line(line: &str) -> Option<(Command, &str)> {
    let line = line.trim_start();
    let key = line.chars().next()?;
    let command = Command::from_key(key)?;
    Some((command, &line[key.len_utf8()..]))
}

/// Last decimal number in `text`, 0 if there is none
pub fn parse_lenient_f32(text: &str) -> f32 {
    NumberTokens::new(text, true)
        .filter_map(|token| token.parse::<f32>().ok())
        .last()
        .unwrap_or(0.0)
}

/// Last integer in `text`, clamped to `u32`, 0 if there is none
pub fn parse_lenient_u32(text: &str) -> u32 {
    NumberTokens::new(text, false)
        .filter_map(|token| token.parse::<i64>().ok())
        .last()
        .map(|value| value.clamp(0, i64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

/// Runs of digits (and `.` when `decimal`) in `text`
///
/// A sign only opens a run, so `5-3` yields `5` and `-3`.
struct NumberTokens<'a> {
    text: &'a str,
    pos: usize,
    decimal: bool,
}

impl<'a> NumberTokens<'a> {
    fn new(text: &'a str, decimal: bool) -> Self {
        Self { text, pos: 0, decimal }
    }

    fn is_body(&self, byte: u8) -> bool {
        byte.is_ascii_digit() || (self.decimal && byte == b'.')
    }
}

impl<'a> Iterator for NumberTokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            let byte = bytes[self.pos];
            if self.is_body(byte) || byte == b'-' || byte == b'+' {
                break;
            }
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        self.pos += 1;
        while self.pos < bytes.len() && self.is_body(bytes[self.pos]) {
            self.pos += 1;
        }
        // Token bounds sit on ASCII bytes, so they are char boundaries
        Some(&self.text[start..self.pos])
    }
}

/// The menu as printed on the console
pub struct Menu;

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "------------------------")?;
        writeln!(f, " ThermoGuard Thermostat ")?;
        writeln!(f, "------------------------")?;
        for item in MENU.iter() {
            writeln!(f, "{}", item.text)?;
        }
        writeln!(f, "\nPress a key:")
    }
}

/// Collects serial bytes into lines without allocating
///
/// Bytes past the capacity are dropped until the line ends.
#[derive(Debug, Default)]
pub struct LineBuffer<const N: usize> {
    line: String<N>,
    overflowed: bool,
}

impl<const N: usize> LineBuffer<N> {
    /// Empty buffer
    pub fn new() -> Self {
        Self { line: String::new(), overflowed: false }
    }

    /// Feed one byte, returns the finished line on CR or LF
    pub fn push(&mut self, byte: u8) -> Option<String<N>> {
        match byte {
            b'\r' | b'\n' => {
                if self.overflowed {
                    log::warn!("Console line longer than {} bytes truncated", N);
                    self.overflowed = false;
                }
                if self.line.is_empty() {
                    None
                } else {
                    Some(core::mem::take(&mut self.line))
                }
            }
            // Only ASCII reaches the buffer so it stays valid UTF-8
            byte if byte.is_ascii() => {
                if self.line.push(byte as char).is_err() {
                    self.overflowed = true;
                }
                None
            }
            _ => None,
        }
    }
}
