// termcheck-core/src/ansi.rs
//
// Encoder for the CSI control sequences the exerciser drives at a terminal.
// Only the set a small VT100-style terminal understands: cursor moves,
// absolute positioning, erase and scroll.

use std::fmt;

pub const ESC: u8 = 0x1b;

/// Control Sequence Introducer, `ESC [`.
pub const CSI: &str = "\x1b[";

/// Which part of a line or of the screen an erase covers, relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    /// Cursor to end. Sent with no parameter (`ESC[J`, `ESC[K`).
    ToEnd,
    /// Start to cursor (`1`).
    ToStart,
    /// Everything (`2`).
    All,
}

impl EraseMode {
    fn param(self) -> &'static str {
        match self {
            EraseMode::ToEnd => "",
            EraseMode::ToStart => "1",
            EraseMode::All => "2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSequence {
    EraseDisplay(EraseMode),
    EraseLine(EraseMode),
    /// `ESC[row;colH`. Values are sent as given; `0` is not rewritten to `1`.
    CursorPosition { row: u16, col: u16 },
    CursorUp(u16),
    CursorDown(u16),
    CursorForward(u16),
    CursorBack(u16),
    CursorNextLine(u16),
    CursorPreviousLine(u16),
    CursorColumn(u16),
    ScrollUp(u16),
    ScrollDown(u16),
}

impl ControlSequence {
    pub const CLEAR_SCREEN: Self = ControlSequence::EraseDisplay(EraseMode::All);
    pub const HOME: Self = ControlSequence::CursorPosition { row: 0, col: 0 };

    pub fn goto(row: u16, col: u16) -> Self {
        ControlSequence::CursorPosition { row, col }
    }

    pub fn encode(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for ControlSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ControlSequence::*;
        match *self {
            EraseDisplay(mode) => write!(f, "{CSI}{}J", mode.param()),
            EraseLine(mode) => write!(f, "{CSI}{}K", mode.param()),
            CursorPosition { row, col } => write!(f, "{CSI}{row};{col}H"),
            CursorUp(n) => write!(f, "{CSI}{n}A"),
            CursorDown(n) => write!(f, "{CSI}{n}B"),
            CursorForward(n) => write!(f, "{CSI}{n}C"),
            CursorBack(n) => write!(f, "{CSI}{n}D"),
            CursorNextLine(n) => write!(f, "{CSI}{n}E"),
            CursorPreviousLine(n) => write!(f, "{CSI}{n}F"),
            CursorColumn(n) => write!(f, "{CSI}{n}G"),
            ScrollUp(n) => write!(f, "{CSI}{n}S"),
            ScrollDown(n) => write!(f, "{CSI}{n}T"),
        }
    }
}
