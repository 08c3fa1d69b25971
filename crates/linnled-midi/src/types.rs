//! Closed value types for the LinnStrument LED protocol
//!
//! The device command set is fixed by the firmware, so colors, save slots
//! and hardware sizes are plain enums with their wire codes attached.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Number of physical rows on every LinnStrument model (row 0 = bottom)
pub const ROW_COUNT: u8 = 8;

/// LED color as understood by the LinnStrument (CC22 value)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LinnColor {
    Default = 0,
    Red = 1,
    Yellow = 2,
    Green = 3,
    Cyan = 4,
    Blue = 5,
    Magenta = 6,
    Off = 7,
    White = 8,
    Orange = 9,
    Lime = 10,
    Pink = 11,
}

impl LinnColor {
    /// Every color, ordered by wire code
    pub const ALL: [LinnColor; 12] = [
        LinnColor::Default,
        LinnColor::Red,
        LinnColor::Yellow,
        LinnColor::Green,
        LinnColor::Cyan,
        LinnColor::Blue,
        LinnColor::Magenta,
        LinnColor::Off,
        LinnColor::White,
        LinnColor::Orange,
        LinnColor::Lime,
        LinnColor::Pink,
    ];

    /// Wire code (0-11)
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a color by its wire code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Single character used when logging a layout grid
    pub fn glyph(self) -> char {
        match self {
            LinnColor::Default => '*',
            LinnColor::Red => 'R',
            LinnColor::Yellow => 'Y',
            LinnColor::Green => 'G',
            LinnColor::Cyan => 'C',
            LinnColor::Blue => 'B',
            LinnColor::Magenta => 'M',
            LinnColor::Off => '.',
            LinnColor::White => 'W',
            LinnColor::Orange => 'O',
            LinnColor::Lime => 'L',
            LinnColor::Pink => 'P',
        }
    }
}

impl fmt::Display for LinnColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinnColor::Default => "default",
            LinnColor::Red => "red",
            LinnColor::Yellow => "yellow",
            LinnColor::Green => "green",
            LinnColor::Cyan => "cyan",
            LinnColor::Blue => "blue",
            LinnColor::Magenta => "magenta",
            LinnColor::Off => "off",
            LinnColor::White => "white",
            LinnColor::Orange => "orange",
            LinnColor::Lime => "lime",
            LinnColor::Pink => "pink",
        };
        f.write_str(name)
    }
}

/// Custom light pattern memory slot (CC23 value)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SaveSlot {
    A = 0,
    #[default]
    ASharp = 1,
    B = 2,
}

impl SaveSlot {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SaveSlot::A),
            1 => Some(SaveSlot::ASharp),
            2 => Some(SaveSlot::B),
            _ => None,
        }
    }
}

impl fmt::Display for SaveSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveSlot::A => f.write_str("A"),
            SaveSlot::ASharp => f.write_str("A#"),
            SaveSlot::B => f.write_str("B"),
        }
    }
}

/// LinnStrument hardware size
///
/// Column 0 holds the control keys on both models; the play surface
/// starts at column 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceVariant {
    /// Full-size LinnStrument (200 pads, play columns 1-25)
    #[default]
    Pads200,
    /// LinnStrument 128 (play columns 1-16)
    Pads128,
}

impl DeviceVariant {
    /// Rightmost play column
    pub fn max_column(self) -> u8 {
        match self {
            DeviceVariant::Pads200 => 25,
            DeviceVariant::Pads128 => 16,
        }
    }

    /// Play columns, left to right
    pub fn columns(self) -> RangeInclusive<u8> {
        1..=self.max_column()
    }

    /// Physical rows, bottom to top
    pub fn rows(self) -> std::ops::Range<u8> {
        0..ROW_COUNT
    }

    /// Number of play-surface pads
    pub fn pad_count(self) -> usize {
        self.max_column() as usize * ROW_COUNT as usize
    }
}

/// A play-surface pad (column 1.., row 0 = bottom)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PadCoordinate {
    pub column: u8,
    pub row: u8,
}

impl PadCoordinate {
    pub fn new(column: u8, row: u8) -> Self {
        Self { column, row }
    }
}
