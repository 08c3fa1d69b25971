//! LinnStrument LED control-change commands
//!
//! Lighting a pad takes three CCs in a fixed order: CC20 selects the column,
//! CC21 the row, and CC22 applies the color to the selected pad. CC23 stores
//! the current custom LED layer in one of the three memory slots.

use crate::types::{LinnColor, PadCoordinate, SaveSlot};

/// Column of the pad to change (control key column is 0, play columns 1-25)
pub const CC_COLUMN: u8 = 20;
/// Row of the pad to change (bottom row is 0, top is 7)
pub const CC_ROW: u8 = 21;
/// Color to apply to the selected pad
pub const CC_COLOR: u8 = 22;
/// Save the custom light pattern to a slot
pub const CC_SAVE: u8 = 23;
/// Clear the custom light pattern (not sent by the default run)
pub const CC_CLEAR: u8 = 24;

/// A single LED command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinnCommand {
    SelectColumn(u8),
    SelectRow(u8),
    SetColor(LinnColor),
    Save(SaveSlot),
}

impl LinnCommand {
    /// CC number for this command
    pub fn controller(&self) -> u8 {
        match self {
            LinnCommand::SelectColumn(_) => CC_COLUMN,
            LinnCommand::SelectRow(_) => CC_ROW,
            LinnCommand::SetColor(_) => CC_COLOR,
            LinnCommand::Save(_) => CC_SAVE,
        }
    }

    /// CC value for this command
    pub fn value(&self) -> u8 {
        match self {
            LinnCommand::SelectColumn(column) => *column,
            LinnCommand::SelectRow(row) => *row,
            LinnCommand::SetColor(color) => color.code(),
            LinnCommand::Save(slot) => slot.code(),
        }
    }
}

/// The column/row/color triple that lights one pad
///
/// The firmware latches column and row, so the order must not change.
pub fn pad_commands(pad: PadCoordinate, color: LinnColor) -> [LinnCommand; 3] {
    [
        LinnCommand::SelectColumn(pad.column),
        LinnCommand::SelectRow(pad.row),
        LinnCommand::SetColor(color),
    ]
}

/// Encode a raw MIDI control change
pub fn control_change_bytes(channel: u8, controller: u8, value: u8) -> [u8; 3] {
    [0xB0 | (channel & 0x0F), controller & 0x7F, value & 0x7F]
}
