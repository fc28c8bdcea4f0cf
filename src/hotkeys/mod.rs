//! Global hotkey surface.
//!
//! F1/F2/F3 read-and-paste one tier, F4 runs the optimizer,
//! Ctrl+Alt+F1/F2/F3 calibrate, Ctrl+Shift+P dumps all prices,
//! Ctrl+Shift+M prints the pointer position, Esc exits.

pub mod listener;

pub use listener::spawn_listener;

use crate::config::LotTier;

/// One recognized hotkey press, ready for dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Read one tier's price, undercut it, paste it.
    ReadPaste(LotTier),
    /// Read all tiers, pick the best unit price, undercut, paste.
    Optimize,
    /// Record the capture box for one tier from the pointer position.
    Calibrate(LotTier),
    /// Log what all three regions currently read (debug).
    DumpPrices,
    /// Log the pointer position (debug aid for calibration).
    ShowPointer,
    /// Terminate the helper.
    Quit,
}

pub(crate) const ID_READ_1: i32 = 1;
pub(crate) const ID_READ_10: i32 = 2;
pub(crate) const ID_READ_100: i32 = 3;
pub(crate) const ID_OPTIMIZE: i32 = 4;
pub(crate) const ID_CAL_1: i32 = 5;
pub(crate) const ID_CAL_10: i32 = 6;
pub(crate) const ID_CAL_100: i32 = 7;
pub(crate) const ID_DUMP_PRICES: i32 = 8;
pub(crate) const ID_SHOW_POINTER: i32 = 9;
pub(crate) const ID_QUIT: i32 = 10;

/// Maps a registered hotkey id to its action. Unknown ids are ignored by
/// the listener.
pub(crate) fn action_for_id(id: i32) -> Option<HotkeyAction> {
    match id {
        ID_READ_1 => Some(HotkeyAction::ReadPaste(LotTier::One)),
        ID_READ_10 => Some(HotkeyAction::ReadPaste(LotTier::Ten)),
        ID_READ_100 => Some(HotkeyAction::ReadPaste(LotTier::Hundred)),
        ID_OPTIMIZE => Some(HotkeyAction::Optimize),
        ID_CAL_1 => Some(HotkeyAction::Calibrate(LotTier::One)),
        ID_CAL_10 => Some(HotkeyAction::Calibrate(LotTier::Ten)),
        ID_CAL_100 => Some(HotkeyAction::Calibrate(LotTier::Hundred)),
        ID_DUMP_PRICES => Some(HotkeyAction::DumpPrices),
        ID_SHOW_POINTER => Some(HotkeyAction::ShowPointer),
        ID_QUIT => Some(HotkeyAction::Quit),
        _ => None,
    }
}
