//! Two-hour birth time slots (时辰).
//!
//! A day is divided into 12 slots, each named after a branch. Slot 0 (子时)
//! straddles midnight: 23:00 through 00:59. Every later slot starts on an
//! odd hour, so slot `n` covers `[2n - 1, 2n + 1)` o'clock.
//!
//! The mapping is the single formula `floor((h + 1) / 2) mod 12`; labels and
//! slot boundaries are derived from it, never tabulated independently.

use chrono::{NaiveTime, Timelike};

use crate::branch::{ALL_BRANCHES, Branch};

/// Number of birth time slots in a day.
pub const TIME_SLOT_COUNT: u8 = 12;

/// Slot index (0-11) for a clock hour (0-23). Returns None for hours >= 24.
pub const fn time_slot_from_hour(hour: u32) -> Option<u8> {
    if hour >= 24 {
        return None;
    }
    Some((((hour + 1) / 2) % 12) as u8)
}

/// Slot index for a clock time. Minutes never move a time across a slot.
pub fn time_slot_from_time(time: NaiveTime) -> u8 {
    // hour() is always < 24
    (((time.hour() + 1) / 2) % 12) as u8
}

/// First clock hour covered by a slot (23 for slot 0).
pub const fn slot_start_hour(slot: u8) -> u32 {
    ((slot as u32 % 12) * 2 + 23) % 24
}

/// Branch naming a slot. Returns None if slot >= 12.
pub fn slot_branch(slot: u8) -> Option<Branch> {
    ALL_BRANCHES.get(slot as usize).copied()
}

/// Traditional slot name, e.g. `"申时"`. Returns None if slot >= 12.
pub fn slot_name(slot: u8) -> Option<String> {
    slot_branch(slot).map(|b| format!("{}时", b.name()))
}

/// Clock range covered by a slot, e.g. `"15:00–17:00"` for slot 8.
///
/// Returns None if slot >= 12.
pub fn slot_label(slot: u8) -> Option<String> {
    if slot >= TIME_SLOT_COUNT {
        return None;
    }
    let start = slot_start_hour(slot);
    let end = (start + 2) % 24;
    Some(format!("{start:02}:00–{end:02}:00"))
}
