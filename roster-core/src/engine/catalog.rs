//! Stage 1, shift catalogue: the finite universe of admissible shift
//! templates, before any demand knowledge is applied.
//!
//! No shift may start or end inside 00:00–04:59 (ending at exactly 24:00
//! is allowed), which fixes the start sets below. Weekend-only shifts
//! never cross midnight so they cannot bleed into Monday.

use crate::model::template::ShiftTemplate;

/// Admissible full-time starts: 16–19 would end between 01:00 and 04:00.
pub const FT_STARTS: [u8; 15] = [5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 20, 21, 22, 23];

/// Admissible part-time starts; a 4-hour shift starting at 20 ends at
/// exactly 24:00.
pub const PT_STARTS: [u8; 16] = [5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20];

/// Weekend full-time starts; day shifts only.
pub const WFT_STARTS: [u8; 11] = [5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// Hour offsets within a 9-hour shift where the unpaid break may sit.
pub const FT_BREAK_OFFSETS: [u8; 2] = [3, 4];

const WEEKDAY_DAY_OFFS: [u8; 5] = [0, 1, 2, 3, 4];
const ALL_DAY_OFFS: [u8; 7] = [0, 1, 2, 3, 4, 5, 6];

/// Days a weekday worker may take off.
pub fn day_off_choices(allow_weekend_day_off: bool) -> &'static [u8] {
    if allow_weekend_day_off {
        &ALL_DAY_OFFS
    } else {
        &WEEKDAY_DAY_OFFS
    }
}

pub fn full_time(allow_weekend_day_off: bool) -> Vec<ShiftTemplate> {
    let mut templates = Vec::new();
    for &start in &FT_STARTS {
        for &day_off in day_off_choices(allow_weekend_day_off) {
            for &break_offset in &FT_BREAK_OFFSETS {
                templates.push(ShiftTemplate::Ft { start, day_off, break_offset });
            }
        }
    }
    templates
}

pub fn part_time(allow_weekend_day_off: bool) -> Vec<ShiftTemplate> {
    let mut templates = Vec::new();
    for &start in &PT_STARTS {
        for &day_off in day_off_choices(allow_weekend_day_off) {
            templates.push(ShiftTemplate::Pt { start, day_off });
        }
    }
    templates
}

pub fn weekend_full_time() -> Vec<ShiftTemplate> {
    let mut templates = Vec::new();
    for &start in &WFT_STARTS {
        for &break_offset in &FT_BREAK_OFFSETS {
            templates.push(ShiftTemplate::Wft { start, break_offset });
        }
    }
    templates
}

pub fn weekend_part_time() -> Vec<ShiftTemplate> {
    PT_STARTS
        .iter()
        .map(|&start| ShiftTemplate::Wpt { start })
        .collect()
}
