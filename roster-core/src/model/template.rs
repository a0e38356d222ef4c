use super::worker::{WorkerKind, SATURDAY, SUNDAY};

/// Earliest start for which a 9-hour shift crosses midnight.
pub const OVERNIGHT_START: u8 = 20;

/// One schedule class the optimizer can hire into. Workers hired under
/// the same template are interchangeable; the MIP assigns an integer
/// count to each. Every variant carries exactly the fields its contract
/// type needs.
///
/// The derived ordering (variant first, then start, day off, break) is
/// the canonical roster order used when expanding counts into workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShiftTemplate {
    Ft { start: u8, day_off: u8, break_offset: u8 },
    Pt { start: u8, day_off: u8 },
    Wft { start: u8, break_offset: u8 },
    Wpt { start: u8 },
}

impl ShiftTemplate {
    pub fn kind(&self) -> WorkerKind {
        match self {
            ShiftTemplate::Ft { .. } => WorkerKind::Ft,
            ShiftTemplate::Pt { .. } => WorkerKind::Pt,
            ShiftTemplate::Wft { .. } => WorkerKind::Wft,
            ShiftTemplate::Wpt { .. } => WorkerKind::Wpt,
        }
    }

    pub fn start(&self) -> u8 {
        match *self {
            ShiftTemplate::Ft { start, .. }
            | ShiftTemplate::Pt { start, .. }
            | ShiftTemplate::Wft { start, .. }
            | ShiftTemplate::Wpt { start } => start,
        }
    }

    pub fn day_off(&self) -> Option<u8> {
        match *self {
            ShiftTemplate::Ft { day_off, .. } | ShiftTemplate::Pt { day_off, .. } => Some(day_off),
            ShiftTemplate::Wft { .. } | ShiftTemplate::Wpt { .. } => None,
        }
    }

    pub fn break_offset(&self) -> Option<u8> {
        match *self {
            ShiftTemplate::Ft { break_offset, .. } | ShiftTemplate::Wft { break_offset, .. } => {
                Some(break_offset)
            }
            ShiftTemplate::Pt { .. } | ShiftTemplate::Wpt { .. } => None,
        }
    }

    /// End of shift in raw hours; exceeds 24 when the shift wraps past
    /// midnight (only possible for FT starting at [`OVERNIGHT_START`] or
    /// later).
    pub fn end(&self) -> u8 {
        self.start() + self.kind().shift_hours()
    }

    pub fn is_overnight(&self) -> bool {
        self.end() > 24
    }

    /// Raw productive hours of the shift, break excluded. Values >= 24
    /// denote hour `h - 24` on the calendar day after the shift day.
    pub fn raw_productive_hours(&self) -> Vec<u8> {
        let start = self.start();
        match self.break_offset() {
            Some(offset) => (start..self.end()).filter(|h| *h != start + offset).collect(),
            None => (start..self.end()).collect(),
        }
    }

    /// Productive hours as clock hours mod 24, ascending, in the form worker
    /// records carry. An entry below `start` is a wrapped hour.
    pub fn productive_clock_hours(&self) -> Vec<u8> {
        let mut hours: Vec<u8> = self
            .raw_productive_hours()
            .into_iter()
            .map(|h| h % 24)
            .collect();
        hours.sort_unstable();
        hours
    }

    /// Whether a shift under this template is worked on `day`.
    pub fn works_on(&self, day: u8) -> bool {
        match self.day_off() {
            Some(day_off) => day != day_off,
            None => day == SATURDAY || day == SUNDAY,
        }
    }

    /// Whether this template puts a productive worker into slot
    /// `(day, hour)`: either the shift day is `day` itself, or the shift
    /// started the previous day and wraps past midnight into `day`.
    pub fn covers_slot(&self, day: u8, hour: u8) -> bool {
        let raw = self.raw_productive_hours();
        if self.works_on(day) && raw.contains(&hour) {
            return true;
        }
        let prev = (day + 6) % 7;
        self.is_overnight() && self.works_on(prev) && raw.contains(&(hour + 24))
    }

    /// MIP variable name; optional components appear exactly when the
    /// template type carries them.
    pub fn var_name(&self) -> String {
        match *self {
            ShiftTemplate::Ft { start, day_off, break_offset } => {
                format!("xFT_{start}_{day_off}_{break_offset}")
            }
            ShiftTemplate::Pt { start, day_off } => format!("xPT_{start}_{day_off}"),
            ShiftTemplate::Wft { start, break_offset } => format!("xWFT_{start}_{break_offset}"),
            ShiftTemplate::Wpt { start } => format!("xWPT_{start}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_names_carry_only_required_components() {
        let ft = ShiftTemplate::Ft { start: 9, day_off: 2, break_offset: 4 };
        let pt = ShiftTemplate::Pt { start: 13, day_off: 0 };
        let wft = ShiftTemplate::Wft { start: 8, break_offset: 3 };
        let wpt = ShiftTemplate::Wpt { start: 16 };
        assert_eq!(ft.var_name(), "xFT_9_2_4");
        assert_eq!(pt.var_name(), "xPT_13_0");
        assert_eq!(wft.var_name(), "xWFT_8_3");
        assert_eq!(wpt.var_name(), "xWPT_16");
    }

    #[test]
    fn productive_hours_skip_the_break() {
        let ft = ShiftTemplate::Ft { start: 9, day_off: 0, break_offset: 3 };
        assert_eq!(ft.raw_productive_hours(), vec![9, 10, 11, 13, 14, 15, 16, 17]);
        assert_eq!(ft.productive_clock_hours(), vec![9, 10, 11, 13, 14, 15, 16, 17]);

        let pt = ShiftTemplate::Pt { start: 20, day_off: 4 };
        assert_eq!(pt.raw_productive_hours(), vec![20, 21, 22, 23]);
    }

    #[test]
    fn overnight_hours_wrap_mod_24() {
        let ft = ShiftTemplate::Ft { start: 22, day_off: 0, break_offset: 3 };
        assert!(ft.is_overnight());
        assert_eq!(ft.end(), 31);
        assert_eq!(ft.raw_productive_hours(), vec![22, 23, 24, 26, 27, 28, 29, 30]);
        assert_eq!(ft.productive_clock_hours(), vec![0, 2, 3, 4, 5, 6, 22, 23]);
    }

    #[test]
    fn covers_same_day_slots_off_its_day_off() {
        let pt = ShiftTemplate::Pt { start: 10, day_off: 1 };
        assert!(pt.covers_slot(0, 10));
        assert!(pt.covers_slot(0, 13));
        assert!(!pt.covers_slot(0, 14));
        assert!(!pt.covers_slot(1, 10), "day off must not be covered");
    }

    #[test]
    fn overnight_shift_covers_the_next_morning() {
        // Sunday 22:00 shift reaches Monday 02:00 via the wrap.
        let ft = ShiftTemplate::Ft { start: 22, day_off: 0, break_offset: 3 };
        assert!(ft.covers_slot(6, 22));
        assert!(ft.covers_slot(0, 2));
        // Hour 1 (= raw 25) is the break for offset 3.
        assert!(!ft.covers_slot(0, 1));
    }

    #[test]
    fn weekenders_cover_weekend_only() {
        let wft = ShiftTemplate::Wft { start: 8, break_offset: 4 };
        assert!(wft.covers_slot(SATURDAY, 9));
        assert!(wft.covers_slot(SUNDAY, 16));
        assert!(!wft.covers_slot(0, 9));
        // Hour 12 (= 8 + 4) is the break.
        assert!(!wft.covers_slot(SATURDAY, 12));
    }
}
