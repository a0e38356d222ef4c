use serde::{Deserialize, Serialize};

pub const SATURDAY: u8 = 5;
pub const SUNDAY: u8 = 6;

/// Closed set of contract types a roster can hire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerKind {
    /// Full-time: 9-hour shift with a 1-hour unpaid break, one day off.
    #[serde(rename = "FT")]
    Ft,
    /// Part-time: 4 contiguous hours, no break, one day off.
    #[serde(rename = "PT")]
    Pt,
    /// Weekend-only full-time: Saturday and Sunday, 9-hour shift.
    #[serde(rename = "WFT")]
    Wft,
    /// Weekend-only part-time.
    #[serde(rename = "WPT")]
    Wpt,
}

impl WorkerKind {
    pub fn is_part_time(self) -> bool {
        matches!(self, WorkerKind::Pt | WorkerKind::Wpt)
    }

    pub fn is_weekender(self) -> bool {
        matches!(self, WorkerKind::Wft | WorkerKind::Wpt)
    }

    /// Total shift length in hours, break included.
    pub fn shift_hours(self) -> u8 {
        match self {
            WorkerKind::Ft | WorkerKind::Wft => 9,
            WorkerKind::Pt | WorkerKind::Wpt => 4,
        }
    }
}

/// One hired worker in the output roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    /// 1-based position in the roster.
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: WorkerKind,
    pub shift_start: u8,
    /// `shift_start + shift_hours`; exceeds 24 for overnight shifts.
    pub shift_end: u8,
    pub day_off: Option<u8>,
    /// Clock hours (mod 24) the worker is productive, ascending. Entries
    /// numerically below `shift_start` belong to the next calendar day.
    pub productive_hours: Vec<u8>,
}

impl Worker {
    /// Calendar days the worker shows up on.
    pub fn active_days(&self) -> Vec<u8> {
        if self.kind.is_weekender() {
            vec![SATURDAY, SUNDAY]
        } else {
            (0..7).filter(|day| Some(*day) != self.day_off).collect()
        }
    }
}
