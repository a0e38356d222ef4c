//! Stage 5, roster reifier: expand per-template integer counts into
//! concrete worker records and derive the hourly coverage matrix.

use crate::model::matrix::WeekMatrix;
use crate::model::template::ShiftTemplate;
use crate::model::worker::{Worker, WorkerKind};

#[derive(Debug)]
pub(crate) struct RosterBuild {
    pub workers: Vec<Worker>,
    pub coverage: WeekMatrix,
    pub ft_count: u32,
    pub pt_count: u32,
    pub wft_count: u32,
    pub wpt_count: u32,
}

/// Expand counts into workers with sequential 1-based ids. Templates are
/// visited in their canonical order so the same assignment always yields
/// the same roster.
pub(crate) fn reify(counts: &[(ShiftTemplate, u32)]) -> RosterBuild {
    let mut ordered: Vec<(ShiftTemplate, u32)> = counts.to_vec();
    ordered.sort_by_key(|(template, _)| *template);

    let mut workers = Vec::new();
    let mut ft_count = 0;
    let mut pt_count = 0;
    let mut wft_count = 0;
    let mut wpt_count = 0;

    for (template, count) in ordered {
        for _ in 0..count {
            workers.push(Worker {
                id: workers.len() as u32 + 1,
                kind: template.kind(),
                shift_start: template.start(),
                shift_end: template.end(),
                day_off: template.day_off(),
                productive_hours: template.productive_clock_hours(),
            });
            match template.kind() {
                WorkerKind::Ft => ft_count += 1,
                WorkerKind::Pt => pt_count += 1,
                WorkerKind::Wft => wft_count += 1,
                WorkerKind::Wpt => wpt_count += 1,
            }
        }
    }

    let coverage = coverage_from_workers(&workers);
    RosterBuild {
        workers,
        coverage,
        ft_count,
        pt_count,
        wft_count,
        wpt_count,
    }
}

/// Rebuild the coverage matrix from worker records alone. A productive
/// hour numerically below the shift start was worked after midnight and
/// counts toward the next calendar day.
pub fn coverage_from_workers(workers: &[Worker]) -> WeekMatrix {
    let mut coverage = WeekMatrix::zero();
    for worker in workers {
        for day in worker.active_days() {
            for &hour in &worker.productive_hours {
                if hour < worker.shift_start {
                    coverage.bump((day + 1) % 7, hour);
                } else {
                    coverage.bump(day, hour);
                }
            }
        }
    }
    coverage
}
