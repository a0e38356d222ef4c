//! Stage 4, solver driver: run phase 1 (headcount), then phase 2
//! (part-timer share) under the phase-1 headcount cap, and hand the
//! chosen primal assignment back as per-template counts.

use tracing::{debug, warn};

use super::build;
use super::{ProgressSink, SolveStage};
use crate::backend::{MipBackend, MipStatus};
use crate::model::matrix::WeekMatrix;
use crate::model::request::SolveStatus;
use crate::model::template::ShiftTemplate;

#[derive(Debug)]
pub(crate) enum DriverOutcome {
    Solved(Vec<(ShiftTemplate, u32)>),
    Terminal { status: SolveStatus, message: String },
}

pub(crate) fn run_phases(
    templates: &[ShiftTemplate],
    required: &WeekMatrix,
    cap_pt: u32,
    cap_wk: u32,
    backend: &dyn MipBackend,
    progress: &dyn ProgressSink,
) -> DriverOutcome {
    progress.stage(SolveStage::PhaseOne);
    let phase_one = match build::phase_one(templates, required, cap_pt, cap_wk) {
        Ok(model) => model,
        Err(gap) => {
            return DriverOutcome::Terminal {
                status: SolveStatus::Infeasible,
                message: format!(
                    "phase 1: no admissible shift can cover day {} hour {}",
                    gap.day, gap.hour
                ),
            }
        }
    };
    debug!(
        backend = backend.id(),
        variables = phase_one.variables.len(),
        rows = phase_one.constraints.len(),
        "phase 1 model built"
    );

    let first = match backend.solve(&phase_one) {
        Ok(solution) => solution,
        Err(err) => {
            return DriverOutcome::Terminal {
                status: SolveStatus::Error,
                message: format!("phase 1: solver backend failed: {err:#}"),
            }
        }
    };
    match first.status {
        MipStatus::Optimal => {}
        MipStatus::Infeasible => {
            return DriverOutcome::Terminal {
                status: SolveStatus::Infeasible,
                message: "phase 1: demand cannot be met under the configured caps".to_string(),
            }
        }
        MipStatus::Unknown => {
            let reason = first.reason.as_deref().unwrap_or("no reason reported");
            return DriverOutcome::Terminal {
                status: SolveStatus::Error,
                message: format!("phase 1: solver stopped without an optimum: {reason}"),
            }
        }
    }

    let headcount = first.headcount();
    let mut chosen = first;

    // Phase 2 only makes sense when part-timers are allowed at all and
    // the active set has both sides of the trade. A failed phase 2 is
    // never fatal; the phase-1 assignment is already headcount-optimal.
    if cap_pt > 0 && headcount > 0 && has_mix_to_trade(templates) {
        progress.stage(SolveStage::PhaseTwo);
        if let Ok(model) = build::phase_two(templates, required, cap_pt, cap_wk, headcount) {
            match backend.solve(&model) {
                Ok(second) if second.status == MipStatus::Optimal => chosen = second,
                Ok(second) => {
                    warn!(status = ?second.status, "phase 2 ended without an optimum; keeping phase 1 assignment");
                }
                Err(err) => {
                    warn!("phase 2 solver failed; keeping phase 1 assignment: {err:#}");
                }
            }
        }
    }

    let counts = templates
        .iter()
        .filter_map(|template| {
            let count = chosen.count_for(&template.var_name());
            (count > 0).then_some((*template, count))
        })
        .collect();
    DriverOutcome::Solved(counts)
}

fn has_mix_to_trade(templates: &[ShiftTemplate]) -> bool {
    let part = templates.iter().any(|t| t.kind().is_part_time());
    let full = templates.iter().any(|t| !t.kind().is_part_time());
    part && full
}
