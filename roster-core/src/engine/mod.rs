//! The five-stage roster optimization pipeline.
//!
//! `solve` is a single-shot pure function over its inputs: catalogue →
//! prune → build → drive the external MIP solver → reify. Nothing is
//! cached between invocations; two concurrent calls only need
//! independent backends.

pub mod catalog;

mod build;
mod driver;
mod prune;
mod roster;

pub use roster::coverage_from_workers;

use std::time::Instant;
use tracing::{debug, info};

use crate::backend::MipBackend;
use crate::model::matrix::required_matrix;
use crate::model::request::{RosterResult, SolveRequest, SolveStatus};

/// Pipeline checkpoints, reported in order through [`ProgressSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStage {
    PhaseOne,
    PhaseTwo,
    BuildingRoster,
}

impl SolveStage {
    pub fn message(self) -> &'static str {
        match self {
            SolveStage::PhaseOne => "Phase 1: minimizing headcount",
            SolveStage::PhaseTwo => "Phase 2: maximizing part-timer share",
            SolveStage::BuildingRoster => "Building roster",
        }
    }
}

/// Observer for stage-boundary notifications. Notifications are strictly
/// ordered and monotonic with pipeline advancement.
pub trait ProgressSink {
    fn stage(&self, stage: SolveStage);
}

/// Discards all notifications.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn stage(&self, _stage: SolveStage) {}
}

/// Forwards each stage message to the `tracing` log.
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn stage(&self, stage: SolveStage) {
        info!("{}", stage.message());
    }
}

/// Solve one week: returns a fully populated roster on success, or a
/// zeroed result carrying `infeasible`/`error` diagnostics. Faults never
/// escape as Rust errors; the status field is the contract.
pub fn solve(
    request: &SolveRequest,
    backend: &dyn MipBackend,
    progress: &dyn ProgressSink,
) -> RosterResult {
    if let Err(err) = request.config.validate() {
        return RosterResult::zeroed(
            SolveStatus::Error,
            Some(format!("invalid solver input: {err:#}")),
            0,
        );
    }

    let required = required_matrix(&request.oph, request.config.productivity_rate);
    if required.is_zero() {
        info!("forecast has no demand; returning the empty roster");
        return RosterResult::zeroed(SolveStatus::Optimal, None, 0);
    }

    let templates = prune::active_templates(&request.oph, &request.config);
    debug!(active = templates.len(), "template universe pruned");

    let started = Instant::now();
    let outcome = driver::run_phases(
        &templates,
        &required,
        request.config.part_timer_cap(),
        request.config.weekender_cap(),
        backend,
        progress,
    );
    let solve_time_ms = started.elapsed().as_millis() as u64;

    match outcome {
        driver::DriverOutcome::Terminal { status, message } => {
            RosterResult::zeroed(status, Some(message), solve_time_ms)
        }
        driver::DriverOutcome::Solved(counts) => {
            progress.stage(SolveStage::BuildingRoster);
            let build = roster::reify(&counts);
            info!(
                workers = build.workers.len(),
                solve_time_ms, "roster assembled"
            );
            RosterResult {
                status: SolveStatus::Optimal,
                total_workers: build.workers.len() as u32,
                ft_count: build.ft_count,
                pt_count: build.pt_count,
                wft_count: build.wft_count,
                wpt_count: build.wpt_count,
                workers: build.workers,
                coverage: build.coverage,
                required,
                solve_time_ms,
                error_message: None,
            }
        }
    }
}
