//! Weekly picker roster optimization engine.
//!
//! Turns an hourly demand forecast for a seven-day week into a minimal
//! workforce roster: the engine enumerates admissible shift templates,
//! prunes the ones that cannot meet any demand, emits a mixed-integer
//! program, drives an external MIP solver through two phases (headcount
//! first, part-timer share second) and expands the integer solution into
//! concrete worker records plus an hourly coverage matrix.
//!
//! The solver itself is a black box behind [`backend::MipBackend`]: LP
//! text goes in, primal values come out. A CBC subprocess backend ships
//! in-tree; further backends load as dynamic extensions.

pub mod backend;
pub mod conf;
pub mod engine;
pub mod extensions;
pub mod lp;
pub mod model;

pub use backend::{MipBackend, MipSolution, MipStatus};
pub use engine::{solve, NoProgress, ProgressSink, SolveStage, TracingProgress};
pub use model::{
    required_matrix, RosterResult, SolveConfig, SolveRequest, SolveStatus, WeekMatrix, Worker,
    WorkerKind,
};
