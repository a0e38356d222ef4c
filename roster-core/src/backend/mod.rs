//! Solver coupling: the engine consumes any MIP solver that can read LP
//! text and report primal values.

pub mod cbc;

pub use cbc::CbcBackend;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::conf::config::RosterConfig;
use crate::extensions::loader::BackendRegistry;
use crate::lp::LpModel;

/// What a backend reported about one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MipStatus {
    Optimal,
    Infeasible,
    /// The backend stopped without proving optimality or infeasibility
    /// (time limit, numerical trouble, unparseable output).
    Unknown,
}

/// Primal assignment returned by a backend. Also the JSON payload of the
/// dynamic-extension protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MipSolution {
    pub status: MipStatus,
    #[serde(default)]
    pub primal: HashMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl MipSolution {
    /// Integer count for one variable; absent variables are 0 and numeric
    /// anomalies (negative, fractional) are rounded and clamped.
    pub fn count_for(&self, var: &str) -> u32 {
        self.primal
            .get(var)
            .map(|value| value.round().max(0.0) as u32)
            .unwrap_or(0)
    }

    /// Rounded total of all primal values.
    pub fn headcount(&self) -> u32 {
        self.primal.values().sum::<f64>().round().max(0.0) as u32
    }
}

/// Capability the engine needs from a MIP solver. Implementations must
/// treat every `solve` call as independent: no solver state may survive
/// from one call to the next; the two-phase driver relies on getting a
/// fresh solver each time.
pub trait MipBackend: Send + Sync {
    fn id(&self) -> &str;

    fn solve(&self, model: &LpModel) -> Result<MipSolution>;
}

/// Pick the configured backend: the built-in CBC subprocess driver, or a
/// loaded extension by id.
pub fn resolve_backend(
    config: &RosterConfig,
    registry: &BackendRegistry,
) -> Result<Arc<dyn MipBackend>> {
    let id = config.backend();
    if id == CbcBackend::ID {
        return Ok(Arc::new(CbcBackend::from_config(config)));
    }
    registry
        .resolve(&id)
        .map(|plugin| Arc::new(plugin) as Arc<dyn MipBackend>)
        .ok_or_else(|| anyhow!("unknown solver backend '{id}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_round_and_clamp() {
        let solution = MipSolution {
            status: MipStatus::Optimal,
            primal: HashMap::from([
                ("a".to_string(), 2.0000001),
                ("b".to_string(), 1.5),
                ("c".to_string(), -0.3),
            ]),
            reason: None,
        };
        assert_eq!(solution.count_for("a"), 2);
        assert_eq!(solution.count_for("b"), 2);
        assert_eq!(solution.count_for("c"), 0);
        assert_eq!(solution.count_for("missing"), 0);
        assert_eq!(solution.headcount(), 3);
    }

    #[test]
    fn solution_json_round_trip() {
        let solution = MipSolution {
            status: MipStatus::Infeasible,
            primal: HashMap::new(),
            reason: Some("no feasible point".to_string()),
        };
        let json = serde_json::to_string(&solution).expect("serialize");
        let back: MipSolution = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.status, MipStatus::Infeasible);
        assert_eq!(back.reason.as_deref(), Some("no feasible point"));
    }
}
