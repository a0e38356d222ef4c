use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use super::matrix::WeekMatrix;
use super::worker::Worker;

/// Per-request solver parameters. Field names follow the JSON contract
/// of the demand-ingestion side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveConfig {
    /// Orders one worker picks per productive hour.
    pub productivity_rate: u32,
    /// Maximum share of the workforce that may be part-time (PT + WPT),
    /// in percent. Fractional values are rounded half-up.
    pub part_timer_cap_pct: f64,
    /// Maximum share that may be weekenders (WFT + WPT), in percent.
    pub weekender_cap_pct: f64,
    /// When set, weekday workers may also take Saturday or Sunday off.
    #[serde(default)]
    pub allow_weekend_day_off: bool,
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

impl SolveConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.productivity_rate >= 1,
            "productivityRate must be a positive integer"
        );
        for (name, value) in [
            ("partTimerCapPct", self.part_timer_cap_pct),
            ("weekenderCapPct", self.weekender_cap_pct),
        ] {
            ensure!(value.is_finite(), "{name} must be a finite number");
            let rounded = round_half_up(value);
            ensure!(
                (0..=100).contains(&rounded),
                "{name} must lie in [0, 100], got {value}"
            );
        }
        Ok(())
    }

    /// Part-timer cap as an integer percentage.
    pub fn part_timer_cap(&self) -> u32 {
        round_half_up(self.part_timer_cap_pct).clamp(0, 100) as u32
    }

    /// Weekender cap as an integer percentage.
    pub fn weekender_cap(&self) -> u32 {
        round_half_up(self.weekender_cap_pct).clamp(0, 100) as u32
    }
}

/// Complete input to one engine run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    /// Orders-per-hour forecast, 7×24.
    pub oph: WeekMatrix,
    pub config: SolveConfig,
}

/// Terminal outcome of an engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Error,
}

/// Everything the presentation side needs about one solved week.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResult {
    pub status: SolveStatus,
    pub workers: Vec<Worker>,
    pub total_workers: u32,
    pub ft_count: u32,
    pub pt_count: u32,
    pub wft_count: u32,
    pub wpt_count: u32,
    pub coverage: WeekMatrix,
    pub required: WeekMatrix,
    pub solve_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RosterResult {
    /// A result with no workers and all-zero matrices; carries failure
    /// diagnostics, or stands alone as the optimal roster for an empty
    /// forecast.
    pub fn zeroed(status: SolveStatus, error_message: Option<String>, solve_time_ms: u64) -> Self {
        Self {
            status,
            workers: Vec::new(),
            total_workers: 0,
            ft_count: 0,
            pt_count: 0,
            wft_count: 0,
            wpt_count: 0,
            coverage: WeekMatrix::zero(),
            required: WeekMatrix::zero(),
            solve_time_ms,
            error_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rate: u32, pt: f64, wk: f64) -> SolveConfig {
        SolveConfig {
            productivity_rate: rate,
            part_timer_cap_pct: pt,
            weekender_cap_pct: wk,
            allow_weekend_day_off: false,
        }
    }

    #[test]
    fn caps_round_half_up() {
        let cfg = config(12, 29.5, 30.4);
        assert_eq!(cfg.part_timer_cap(), 30);
        assert_eq!(cfg.weekender_cap(), 30);
        cfg.validate().expect("valid config");
    }

    #[test]
    fn rejects_out_of_range_input() {
        assert!(config(0, 50.0, 30.0).validate().is_err());
        assert!(config(12, 101.0, 30.0).validate().is_err());
        assert!(config(12, -3.0, 30.0).validate().is_err());
        assert!(config(12, f64::NAN, 30.0).validate().is_err());
    }

    #[test]
    fn allow_weekend_day_off_defaults_to_false() {
        let cfg: SolveConfig = serde_json::from_str(
            r#"{"productivityRate":12,"partTimerCapPct":50,"weekenderCapPct":30}"#,
        )
        .expect("deserialize");
        assert!(!cfg.allow_weekend_day_off);
    }

    #[test]
    fn error_message_is_omitted_when_absent() {
        let result = RosterResult::zeroed(SolveStatus::Optimal, None, 3);
        let json = serde_json::to_string(&result).expect("serialize");
        assert!(!json.contains("errorMessage"));
        assert!(json.contains("\"status\":\"optimal\""));
    }
}
