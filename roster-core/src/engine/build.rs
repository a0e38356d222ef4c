//! Stage 3, model builder: turn the active templates plus the required
//! matrix into the LP for one solve phase.

use crate::lp::{Constraint, LpModel, Sense};
use crate::model::matrix::WeekMatrix;
use crate::model::template::ShiftTemplate;

/// A positive-required slot no active template can reach. The coverage
/// row for it would be empty, so the model is infeasible before the
/// solver ever runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotGap {
    pub day: u8,
    pub hour: u8,
}

/// Phase 1: minimize total headcount. All objective coefficients are 1;
/// the reference backend corrupts itself on anything else.
pub(crate) fn phase_one(
    templates: &[ShiftTemplate],
    required: &WeekMatrix,
    cap_pt: u32,
    cap_wk: u32,
) -> Result<LpModel, SlotGap> {
    let variables = var_names(templates);
    let mut constraints = coverage_rows(templates, required)?;
    constraints.extend(cap_rows(templates, cap_pt, cap_wk));
    Ok(LpModel {
        objective: variables.clone(),
        constraints,
        variables,
    })
}

/// Phase 2: at the phase-1 headcount, minimize full-timers (FT + WFT) so
/// the part-timer share is maximal. Part-time variables stay out of the
/// objective entirely.
pub(crate) fn phase_two(
    templates: &[ShiftTemplate],
    required: &WeekMatrix,
    cap_pt: u32,
    cap_wk: u32,
    headcount: u32,
) -> Result<LpModel, SlotGap> {
    let variables = var_names(templates);
    let objective: Vec<String> = templates
        .iter()
        .filter(|t| !t.kind().is_part_time())
        .map(ShiftTemplate::var_name)
        .collect();

    let mut constraints = coverage_rows(templates, required)?;
    constraints.extend(cap_rows(templates, cap_pt, cap_wk));
    constraints.push(Constraint {
        name: "headcount".to_string(),
        terms: variables.iter().map(|v| (1, v.clone())).collect(),
        sense: Sense::Le,
        rhs: i64::from(headcount),
    });

    Ok(LpModel {
        objective,
        constraints,
        variables,
    })
}

fn var_names(templates: &[ShiftTemplate]) -> Vec<String> {
    templates.iter().map(ShiftTemplate::var_name).collect()
}

/// One `>=` row per positive-required slot over the templates covering it.
fn coverage_rows(
    templates: &[ShiftTemplate],
    required: &WeekMatrix,
) -> Result<Vec<Constraint>, SlotGap> {
    let mut rows = Vec::new();
    for (day, hour, needed) in required.cells() {
        if needed == 0 {
            continue;
        }
        let terms: Vec<(i64, String)> = templates
            .iter()
            .filter(|t| t.covers_slot(day, hour))
            .map(|t| (1, t.var_name()))
            .collect();
        if terms.is_empty() {
            return Err(SlotGap { day, hour });
        }
        rows.push(Constraint {
            name: format!("cov_{day}_{hour}"),
            terms,
            sense: Sense::Ge,
            rhs: i64::from(needed),
        });
    }
    Ok(rows)
}

/// Workforce-mix rows, emitted only when a cap is strictly between 0 and
/// 100 and both sides of the trade actually have variables. Coefficients
/// are scaled by 100 to stay integral.
fn cap_rows(templates: &[ShiftTemplate], cap_pt: u32, cap_wk: u32) -> Vec<Constraint> {
    let mut rows = Vec::new();

    if cap_pt > 0 && cap_pt < 100 {
        let part: Vec<&ShiftTemplate> =
            templates.iter().filter(|t| t.kind().is_part_time()).collect();
        let full: Vec<&ShiftTemplate> =
            templates.iter().filter(|t| !t.kind().is_part_time()).collect();
        if !part.is_empty() && !full.is_empty() {
            rows.push(mix_row("cap_pt", cap_pt, &part, &full));
        }
    }

    if cap_wk > 0 && cap_wk < 100 {
        let weekend: Vec<&ShiftTemplate> =
            templates.iter().filter(|t| t.kind().is_weekender()).collect();
        let weekday: Vec<&ShiftTemplate> =
            templates.iter().filter(|t| !t.kind().is_weekender()).collect();
        if !weekend.is_empty() && !weekday.is_empty() {
            rows.push(mix_row("cap_wk", cap_wk, &weekend, &weekday));
        }
    }

    rows
}

/// `(100 - cap)·Σ capped - cap·Σ rest <= 0`, i.e. capped / total <= cap%.
fn mix_row(name: &str, cap: u32, capped: &[&ShiftTemplate], rest: &[&ShiftTemplate]) -> Constraint {
    let mut terms: Vec<(i64, String)> = capped
        .iter()
        .map(|t| (i64::from(100 - cap), t.var_name()))
        .collect();
    terms.extend(rest.iter().map(|t| (-i64::from(cap), t.var_name())));
    Constraint {
        name: name.to_string(),
        terms,
        sense: Sense::Le,
        rhs: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike_required() -> WeekMatrix {
        let mut required = WeekMatrix::zero();
        required.set(0, 10, 2);
        required
    }

    fn small_universe() -> Vec<ShiftTemplate> {
        vec![
            ShiftTemplate::Ft { start: 9, day_off: 1, break_offset: 3 },
            ShiftTemplate::Ft { start: 9, day_off: 1, break_offset: 4 },
            ShiftTemplate::Pt { start: 10, day_off: 2 },
            ShiftTemplate::Wpt { start: 10 },
        ]
    }

    #[test]
    fn phase_one_objective_lists_every_variable_once() {
        let model = phase_one(&small_universe(), &spike_required(), 50, 30).expect("model");
        assert_eq!(model.objective, model.variables);
        assert_eq!(model.variables.len(), 4);
    }

    #[test]
    fn coverage_row_collects_exactly_the_covering_templates() {
        let model = phase_one(&small_universe(), &spike_required(), 50, 30).expect("model");
        let row = model
            .constraints
            .iter()
            .find(|c| c.name == "cov_0_10")
            .expect("coverage row");
        let vars: Vec<&str> = row.terms.iter().map(|(_, v)| v.as_str()).collect();
        // The WPT template covers Saturday/Sunday 10:00, not Monday.
        assert_eq!(vars, vec!["xFT_9_1_3", "xFT_9_1_4", "xPT_10_2"]);
        assert_eq!(row.rhs, 2);
        assert_eq!(row.sense, Sense::Ge);
        assert!(row.terms.iter().all(|(coeff, _)| *coeff == 1));
    }

    #[test]
    fn uncoverable_slot_is_reported_as_a_gap() {
        let pt_only = vec![ShiftTemplate::Pt { start: 10, day_off: 2 }];
        let mut required = WeekMatrix::zero();
        required.set(0, 3, 1); // part-time shifts can never reach 03:00
        let gap = coverage_rows(&pt_only, &required).expect_err("gap");
        assert_eq!(gap, SlotGap { day: 0, hour: 3 });
    }

    #[test]
    fn cap_rows_scale_by_100_and_skip_boundaries() {
        let templates = small_universe();

        let model = phase_one(&templates, &spike_required(), 30, 100).expect("model");
        let cap = model
            .constraints
            .iter()
            .find(|c| c.name == "cap_pt")
            .expect("cap row");
        assert_eq!(cap.sense, Sense::Le);
        assert_eq!(cap.rhs, 0);
        for (coeff, var) in &cap.terms {
            if var.starts_with("xPT") || var.starts_with("xWPT") {
                assert_eq!(*coeff, 70);
            } else {
                assert_eq!(*coeff, -30);
            }
        }
        // Weekender cap of 100 is not binding.
        assert!(model.constraints.iter().all(|c| c.name != "cap_wk"));

        let open = phase_one(&templates, &spike_required(), 100, 100).expect("model");
        assert!(open.constraints.iter().all(|c| !c.name.starts_with("cap_")));
    }

    #[test]
    fn phase_two_minimizes_full_timers_under_a_headcount_cap() {
        let templates = small_universe();
        let model = phase_two(&templates, &spike_required(), 50, 30, 2).expect("model");

        assert_eq!(model.objective, vec!["xFT_9_1_3", "xFT_9_1_4"]);
        let head = model
            .constraints
            .iter()
            .find(|c| c.name == "headcount")
            .expect("headcount row");
        assert_eq!(head.terms.len(), templates.len());
        assert_eq!(head.sense, Sense::Le);
        assert_eq!(head.rhs, 2);
    }
}
