//! Stage 2, variable pruner: drop every template that cannot put a
//! productive hour onto a positive-demand slot. Such variables would be
//! 0 in any optimum anyway, and dropping them keeps the model text small.

use super::catalog;
use crate::model::matrix::WeekMatrix;
use crate::model::request::SolveConfig;
use crate::model::template::ShiftTemplate;

/// Templates worth a variable for this forecast. Cap boundaries are
/// applied here as well: a worker type capped at 0% is excluded from the
/// whole model rather than pinned to 0 by per-variable rows.
pub(crate) fn active_templates(demand: &WeekMatrix, config: &SolveConfig) -> Vec<ShiftTemplate> {
    let cap_pt = config.part_timer_cap();
    let cap_wk = config.weekender_cap();
    let allow = config.allow_weekend_day_off;

    let mut active = Vec::new();
    active.extend(
        catalog::full_time(allow)
            .into_iter()
            .filter(|t| reaches_demand(t, demand)),
    );
    if cap_pt > 0 {
        active.extend(
            catalog::part_time(allow)
                .into_iter()
                .filter(|t| reaches_demand(t, demand)),
        );
    }
    if cap_wk > 0 {
        active.extend(
            catalog::weekend_full_time()
                .into_iter()
                .filter(|t| reaches_demand(t, demand)),
        );
    }
    if cap_pt > 0 && cap_wk > 0 {
        active.extend(
            catalog::weekend_part_time()
                .into_iter()
                .filter(|t| reaches_demand(t, demand)),
        );
    }
    active
}

/// True when at least one productive hour of the template lands on a slot
/// with positive demand. Wrap hours probe the day after the shift day;
/// that day is deliberately not checked against the day off, since the
/// shift itself belongs to the previous day.
fn reaches_demand(template: &ShiftTemplate, demand: &WeekMatrix) -> bool {
    for day in 0..7u8 {
        if !template.works_on(day) {
            continue;
        }
        for raw in template.raw_productive_hours() {
            let hit = if raw < 24 {
                demand.get(day, raw) > 0
            } else {
                demand.get((day + 1) % 7, raw - 24) > 0
            };
            if hit {
                return true;
            }
        }
    }
    false
}
