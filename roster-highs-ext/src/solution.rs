use anyhow::{anyhow, Result};
use roster_core::backend::{MipSolution, MipStatus};
use std::collections::HashMap;

/// Parse a HiGHS solution file (`--solution_file`). The status word
/// follows the `Model status` header; primal values are `name value`
/// pairs inside the `# Columns` section.
pub fn parse_highs_solution(text: &str) -> Result<MipSolution> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let status_line = lines
        .iter()
        .position(|line| *line == "Model status")
        .and_then(|at| lines[at + 1..].iter().find(|line| !line.is_empty()))
        .ok_or_else(|| anyhow!("highs solution file carries no model status"))?;
    let status = match *status_line {
        "Optimal" => MipStatus::Optimal,
        "Infeasible" => MipStatus::Infeasible,
        _ => MipStatus::Unknown,
    };

    let mut primal = HashMap::new();
    if let Some(at) = lines.iter().position(|line| line.starts_with("# Columns")) {
        for line in &lines[at + 1..] {
            if line.starts_with('#') {
                break;
            }
            let mut fields = line.split_whitespace();
            let (Some(name), Some(value)) = (fields.next(), fields.next()) else {
                continue;
            };
            let Ok(value) = value.parse::<f64>() else {
                continue;
            };
            primal.insert(name.to_string(), value);
        }
    }

    Ok(MipSolution {
        status,
        primal,
        reason: (status != MipStatus::Optimal).then(|| status_line.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_an_optimal_solution_file() {
        let text = "\
Model status
Optimal

# Primal solution values
Feasible
Objective 3
# Columns 2
xFT_9_0_3 2
xPT_10_1 1
# Rows 1
cov_0_10 3
";
        let solution = parse_highs_solution(text).expect("parse");
        assert_eq!(solution.status, MipStatus::Optimal);
        assert_eq!(solution.count_for("xFT_9_0_3"), 2);
        assert_eq!(solution.count_for("xPT_10_1"), 1);
        assert!(!solution.primal.contains_key("cov_0_10"));
    }

    #[test]
    fn maps_non_optimal_statuses() {
        let infeasible = "Model status\nInfeasible\n";
        let solution = parse_highs_solution(infeasible).expect("parse");
        assert_eq!(solution.status, MipStatus::Infeasible);

        let stopped = "Model status\nTime limit reached\n";
        let solution = parse_highs_solution(stopped).expect("parse");
        assert_eq!(solution.status, MipStatus::Unknown);
        assert_eq!(solution.reason.as_deref(), Some("Time limit reached"));
    }

    #[test]
    fn rejects_files_without_a_status() {
        assert!(parse_highs_solution("Objective 3\n").is_err());
    }
}
