use anyhow::{anyhow, bail, Context, Result};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

use super::{MipBackend, MipSolution, MipStatus};
use crate::conf::config::RosterConfig;
use crate::lp::LpModel;

/// Drives a COIN-OR CBC executable: writes the model to a temp LP file,
/// runs `cbc <model> sec <limit> solve printingOptions all solution
/// <out>` and parses the solution file. Every call spawns a fresh
/// process, so no solver state leaks between phases.
#[derive(Debug, Clone)]
pub struct CbcBackend {
    binary: PathBuf,
    time_limit: Duration,
}

impl CbcBackend {
    pub const ID: &'static str = "cbc";

    pub fn new(binary: impl Into<PathBuf>, time_limit: Duration) -> Self {
        Self {
            binary: binary.into(),
            time_limit,
        }
    }

    pub fn from_config(config: &RosterConfig) -> Self {
        Self::new(
            config.cbc_path(),
            Duration::from_secs(config.time_limit_seconds()),
        )
    }
}

impl MipBackend for CbcBackend {
    fn id(&self) -> &str {
        Self::ID
    }

    fn solve(&self, model: &LpModel) -> Result<MipSolution> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("clock went backwards")?
            .as_nanos();
        let lp_path = env::temp_dir().join(format!("roster-{stamp}.lp"));
        let sol_path = env::temp_dir().join(format!("roster-{stamp}.sol"));

        let result = self.run(model, &lp_path, &sol_path);
        let _ = fs::remove_file(&lp_path);
        let _ = fs::remove_file(&sol_path);
        result
    }
}

impl CbcBackend {
    fn run(&self, model: &LpModel, lp_path: &Path, sol_path: &Path) -> Result<MipSolution> {
        let file = fs::File::create(lp_path)
            .with_context(|| format!("failed to create LP file at {}", lp_path.display()))?;
        let mut writer = BufWriter::new(file);
        model.write_to(&mut writer)?;
        drop(writer);

        debug!(lp = %lp_path.display(), binary = %self.binary.display(), "invoking cbc");
        let output = Command::new(&self.binary)
            .arg(lp_path)
            .arg("sec")
            .arg(self.time_limit.as_secs().to_string())
            .args(["solve", "printingOptions", "all", "solution"])
            .arg(sol_path)
            .output()
            .with_context(|| format!("failed to launch cbc at {}", self.binary.display()))?;
        if !output.status.success() {
            bail!(
                "cbc exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let text = fs::read_to_string(sol_path)
            .with_context(|| format!("cbc wrote no solution file at {}", sol_path.display()))?;
        parse_solution(&text)
    }
}

/// Parse a CBC solution file. The first line is a status banner
/// (`Optimal - objective value 4.0`); each following line is
/// `index name value reduced-cost`, occasionally prefixed with a `**`
/// marker for out-of-bounds values.
pub fn parse_solution(text: &str) -> Result<MipSolution> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let banner = lines
        .next()
        .ok_or_else(|| anyhow!("empty cbc solution file"))?
        .trim();

    let status = if banner.starts_with("Optimal") {
        MipStatus::Optimal
    } else if banner.starts_with("Infeasible") {
        MipStatus::Infeasible
    } else {
        MipStatus::Unknown
    };

    let mut primal = HashMap::new();
    for line in lines {
        let mut fields = line.split_whitespace().filter(|field| *field != "**");
        let _index = fields.next();
        let (Some(name), Some(value)) = (fields.next(), fields.next()) else {
            continue;
        };
        let Ok(value) = value.parse::<f64>() else {
            continue;
        };
        primal.insert(name.to_string(), value);
    }

    Ok(MipSolution {
        status,
        primal,
        reason: (status != MipStatus::Optimal).then(|| banner.to_string()),
    })
}
