//! Loadable solver backend driving a HiGHS executable.
//!
//! The binary is found on `PATH` as `highs`, or wherever
//! `ROSTER_HIGHS_BIN` points.

mod solution;

use abi_stable::prefix_type::PrefixTypeTrait;
use abi_stable::sabi_trait::prelude::TD_Opaque;
use abi_stable::std_types::{RResult, RString};
use anyhow::{bail, Context, Result};
use roster_core::backend::MipSolution;
use roster_core::extensions::api::{BackendMetadata, SolverBackendExt, SolverBackendExt_TO};
use roster_core::extensions::root::{BackendRootModule, BackendRootModuleRef};
use solution::parse_highs_solution;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

pub struct HighsBackend;

impl HighsBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn highs_binary() -> PathBuf {
    env::var_os("ROSTER_HIGHS_BIN")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("highs"))
}

fn run_highs(lp_text: &str) -> Result<MipSolution> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("clock went backwards")?
        .as_nanos();
    let lp_path = env::temp_dir().join(format!("roster-highs-{stamp}.lp"));
    let sol_path = env::temp_dir().join(format!("roster-highs-{stamp}.sol"));

    let result = (|| {
        fs::write(&lp_path, lp_text)
            .with_context(|| format!("failed to write LP file at {}", lp_path.display()))?;
        let binary = highs_binary();
        let output = Command::new(&binary)
            .arg("--solution_file")
            .arg(&sol_path)
            .arg(&lp_path)
            .output()
            .with_context(|| format!("failed to launch highs at {}", binary.display()))?;
        if !output.status.success() {
            bail!(
                "highs exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        let text = fs::read_to_string(&sol_path)
            .with_context(|| format!("highs wrote no solution file at {}", sol_path.display()))?;
        parse_highs_solution(&text)
    })();

    let _ = fs::remove_file(&lp_path);
    let _ = fs::remove_file(&sol_path);
    result
}

impl SolverBackendExt for HighsBackend {
    fn metadata(&self) -> BackendMetadata {
        BackendMetadata {
            id: RString::from("highs"),
            version: RString::from(env!("CARGO_PKG_VERSION")),
            api_version: RString::from("v1"),
        }
    }

    fn solve_model(&self, lp_text: RString) -> RResult<RString, RString> {
        let solved = run_highs(lp_text.as_str())
            .and_then(|solution| serde_json::to_string(&solution).context("failed to encode solution"));
        match solved {
            Ok(json) => RResult::ROk(RString::from(json)),
            Err(err) => RResult::RErr(RString::from(format!("{err:#}"))),
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn get_backend() -> SolverBackendExt_TO<'static, abi_stable::std_types::RBox<()>> {
    SolverBackendExt_TO::from_value(HighsBackend::new(), TD_Opaque)
}

#[abi_stable::export_root_module]
pub fn get_root_module() -> BackendRootModuleRef {
    BackendRootModule { get_backend }.leak_into_prefix()
}
