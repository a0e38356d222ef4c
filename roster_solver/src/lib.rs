//! One-shot solver front end: solver input JSON on stdin (or a file),
//! roster result JSON on stdout. Logs go to stderr so the output stream
//! stays machine-readable.

use anyhow::{Context, Result};
use roster_core::backend::resolve_backend;
use roster_core::conf::config::{read_config, RosterConfig};
use roster_core::engine::{self, TracingProgress};
use roster_core::extensions::loader::{backend_entries, load_backends};
use roster_core::model::SolveRequest;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub fn solve_to_stdout(input: Option<&Path>, config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => read_config(path)?,
        None => RosterConfig::default(),
    };

    let request: SolveRequest = match input {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read solver input at {}", path.display()))?;
            serde_json::from_str(&text).context("failed to parse solver input JSON")?
        }
        None => serde_json::from_reader(io::stdin().lock())
            .context("failed to parse solver input JSON from stdin")?,
    };

    let registry = load_backends(&backend_entries(&config))
        .context("failed to load solver backend extensions")?;
    let backend = resolve_backend(&config, &registry)?;

    let result = engine::solve(&request, backend.as_ref(), &TracingProgress);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer(&mut out, &result).context("failed to write roster result")?;
    writeln!(out)?;
    Ok(())
}
