use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
struct Args {
    /// Solver input JSON file; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Runtime config YAML; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    roster_solver::solve_to_stdout(args.input.as_deref(), args.config.as_deref())
}
