mod cli_tests;
mod execute;
mod execute_tests;
mod output;

pub use execute::CheckResult;

use clap::Args;
use std::path::PathBuf;

/// Report the shape of a recorded trace
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  call_tree check -f trace.jsonl             # Counts, depth and total time
  call_tree check -f trace.jsonl --strict    # Fail when the trace is incomplete")]
pub struct CheckCmd {
    /// Recorded notification stream (JSON lines)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Fail when the trace is not a complete, well-formed tree
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}
