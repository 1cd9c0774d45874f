mod cli_tests;
mod execute;
mod output;
mod output_tests;

pub use execute::BrowseResult;

use clap::Args;
use std::path::PathBuf;

use super::FilterArgs;

/// Explore the call tree of a recorded trace interactively
#[derive(Args, Debug)]
#[command(after_help = "\
Keys:
  ↑/k ↓/j          Move between calls (closing lines are skipped)
  PgUp PgDn        Move a page
  g/Home G/End     First / last call
  Enter Space      Expand or collapse the selected call
  e c              Expand all / collapse all
  →/l              Zoom into the selected call
  ←/h Esc          Zoom back out
  q Ctrl-C         Quit

Examples:
  call_tree browse -f trace.jsonl
  call_tree browse -f trace.jsonl --exclude-pattern '^Logger#' --drop-filtered")]
pub struct BrowseCmd {
    /// Recorded notification stream (JSON lines)
    #[arg(short, long)]
    pub file: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,
}
