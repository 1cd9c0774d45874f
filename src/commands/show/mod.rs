mod execute;
mod output;

pub use execute::ShowResult;

use clap::Args;
use std::path::PathBuf;

use super::FilterArgs;

/// Build the call tree of a recorded trace and print it
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  call_tree show -f trace.jsonl                          # Whole tree
  call_tree show -f trace.jsonl --exclude-pattern '^Logger#'
  call_tree show -f trace.jsonl --include 'Shop::Cart#checkout' --drop-filtered
  call_tree show -f trace.jsonl --max-depth 1 -o json")]
pub struct ShowCmd {
    /// Recorded notification stream (JSON lines)
    #[arg(short, long)]
    pub file: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Hide nodes nested deeper than this
    #[arg(long)]
    pub max_depth: Option<usize>,
}
