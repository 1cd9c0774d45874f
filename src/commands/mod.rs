//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` impl producing a serializable result
//! - An `Outputable` impl rendering that result as text

mod browse;
mod check;
mod show;

pub use browse::{BrowseCmd, BrowseResult};
pub use check::{CheckCmd, CheckResult};
pub use show::{ShowCmd, ShowResult};

use clap::{Args, Subcommand};
use std::error::Error;
use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::instrument::{Replay, StreamError};
use crate::output::{OutputFormat, Outputable};
use crate::tree::{CriterionSpec, FilteredDescendants, TreeBuilder};
use crate::types::Node;

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, config: &Config) -> Result<Self::Output, Box<dyn Error>>;
}

/// Filter flags shared by commands that build a filtered tree.
///
/// Appended to the criteria from the configuration file.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Only record calls with this name or "Scope#name" (repeatable)
    #[arg(long, value_name = "NAME")]
    pub include: Vec<String>,

    /// Never record calls with this name or "Scope#name" (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Only record calls whose "Scope#name" matches this regex (repeatable)
    #[arg(long, value_name = "REGEX")]
    pub include_pattern: Vec<String>,

    /// Never record calls whose "Scope#name" matches this regex (repeatable)
    #[arg(long, value_name = "REGEX")]
    pub exclude_pattern: Vec<String>,

    /// Drop the calls made inside an excluded call instead of re-attaching them
    #[arg(long, default_value_t = false)]
    pub drop_filtered: bool,
}

impl FilterArgs {
    fn specs(names: &[String], patterns: &[String]) -> Vec<CriterionSpec> {
        names
            .iter()
            .map(|n| CriterionSpec::new("name", n.as_str()))
            .chain(patterns.iter().map(|p| CriterionSpec::new("pattern", p.as_str())))
            .collect()
    }

    /// Tree builder configured from the file settings plus these flags.
    pub fn builder(&self, config: &Config) -> Result<TreeBuilder, ConfigError> {
        let include = Self::specs(&self.include, &self.include_pattern);
        let exclude = Self::specs(&self.exclude, &self.exclude_pattern);
        let filter = config.filter(&include, &exclude)?;
        let policy = if self.drop_filtered {
            FilteredDescendants::Drop
        } else {
            config.filtered_descendants
        };
        Ok(TreeBuilder::new().with_filter(filter).with_policy(policy))
    }
}

/// Replay the recorded stream at `path` through `builder`.
pub fn build_from_file(builder: &TreeBuilder, path: &Path) -> Result<Vec<Node>, StreamError> {
    let replay = Replay::open(path)?;
    builder.run(replay)
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the call tree of a recorded trace and print it
    Show(ShowCmd),

    /// Explore the call tree of a recorded trace interactively
    Browse(BrowseCmd),

    /// Report the shape of a recorded trace (counts, depth, truncation)
    Check(CheckCmd),

    /// Catch-all for unknown commands
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, config: &Config, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Show(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
            Command::Browse(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
            Command::Check(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
            Command::Unknown(args) => {
                Err(format!("Unknown command: {}", args.first().map(String::as_str).unwrap_or_default()).into())
            }
        }
    }
}
