use std::error::Error;

use serde::Serialize;

use super::CheckCmd;
use crate::commands::{build_from_file, Execute};
use crate::config::Config;
use crate::tree::{summarize, Summary, TreeBuilder};

/// Result of the check command execution
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub source: String,
    pub well_formed: bool,
    #[serde(flatten)]
    pub summary: Summary,
}

impl Execute for CheckCmd {
    type Output = CheckResult;

    // Configured filters are ignored: the shape of the recording itself is reported.
    fn execute(self, _config: &Config) -> Result<Self::Output, Box<dyn Error>> {
        let nodes = build_from_file(&TreeBuilder::new(), &self.file)?;
        let summary = summarize(&nodes);
        if self.strict {
            if let Some(problem) = &summary.problem {
                return Err(format!("Trace {} is incomplete: {}", self.file.display(), problem).into());
            }
        }
        Ok(CheckResult {
            source: self.file.display().to_string(),
            well_formed: summary.well_formed(),
            summary,
        })
    }
}
