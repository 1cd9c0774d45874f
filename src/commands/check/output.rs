//! Output formatting for check command results.

use super::execute::CheckResult;
use crate::output::{format_seconds, Outputable};

impl Outputable for CheckResult {
    fn to_table(&self) -> String {
        let summary = &self.summary;
        let status = match &summary.problem {
            None => "complete".to_string(),
            Some(problem) => format!("incomplete: {}", problem),
        };

        [
            format!("Trace: {}", self.source),
            String::new(),
            format!("Nodes:      {}", summary.nodes),
            format!("Calls:      {}", summary.calls),
            format!("Leaves:     {}", summary.leaves),
            format!("Max depth:  {}", summary.max_depth),
            format!("Total time: {}", format_seconds(summary.total_time)),
            format!("Status:     {}", status),
        ]
        .join("\n")
    }
}
