//! Output formatting for show command results.

use super::execute::ShowResult;
use crate::output::{format_seconds, Outputable};

impl Outputable for ShowResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Trace: {}", self.source));
        lines.push(format!(
            "{} nodes, {} calls, max depth {}, total {}",
            self.summary.nodes,
            self.summary.calls,
            self.summary.max_depth,
            format_seconds(self.summary.total_time)
        ));
        if let Some(problem) = &self.summary.problem {
            lines.push(format!("Warning: incomplete trace ({})", problem));
        }
        lines.push(String::new());

        if self.lines.is_empty() {
            lines.push("No calls recorded.".to_string());
        } else {
            lines.extend(self.lines.iter().cloned());
        }

        lines.join("\n")
    }
}
