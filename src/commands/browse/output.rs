//! Output formatting for browse session summaries.

use super::execute::BrowseResult;
use crate::output::Outputable;
use crate::types::qualify;

impl Outputable for BrowseResult {
    fn to_table(&self) -> String {
        let mut lines = vec![
            format!("Browsed: {}", self.source),
            format!(
                "{} nodes, {} visible at exit, {} actions",
                self.nodes, self.visible, self.actions
            ),
        ];
        if self.zoom_depth > 0 {
            lines.push(format!("Zoom depth at exit: {}", self.zoom_depth));
        }
        if let Some(node) = &self.selected {
            let mut selected = format!("Selected: {}", qualify(node.scope.as_deref(), &node.name));
            if let (Some(file), Some(line)) = (&node.file, node.line) {
                selected.push_str(&format!(" ({}:{})", file, line));
            }
            lines.push(selected);
        }
        lines.join("\n")
    }
}
