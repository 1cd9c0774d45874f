use std::error::Error;

use serde::Serialize;

use super::BrowseCmd;
use crate::commands::{build_from_file, Execute};
use crate::config::Config;
use crate::navigator::Navigator;
use crate::tui;
use crate::types::NodeRecord;

/// Where a browsing session ended
#[derive(Debug, Default, Serialize)]
pub struct BrowseResult {
    pub source: String,
    pub nodes: usize,
    /// Key presses that changed or moved the view.
    pub actions: usize,
    pub visible: usize,
    pub zoom_depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<NodeRecord>,
}

impl BrowseResult {
    pub fn from_navigator(source: String, navigator: &Navigator, actions: usize) -> Self {
        BrowseResult {
            source,
            nodes: navigator.tree().len(),
            actions,
            visible: navigator.visible_lines().len(),
            zoom_depth: navigator.zoom_depth(),
            selected: navigator
                .selected()
                .and_then(|index| navigator.node(index))
                .map(NodeRecord::from),
        }
    }
}

impl Execute for BrowseCmd {
    type Output = BrowseResult;

    fn execute(self, config: &Config) -> Result<Self::Output, Box<dyn Error>> {
        let builder = self.filter.builder(config)?;
        let nodes = build_from_file(&builder, &self.file)?;
        if nodes.is_empty() {
            return Err(format!("No calls recorded in {}", self.file.display()).into());
        }

        let mut navigator = Navigator::new(nodes);
        let actions = tui::run(&mut navigator, &config.formatter(), config.page_size)?;
        Ok(BrowseResult::from_navigator(
            self.file.display().to_string(),
            &navigator,
            actions,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::FilterArgs;
    use rstest::rstest;

    // Everything filtered out: fails before the terminal is touched
    #[rstest]
    fn test_browse_empty_tree_is_an_error() {
        let file = crate::test_utils::checkout_trace();
        let cmd = BrowseCmd {
            file: file.path().to_path_buf(),
            filter: FilterArgs {
                include: vec!["nothing_matches".to_string()],
                ..FilterArgs::default()
            },
        };
        let err = crate::test_utils::execute_cmd(cmd).unwrap_err();
        assert!(err.to_string().starts_with("No calls recorded in"));
    }

    #[rstest]
    fn test_browse_missing_file() {
        let cmd = BrowseCmd {
            file: "/nonexistent/trace.jsonl".into(),
            filter: FilterArgs::default(),
        };
        assert!(crate::test_utils::execute_cmd(cmd).is_err());
    }

    #[rstest]
    fn test_result_from_navigator() {
        let nodes = crate::test_utils::build(crate::fixtures::CHECKOUT);
        let mut navigator = Navigator::new(nodes);
        navigator.enter_subtree(1);
        navigator.toggle_selected();
        let result = BrowseResult::from_navigator("checkout.jsonl".to_string(), &navigator, 2);
        assert_eq!(result.nodes, 4);
        assert_eq!(result.visible, 2);
        assert_eq!(result.zoom_depth, 1);
        assert_eq!(result.selected.map(|n| n.name), Some("total".to_string()));
    }
}
