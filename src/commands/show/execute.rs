use std::error::Error;

use serde::Serialize;
use tracing::debug;

use super::ShowCmd;
use crate::commands::{build_from_file, Execute};
use crate::config::Config;
use crate::format::text_lines;
use crate::tree::{summarize, Summary};
use crate::types::{Node, NodeRecord};

/// Result of the show command execution
#[derive(Debug, Default, Serialize)]
pub struct ShowResult {
    pub source: String,
    /// Counts for the whole tree, before `max_depth` is applied.
    pub summary: Summary,
    pub nodes: Vec<NodeRecord>,
    /// Pre-rendered tree lines for the table format.
    #[serde(skip)]
    pub lines: Vec<String>,
}

impl ShowResult {
    pub fn from_nodes(source: String, nodes: &[Node], max_depth: Option<usize>, config: &Config) -> Self {
        let shown: Vec<Node> = nodes
            .iter()
            .filter(|n| max_depth.is_none_or(|max| n.depth <= max))
            .cloned()
            .collect();
        ShowResult {
            source,
            summary: summarize(nodes),
            nodes: shown.iter().map(NodeRecord::from).collect(),
            lines: text_lines(&shown, &config.formatter()),
        }
    }
}

impl Execute for ShowCmd {
    type Output = ShowResult;

    fn execute(self, config: &Config) -> Result<Self::Output, Box<dyn Error>> {
        let builder = self.filter.builder(config)?;
        let nodes = build_from_file(&builder, &self.file)?;
        debug!(nodes = nodes.len(), "tree built");
        Ok(ShowResult::from_nodes(
            self.file.display().to_string(),
            &nodes,
            self.max_depth,
            config,
        ))
    }
}
