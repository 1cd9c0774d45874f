//! Well-formedness of a node sequence.
//!
//! A finalized sequence from a complete trace is a pre-order forest: calls at
//! depth `d` open, children sit at `d + 1`, and a `Return` at `d` with the same
//! name closes. Traces stopped while calls were pending lose those calls'
//! nodes, which shows up here as a depth error.

use serde::Serialize;
use thiserror::Error;

use crate::types::{Event, Node};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Node {index} ('{name}') is at depth {depth}, expected {expected}")]
    UnexpectedDepth {
        index: usize,
        name: String,
        depth: usize,
        expected: usize,
    },

    #[error("Return at node {index} ('{name}') does not close an open call")]
    UnmatchedReturn { index: usize, name: String },

    #[error("Call at node {index} ('{name}') has no children but was not collapsed")]
    EmptyCall { index: usize, name: String },

    #[error("Call at node {index} ('{name}') is never closed")]
    UnclosedCall { index: usize, name: String },
}

impl ShapeError {
    /// Whether the violation is what a trace stopped mid-call leaves behind.
    pub fn is_truncation(&self) -> bool {
        matches!(self, ShapeError::UnexpectedDepth { .. } | ShapeError::UnclosedCall { .. })
    }
}

/// Verify the forest invariants, reporting the first violation.
pub fn check(nodes: &[Node]) -> Result<(), ShapeError> {
    let mut open: Vec<usize> = Vec::new();

    for (index, node) in nodes.iter().enumerate() {
        match node.event {
            Event::Return => {
                let Some(&call) = open.last() else {
                    return Err(ShapeError::UnmatchedReturn {
                        index,
                        name: node.name.clone(),
                    });
                };
                let opener = &nodes[call];
                if opener.name != node.name || opener.depth != node.depth {
                    return Err(ShapeError::UnmatchedReturn {
                        index,
                        name: node.name.clone(),
                    });
                }
                if call + 1 == index {
                    return Err(ShapeError::EmptyCall {
                        index: call,
                        name: opener.name.clone(),
                    });
                }
                open.pop();
            }
            Event::Call | Event::CallReturn => {
                if node.depth != open.len() {
                    return Err(ShapeError::UnexpectedDepth {
                        index,
                        name: node.name.clone(),
                        depth: node.depth,
                        expected: open.len(),
                    });
                }
                if node.event == Event::Call {
                    open.push(index);
                }
            }
        }
    }

    match open.last() {
        Some(&index) => Err(ShapeError::UnclosedCall {
            index,
            name: nodes[index].name.clone(),
        }),
        None => Ok(()),
    }
}

/// Counts describing a node sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub nodes: usize,
    /// Calls recorded, collapsed leaves included.
    pub calls: usize,
    pub leaves: usize,
    pub max_depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

impl Summary {
    pub fn well_formed(&self) -> bool {
        self.problem.is_none()
    }
}

pub fn summarize(nodes: &[Node]) -> Summary {
    let calls = nodes.iter().filter(|n| n.event.opens_call()).count();
    let leaves = nodes.iter().filter(|n| n.event == Event::CallReturn).count();
    let max_depth = nodes.iter().map(|n| n.depth).max().unwrap_or(0);
    let root_times: Vec<f64> = nodes
        .iter()
        .filter(|n| n.depth == 0 && n.event.opens_call())
        .filter_map(Node::duration)
        .collect();
    let total_time = if root_times.is_empty() {
        None
    } else {
        Some(root_times.iter().sum())
    };

    Summary {
        nodes: nodes.len(),
        calls,
        leaves,
        max_depth,
        total_time,
        problem: check(nodes).err().map(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn node(name: &str, event: Event, depth: usize) -> Node {
        Node::new(event, name, depth)
    }

    #[rstest]
    fn test_well_formed_sequence() {
        let nodes = vec![
            node("a", Event::Call, 0),
            node("b", Event::CallReturn, 1),
            node("a", Event::Return, 0),
            node("z", Event::CallReturn, 0),
        ];
        assert_eq!(check(&nodes), Ok(()));
    }

    #[rstest]
    fn test_truncated_trace_is_a_depth_error() {
        let nodes = vec![node("step", Event::CallReturn, 1)];
        assert!(matches!(
            check(&nodes),
            Err(ShapeError::UnexpectedDepth { index: 0, expected: 0, .. })
        ));
    }

    #[rstest]
    fn test_return_name_must_match() {
        let nodes = vec![
            node("a", Event::Call, 0),
            node("b", Event::CallReturn, 1),
            node("x", Event::Return, 0),
        ];
        assert!(matches!(check(&nodes), Err(ShapeError::UnmatchedReturn { index: 2, .. })));
    }

    #[rstest]
    fn test_call_without_children_must_be_collapsed() {
        let nodes = vec![node("a", Event::Call, 0), node("a", Event::Return, 0)];
        assert!(matches!(check(&nodes), Err(ShapeError::EmptyCall { index: 0, .. })));
    }

    #[rstest]
    fn test_unclosed_call() {
        let nodes = vec![node("a", Event::Call, 0), node("b", Event::CallReturn, 1)];
        assert!(matches!(check(&nodes), Err(ShapeError::UnclosedCall { index: 0, .. })));
    }

    #[rstest]
    fn test_only_depth_and_unclosed_errors_count_as_truncation() {
        let truncated = check(&[node("step", Event::CallReturn, 1)]).unwrap_err();
        assert!(truncated.is_truncation());
        let unclosed = check(&[node("a", Event::Call, 0), node("b", Event::CallReturn, 1)]).unwrap_err();
        assert!(unclosed.is_truncation());
        let empty = check(&[node("a", Event::Call, 0), node("a", Event::Return, 0)]).unwrap_err();
        assert!(!empty.is_truncation());
    }

    #[rstest]
    fn test_summary_counts() {
        let mut root = node("a", Event::Call, 0);
        root.start_time = Some(0.0);
        root.end_time = Some(2.0);
        let nodes = vec![
            root,
            node("b", Event::CallReturn, 1),
            node("c", Event::CallReturn, 1),
            node("a", Event::Return, 0),
        ];
        let summary = summarize(&nodes);
        assert_eq!(summary.nodes, 4);
        assert_eq!(summary.calls, 3);
        assert_eq!(summary.leaves, 2);
        assert_eq!(summary.max_depth, 1);
        assert_eq!(summary.total_time, Some(2.0));
        assert!(summary.well_formed());
    }

    #[rstest]
    fn test_summary_of_empty_sequence() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());
    }
}
