//! Children index: for every node, the half-open range of its descendants.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::types::{Event, Node};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildrenIndex {
    ranges: Vec<Range<usize>>,
}

impl ChildrenIndex {
    /// One pass with a stack of pending `Call` indices.
    ///
    /// A `Call` owns everything strictly between it and its matching `Return`.
    /// A `Call` that is never closed owns everything up to the end.
    pub fn build(nodes: &[Node]) -> Self {
        let mut ranges = vec![0..0; nodes.len()];
        let mut pending: Vec<usize> = Vec::new();

        for (index, node) in nodes.iter().enumerate() {
            match node.event {
                Event::Call => pending.push(index),
                Event::CallReturn => {}
                Event::Return => {
                    let matching = pending
                        .iter()
                        .rposition(|&open| nodes[open].depth == node.depth && nodes[open].name == node.name);
                    if let Some(position) = matching {
                        for open in pending.drain(position..) {
                            ranges[open] = open + 1..index;
                        }
                    }
                }
            }
        }
        for open in pending {
            ranges[open] = open + 1..nodes.len();
        }

        Self { ranges }
    }

    /// Descendant range of `index`; empty for leaves and out-of-range indices.
    pub fn range(&self, index: usize) -> Range<usize> {
        self.ranges.get(index).cloned().unwrap_or(0..0)
    }

    pub fn has_children(&self, index: usize) -> bool {
        !self.range(index).is_empty()
    }

    /// Every node that has children, i.e. the "expand all" state.
    pub fn parents(&self) -> BTreeSet<usize> {
        self.ranges
            .iter()
            .enumerate()
            .filter(|(_, range)| !range.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
