//! Interactive navigation over a finalized node sequence.
//!
//! The navigator owns a working tree, which node indices are expanded, the
//! cached list of visible indices, a cursor, and a scroll window over a
//! viewport of fixed height. Zooming into a subtree swaps in a re-rooted copy
//! of that subtree and pushes the previous state onto a stack; zooming out
//! restores it verbatim.

mod children;
mod view;

pub use children::ChildrenIndex;
pub use view::{color_class, Connector, Indicator, LineView, COLOR_CLASSES};

use std::collections::BTreeSet;
use std::mem;

use tracing::debug;

use crate::format::{Formatter, Presenter};
use crate::types::{Event, Node};

/// Viewport height used until the renderer reports one.
const DEFAULT_VIEWPORT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    First,
    Last,
}

/// Where the navigator is in its zoom history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Browsing,
    ZoomedIn { depth: usize },
}

/// Everything needed to put a working tree back as it was.
#[derive(Debug, Clone, PartialEq)]
struct ZoomFrame {
    tree: Vec<Node>,
    children: ChildrenIndex,
    expanded: BTreeSet<usize>,
    visible: Vec<usize>,
    cursor: usize,
    scroll_top: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    tree: Vec<Node>,
    children: ChildrenIndex,
    expanded: BTreeSet<usize>,
    visible: Vec<usize>,
    /// Node index under the cursor. Meaningless while the tree is empty.
    cursor: usize,
    scroll_top: usize,
    viewport: usize,
    zoom_stack: Vec<ZoomFrame>,
}

impl Navigator {
    pub fn new(tree: Vec<Node>) -> Self {
        let mut navigator = Self {
            tree: Vec::new(),
            children: ChildrenIndex::default(),
            expanded: BTreeSet::new(),
            visible: Vec::new(),
            cursor: 0,
            scroll_top: 0,
            viewport: DEFAULT_VIEWPORT,
            zoom_stack: Vec::new(),
        };
        navigator.adopt(tree);
        navigator
    }

    /// Make `tree` the working tree with everything expanded and the cursor on
    /// the first selectable line.
    fn adopt(&mut self, tree: Vec<Node>) {
        self.children = ChildrenIndex::build(&tree);
        self.tree = tree;
        self.expanded = self.children.parents();
        self.refresh_visible();
        self.cursor = self.first_selectable().unwrap_or(0);
        self.scroll_top = 0;
        self.adjust_scroll();
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn tree(&self) -> &[Node] {
        &self.tree
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.tree.get(index)
    }

    pub fn has_children(&self, index: usize) -> bool {
        self.children.has_children(index)
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    pub fn expanded(&self) -> &BTreeSet<usize> {
        &self.expanded
    }

    /// Indices of the nodes to render, in order.
    pub fn visible_lines(&self) -> &[usize] {
        &self.visible
    }

    /// Node index under the cursor, if there is anything to select.
    pub fn selected(&self) -> Option<usize> {
        if self.tree.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    /// Position of the cursor within the visible lines.
    pub fn cursor_position(&self) -> Option<usize> {
        if self.tree.is_empty() {
            return None;
        }
        self.visible.binary_search(&self.cursor).ok()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    pub fn state(&self) -> NavState {
        match self.zoom_stack.len() {
            0 => NavState::Browsing,
            depth => NavState::ZoomedIn { depth },
        }
    }

    pub fn zoom_depth(&self) -> usize {
        self.zoom_stack.len()
    }

    /// Enclosing call nodes of `index`, innermost first.
    ///
    /// For each shallower level, the nearest preceding `Call`/`CallReturn` at
    /// exactly that level. Stops early at a node shallower than the level
    /// being looked for.
    pub fn ancestors(&self, index: usize) -> Vec<usize> {
        let Some(node) = self.tree.get(index) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        let mut level = node.depth;
        let mut cursor = index;
        while level > 0 && cursor > 0 {
            cursor -= 1;
            let candidate = &self.tree[cursor];
            let target = level - 1;
            if candidate.depth < target {
                break;
            }
            if candidate.depth == target && candidate.event.opens_call() {
                found.push(cursor);
                level = target;
            }
        }
        found
    }

    /// Whether `index` is shown under the current expansion state.
    pub fn is_visible(&self, index: usize) -> bool {
        let Some(node) = self.tree.get(index) else {
            return false;
        };
        if node.depth == 0 {
            return true;
        }
        self.ancestors(index)
            .into_iter()
            .all(|a| !self.children.has_children(a) || self.expanded.contains(&a))
    }

    fn is_selectable(&self, index: usize) -> bool {
        self.tree.get(index).is_some_and(|n| n.event != Event::Return)
    }

    fn first_selectable(&self) -> Option<usize> {
        self.visible.iter().copied().find(|&i| self.is_selectable(i))
    }

    fn last_selectable(&self) -> Option<usize> {
        self.visible.iter().rev().copied().find(|&i| self.is_selectable(i))
    }

    // ------------------------------------------------------------------
    // Expansion
    // ------------------------------------------------------------------

    /// Expand or collapse `index`. No-op for nodes without children.
    pub fn toggle_expansion(&mut self, index: usize) {
        if !self.children.has_children(index) {
            return;
        }
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
        self.refresh_visible();
    }

    /// Toggle the node under the cursor.
    pub fn toggle_selected(&mut self) {
        if let Some(index) = self.selected() {
            self.toggle_expansion(index);
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded = self.children.parents();
        self.refresh_visible();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.refresh_visible();
    }

    /// Recompute the visible list, then keep the cursor on a visible line.
    ///
    /// Walks the tree once, jumping over the descendants of collapsed calls;
    /// agrees with [`Navigator::is_visible`].
    fn refresh_visible(&mut self) {
        let mut visible = Vec::with_capacity(self.tree.len());
        let mut index = 0;
        while index < self.tree.len() {
            visible.push(index);
            let range = self.children.range(index);
            if !range.is_empty() && !self.expanded.contains(&index) {
                index = range.end;
            } else {
                index += 1;
            }
        }
        self.visible = visible;

        if !self.tree.is_empty() && self.visible.binary_search(&self.cursor).is_err() {
            // The cursor was hidden by a collapse; fall back to the nearest
            // selectable line above it, which is its collapsed ancestor.
            let before = self.visible.partition_point(|&i| i < self.cursor);
            self.cursor = self.visible[..before]
                .iter()
                .rev()
                .copied()
                .find(|&i| self.is_selectable(i))
                .or_else(|| self.first_selectable())
                .unwrap_or(0);
        }
        self.adjust_scroll();
    }

    // ------------------------------------------------------------------
    // Cursor and scrolling
    // ------------------------------------------------------------------

    /// Move to the next/previous visible line that is not a `Return`.
    /// Returns whether the cursor moved.
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let Some(position) = self.cursor_position() else {
            return false;
        };
        let next = match direction {
            Direction::Down => self.visible[position + 1..]
                .iter()
                .copied()
                .find(|&i| self.is_selectable(i)),
            Direction::Up => self.visible[..position]
                .iter()
                .rev()
                .copied()
                .find(|&i| self.is_selectable(i)),
        };
        match next {
            Some(index) => {
                self.cursor = index;
                self.adjust_scroll();
                true
            }
            None => false,
        }
    }

    /// Move by up to one viewport worth of selectable lines.
    pub fn page(&mut self, direction: Direction) {
        for _ in 0..self.viewport.max(1) {
            if !self.move_cursor(direction) {
                break;
            }
        }
    }

    pub fn jump(&mut self, jump: Jump) {
        let target = match jump {
            Jump::First => self.first_selectable(),
            Jump::Last => self.last_selectable(),
        };
        if let Some(index) = target {
            self.cursor = index;
            self.adjust_scroll();
        }
    }

    /// Set the number of rows available for lines.
    pub fn set_viewport(&mut self, height: usize) {
        self.viewport = height.max(1);
        self.adjust_scroll();
    }

    /// Keep the cursor inside `[scroll_top, scroll_top + viewport)` moving the
    /// window as little as possible, never past the last full page. On the last
    /// selectable line the window goes as far down as it can so the trailing
    /// `Return` lines show.
    fn adjust_scroll(&mut self) {
        let height = self.viewport.max(1);
        let max_top = self.visible.len().saturating_sub(height);
        let Some(position) = self.cursor_position() else {
            self.scroll_top = 0;
            return;
        };

        if position < self.scroll_top {
            self.scroll_top = position;
        } else if position >= self.scroll_top + height {
            self.scroll_top = position + 1 - height;
        }
        if self.last_selectable() == Some(self.cursor) {
            self.scroll_top = max_top.min(position);
        }
        self.scroll_top = self.scroll_top.min(max_top);
    }

    // ------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------

    /// Replace the working tree with the subtree rooted at `index`, re-rooted at
    /// depth 0. No-op (returns false) when the node has no children.
    pub fn enter_subtree(&mut self, index: usize) -> bool {
        if !self.children.has_children(index) {
            return false;
        }
        let range = self.children.range(index);
        let root = &self.tree[index];
        let base = root.depth;

        let mut subtree = Vec::with_capacity(range.len() + 2);
        let mut opened = root.clone();
        opened.depth = 0;
        subtree.push(opened);
        subtree.extend(self.tree[range.clone()].iter().map(|node| {
            let mut node = node.clone();
            node.depth = node.depth.saturating_sub(base);
            node
        }));
        let closing = self.tree[range.end..]
            .iter()
            .find(|n| n.event == Event::Return && n.depth == base && n.name == root.name);
        if let Some(closing) = closing {
            let mut closing = closing.clone();
            closing.depth = 0;
            subtree.push(closing);
        }

        debug!(index, nodes = subtree.len(), "zooming into subtree");
        let frame = ZoomFrame {
            tree: mem::take(&mut self.tree),
            children: mem::take(&mut self.children),
            expanded: mem::take(&mut self.expanded),
            visible: mem::take(&mut self.visible),
            cursor: self.cursor,
            scroll_top: self.scroll_top,
        };
        self.zoom_stack.push(frame);
        self.adopt(subtree);
        true
    }

    /// Zoom into the node under the cursor.
    pub fn enter_selected(&mut self) -> bool {
        match self.selected() {
            Some(index) => self.enter_subtree(index),
            None => false,
        }
    }

    /// Restore the state saved by the last [`Navigator::enter_subtree`].
    /// No-op (returns false) when not zoomed in.
    pub fn exit_subtree(&mut self) -> bool {
        let Some(frame) = self.zoom_stack.pop() else {
            return false;
        };
        self.tree = frame.tree;
        self.children = frame.children;
        self.expanded = frame.expanded;
        self.visible = frame.visible;
        self.cursor = frame.cursor;
        self.scroll_top = frame.scroll_top;
        debug!(depth = self.zoom_stack.len(), "zoomed out");
        true
    }

    // ------------------------------------------------------------------
    // Rendering contract
    // ------------------------------------------------------------------

    /// Describe the line for node `index`.
    pub fn line(&self, index: usize, formatter: &dyn Formatter) -> Option<LineView> {
        let node = self.tree.get(index)?;
        let indicator = if node.event == Event::Return {
            Indicator::Closing
        } else if !self.children.has_children(index) {
            Indicator::Leaf
        } else if self.expanded.contains(&index) {
            Indicator::Expanded
        } else {
            Indicator::Collapsed
        };
        let presenter = Presenter::new(node, formatter);

        Some(LineView {
            index,
            depth: node.depth,
            event: node.event,
            indicator,
            connectors: (0..node.depth).map(Connector::for_level).collect(),
            color: color_class(node.depth),
            content: presenter.content(),
            location: presenter.location(),
            selected: self.selected() == Some(index),
        })
    }

    /// Lines inside the scroll window, top to bottom.
    pub fn window(&self, formatter: &dyn Formatter) -> Vec<LineView> {
        let end = (self.scroll_top + self.viewport).min(self.visible.len());
        let start = self.scroll_top.min(end);
        self.visible[start..end]
            .iter()
            .filter_map(|&index| self.line(index, formatter))
            .collect()
    }
}
