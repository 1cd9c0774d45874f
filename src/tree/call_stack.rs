//! Stack-based matching of calls to returns.
//!
//! Every started call reserves a slot in the node log. The slot is filled when
//! the matching return arrives: by then it is known whether anything was
//! appended after the slot, i.e. whether the call had children. Leaf calls
//! become a single `CallReturn` node; parents become a `Call` node in the
//! reserved slot plus a `Return` node appended at the end.

use tracing::trace;

use crate::types::{Event, Node, Origin, Parameter, Value};

/// Bookkeeping for one pending call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallFrame {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub depth: usize,
    /// Index of the reserved slot in the node log.
    pub placeholder: usize,
    pub origin: Option<Origin>,
    pub start_time: Option<f64>,
}

impl CallFrame {
    pub fn scope(&self) -> Option<&str> {
        self.origin.as_ref().and_then(|o| o.scope.as_deref())
    }

    fn closed_by(&self, name: &str, scope: Option<&str>) -> bool {
        if self.name != name {
            return false;
        }
        match (self.scope(), scope) {
            (Some(pending), Some(returned)) => pending == returned,
            _ => true,
        }
    }
}

/// Handle returned by [`CallStack::start_call`]; identifies the reserved slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle {
    pub placeholder: usize,
    pub depth: usize,
}

#[derive(Debug, Default)]
pub struct CallStack {
    nodes: Vec<Option<Node>>,
    frames: Vec<CallFrame>,
    depth: usize,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth (number of pending calls).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Calls started but not yet returned, innermost last.
    pub fn pending(&self) -> &[CallFrame] {
        &self.frames
    }

    /// Number of slots in the log, reserved ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start_call(
        &mut self,
        name: impl Into<String>,
        parameters: Vec<Parameter>,
        origin: Option<Origin>,
        start_time: Option<f64>,
    ) -> FrameHandle {
        let frame = CallFrame {
            name: name.into(),
            parameters,
            depth: self.depth,
            placeholder: self.nodes.len(),
            origin,
            start_time,
        };
        let handle = FrameHandle {
            placeholder: frame.placeholder,
            depth: frame.depth,
        };
        self.nodes.push(None);
        self.depth += 1;
        self.frames.push(frame);
        handle
    }

    /// Close the innermost pending call.
    ///
    /// Returns `None` and ignores the notification if nothing is pending or the
    /// innermost call is a different routine; both happen when the call was
    /// never started because a filter excluded it. Scopes are compared only
    /// when both sides report one.
    pub fn finish_call(
        &mut self,
        name: &str,
        scope: Option<&str>,
        return_value: Option<Value>,
        end_time: Option<f64>,
    ) -> Option<CallFrame> {
        match self.frames.last() {
            Some(top) if top.closed_by(name, scope) => {}
            Some(top) => {
                trace!(name, pending = %top.name, "ignoring return that does not match the pending call");
                return None;
            }
            None => {
                trace!(name, "ignoring return with no pending call");
                return None;
            }
        }

        let frame = self.frames.pop()?;
        self.depth -= 1;
        let has_children = self.nodes.len() > frame.placeholder + 1;

        let mut opened = Node {
            event: Event::CallReturn,
            name: frame.name.clone(),
            parameters: frame.parameters.clone(),
            return_value: None,
            depth: frame.depth,
            origin: frame.origin.clone(),
            start_time: frame.start_time,
            end_time,
        };

        if has_children {
            opened.event = Event::Call;
            let closing = Node {
                event: Event::Return,
                name: frame.name.clone(),
                parameters: Vec::new(),
                return_value,
                depth: self.depth,
                origin: frame.origin.clone(),
                start_time: frame.start_time,
                end_time,
            };
            self.nodes.push(Some(closing));
        } else {
            opened.return_value = return_value;
        }
        self.nodes[frame.placeholder] = Some(opened);

        Some(frame)
    }

    /// The materialized node sequence. Slots of calls that never returned are
    /// dropped.
    pub fn finalize(self) -> Vec<Node> {
        self.nodes.into_iter().flatten().collect()
    }
}
