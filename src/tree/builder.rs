//! Trace lifecycle: start, run a workload, stop, hand back the node sequence.

use tracing::{debug, warn};

use super::call_stack::CallStack;
use super::filter::{Filter, FilteredDescendants};
use super::shape;
use crate::instrument::{Instrumentation, NotificationSink};
use crate::types::{Node, Notification};

/// Builds call trees from instrumentation sources.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    filter: Option<Filter>,
    policy: FilteredDescendants,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = if filter.is_empty() { None } else { Some(filter) };
        self
    }

    pub fn with_policy(mut self, policy: FilteredDescendants) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FilteredDescendants {
        self.policy
    }

    /// Run `source` to completion and return the finalized node sequence.
    ///
    /// Notifications must arrive properly nested; this is assumed, not
    /// checked. If the source fails, recording stops first and the error is
    /// returned unchanged; nothing collected so far is returned.
    pub fn run<I: Instrumentation>(&self, source: I) -> Result<Vec<Node>, I::Error> {
        let mut session = Session::new(self.filter.as_ref(), self.policy);
        debug!(filtered = self.filter.is_some(), policy = ?self.policy, "instrumentation enabled");

        let result = source.run(&mut session);
        debug!(
            accepted = session.accepted,
            skipped = session.skipped,
            "instrumentation disabled"
        );

        if let Err(err) = result {
            debug!(discarded = session.stack.len(), "trace aborted, discarding partial tree");
            return Err(err);
        }

        let pending = session.stack.pending().len();
        let nodes = session.stack.finalize();
        match shape::check(&nodes) {
            Ok(()) => {}
            Err(problem) if problem.is_truncation() => {
                warn!(pending, %problem, "trace stopped with calls still pending");
            }
            Err(problem) => warn!(%problem, "notifications were not properly nested"),
        }
        Ok(nodes)
    }
}

/// Receives notifications for one run.
struct Session<'f> {
    stack: CallStack,
    filter: Option<&'f Filter>,
    policy: FilteredDescendants,
    /// Nesting level inside a dropped subtree; 0 when not suppressing.
    suppressed: usize,
    accepted: usize,
    skipped: usize,
}

impl<'f> Session<'f> {
    fn new(filter: Option<&'f Filter>, policy: FilteredDescendants) -> Self {
        Self {
            stack: CallStack::new(),
            filter,
            policy,
            suppressed: 0,
            accepted: 0,
            skipped: 0,
        }
    }
}

impl NotificationSink for Session<'_> {
    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::Call(call) => {
                if self.suppressed > 0 {
                    self.suppressed += 1;
                    self.skipped += 1;
                    return;
                }
                if let Some(filter) = self.filter {
                    if !filter.admits(&call) {
                        self.skipped += 1;
                        if self.policy == FilteredDescendants::Drop {
                            self.suppressed = 1;
                        }
                        return;
                    }
                }
                let origin = call.origin();
                self.stack.start_call(call.name, call.parameters, origin, call.at);
                self.accepted += 1;
            }
            Notification::Return(ret) => {
                if self.suppressed > 0 {
                    self.suppressed -= 1;
                    return;
                }
                self.stack
                    .finish_call(&ret.name, ret.scope.as_deref(), ret.value, ret.at);
            }
        }
    }
}
