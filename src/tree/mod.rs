//! Call tree reconstruction.
//!
//! Notifications flow one way: instrumentation source → [`TreeBuilder`]
//! (filtering) → [`CallStack`] (matching) → flat pre-order node sequence.

pub mod builder;
pub mod call_stack;
pub mod filter;
pub mod shape;

pub use builder::TreeBuilder;
pub use call_stack::{CallFrame, CallStack, FrameHandle};
pub use filter::{Criterion, CriterionSpec, Filter, FilterError, FilteredDescendants, Matches};
pub use shape::{check, summarize, ShapeError, Summary};
