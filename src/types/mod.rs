//! Shared types for call tree data.

mod node;
mod notification;
mod value;

pub use node::{qualify, Event, Node, NodeRecord, Origin, ParamKind, Parameter};
pub use notification::{CallNotification, Notification, ReturnNotification, SourceLocation};
pub use value::Value;
