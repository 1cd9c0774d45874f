//! Instrumentation sources.
//!
//! An instrumentation source runs some workload and reports the calls it makes,
//! synchronously and in execution order, to a [`NotificationSink`]. There is no
//! process-wide hook: the source is handed to
//! [`TreeBuilder::run`](crate::tree::TreeBuilder::run) explicitly.

mod probe;
mod replay;

pub use probe::{Probe, Workload};
pub use replay::{Replay, StreamError};

use std::convert::Infallible;

use crate::types::Notification;

/// Receiver of call/return notifications.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Something that produces notifications while it runs.
pub trait Instrumentation {
    type Error;

    /// Run to completion, delivering every notification to `sink` as it happens.
    ///
    /// An error aborts the run; whatever was delivered before it is the sink's
    /// to discard.
    fn run(self, sink: &mut dyn NotificationSink) -> Result<(), Self::Error>;
}

/// An already captured, in-memory stream.
impl Instrumentation for Vec<Notification> {
    type Error = Infallible;

    fn run(self, sink: &mut dyn NotificationSink) -> Result<(), Self::Error> {
        for notification in self {
            sink.notify(notification);
        }
        Ok(())
    }
}

/// Collects notifications as-is. Useful to record a probe session for replay.
impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}
