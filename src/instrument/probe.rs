//! In-process instrumentation: a closure reports its own calls through a probe.

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::time::Instant;

use super::{Instrumentation, NotificationSink};
use crate::types::{CallNotification, Notification, ReturnNotification, Value};

/// Handle given to a traced workload.
///
/// Notifications without a timestamp are stamped with the seconds elapsed since
/// the probe was created. Once disabled, the probe swallows everything.
pub struct Probe<'a> {
    sink: RefCell<&'a mut dyn NotificationSink>,
    started: Instant,
    enabled: Cell<bool>,
}

impl<'a> Probe<'a> {
    pub fn new(sink: &'a mut dyn NotificationSink) -> Self {
        Self {
            sink: RefCell::new(sink),
            started: Instant::now(),
            enabled: Cell::new(true),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn disable(&self) {
        self.enabled.set(false);
    }

    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn deliver(&self, notification: Notification) {
        if !self.enabled.get() {
            return;
        }
        self.sink.borrow_mut().notify(notification);
    }

    pub fn call(&self, mut call: CallNotification) {
        call.at.get_or_insert_with(|| self.now());
        self.deliver(call.into());
    }

    pub fn ret(&self, mut ret: ReturnNotification) {
        ret.at.get_or_insert_with(|| self.now());
        self.deliver(ret.into());
    }

    /// Report `call`, run `body`, then report its result as the return value.
    pub fn traced<T, F>(&self, call: CallNotification, body: F) -> T
    where
        F: FnOnce() -> T,
        T: Clone + Into<Value>,
    {
        let name = call.name.clone();
        let scope = call.scope.clone();
        self.call(call);
        let result = body();
        let mut ret = ReturnNotification::new(name, result.clone());
        ret.scope = scope;
        self.ret(ret);
        result
    }
}

/// A closure traced through a [`Probe`].
pub struct Workload<F, E> {
    body: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> Workload<F, E>
where
    F: FnOnce(&Probe<'_>) -> Result<(), E>,
{
    pub fn new(body: F) -> Self {
        Self {
            body,
            _error: PhantomData,
        }
    }
}

impl<F, E> Instrumentation for Workload<F, E>
where
    F: FnOnce(&Probe<'_>) -> Result<(), E>,
{
    type Error = E;

    fn run(self, sink: &mut dyn NotificationSink) -> Result<(), E> {
        let probe = Probe::new(sink);
        let result = (self.body)(&probe);
        probe.disable();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_probe_stamps_missing_times() {
        let mut recorded: Vec<Notification> = Vec::new();
        let probe = Probe::new(&mut recorded);
        probe.call(CallNotification::new("a"));
        probe.ret(ReturnNotification::new("a", ()).at_time(42.0));
        drop(probe);

        match &recorded[0] {
            Notification::Call(call) => assert!(call.at.is_some()),
            other => panic!("Expected call, got {:?}", other),
        }
        match &recorded[1] {
            Notification::Return(ret) => assert_eq!(ret.at, Some(42.0)),
            other => panic!("Expected return, got {:?}", other),
        }
    }

    #[rstest]
    fn test_disabled_probe_delivers_nothing() {
        let mut recorded: Vec<Notification> = Vec::new();
        let probe = Probe::new(&mut recorded);
        probe.disable();
        probe.call(CallNotification::new("a"));
        assert!(!probe.is_enabled());
        drop(probe);
        assert!(recorded.is_empty());
    }

    #[rstest]
    fn test_traced_reports_return_value() {
        let mut recorded: Vec<Notification> = Vec::new();
        let probe = Probe::new(&mut recorded);
        let out = probe.traced(CallNotification::new("add").in_scope("Math"), || 2i64 + 3);
        drop(probe);

        assert_eq!(out, 5);
        assert_eq!(recorded.len(), 2);
        match &recorded[1] {
            Notification::Return(ret) => {
                assert_eq!(ret.value, Some(Value::Int(5)));
                assert_eq!(ret.scope.as_deref(), Some("Math"));
            }
            other => panic!("Expected return, got {:?}", other),
        }
    }

    #[rstest]
    fn test_workload_error_is_returned() {
        let mut recorded: Vec<Notification> = Vec::new();
        let workload = Workload::new(|probe: &Probe<'_>| {
            probe.call(CallNotification::new("boom"));
            Err("exploded")
        });
        let result = workload.run(&mut recorded);
        assert_eq!(result, Err("exploded"));
        assert_eq!(recorded.len(), 1);
    }
}
