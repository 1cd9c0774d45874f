//! Raw notifications delivered by an instrumentation source.

use serde::{Deserialize, Serialize};

use super::{Origin, Parameter, Value};

/// Source position reported with a notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub path: String,
    pub line: u32,
}

/// A routine was entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallNotification {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    /// Seconds since the trace started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<f64>,
}

impl CallNotification {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: None,
            parameters: Vec::new(),
            location: None,
            at: None,
        }
    }

    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn at_location(mut self, path: impl Into<String>, line: u32) -> Self {
        self.location = Some(SourceLocation {
            path: path.into(),
            line,
        });
        self
    }

    pub fn at_time(mut self, at: f64) -> Self {
        self.at = Some(at);
        self
    }

    /// Provenance for the node this call will become, if any was reported.
    pub fn origin(&self) -> Option<Origin> {
        if self.scope.is_none() && self.location.is_none() {
            return None;
        }
        Some(Origin {
            scope: self.scope.clone(),
            location: self.location.clone(),
        })
    }
}

/// A routine returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnNotification {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<f64>,
}

impl ReturnNotification {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            scope: None,
            value: Some(value.into()),
            location: None,
            at: None,
        }
    }

    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn at_time(mut self, at: f64) -> Self {
        self.at = Some(at);
        self
    }
}

/// One line of a recorded stream, or one event from a live probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum Notification {
    Call(CallNotification),
    Return(ReturnNotification),
}

impl Notification {
    pub fn name(&self) -> &str {
        match self {
            Notification::Call(call) => &call.name,
            Notification::Return(ret) => &ret.name,
        }
    }
}

impl From<CallNotification> for Notification {
    fn from(call: CallNotification) -> Self {
        Notification::Call(call)
    }
}

impl From<ReturnNotification> for Notification {
    fn from(ret: ReturnNotification) -> Self {
        Notification::Return(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParamKind;
    use rstest::rstest;

    #[rstest]
    fn test_call_line_deserialization() {
        let line = r#"{"event":"call","name":"fetch","scope":"Repo","parameters":[{"kind":"required","name":"id","value":{"type":"int","value":5}},{"kind":"block","name":"blk"}],"location":{"path":"lib/repo.rb","line":3},"at":0.5}"#;
        let notification: Notification = serde_json::from_str(line).unwrap();
        match notification {
            Notification::Call(call) => {
                assert_eq!(call.name, "fetch");
                assert_eq!(call.parameters.len(), 2);
                assert_eq!(call.parameters[1].kind, ParamKind::Block);
                assert_eq!(call.parameters[1].value, None);
                let origin = call.origin().unwrap();
                assert_eq!(origin.scope.as_deref(), Some("Repo"));
                assert_eq!(origin.location.map(|loc| loc.line), Some(3));
            }
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[rstest]
    fn test_return_line_minimal() {
        let line = r#"{"event":"return","name":"fetch"}"#;
        let notification: Notification = serde_json::from_str(line).unwrap();
        assert_eq!(notification.name(), "fetch");
        assert!(matches!(notification, Notification::Return(ReturnNotification { value: None, .. })));
    }

    #[rstest]
    fn test_origin_keeps_scope_without_location() {
        let call = CallNotification::new("a").in_scope("Foo");
        let origin = call.origin().unwrap();
        assert_eq!(origin.scope.as_deref(), Some("Foo"));
        assert_eq!(origin.location, None);

        assert_eq!(CallNotification::new("a").origin(), None);
    }
}
