//! Core types for representing the flattened call tree.

use serde::{Deserialize, Serialize};

use super::{SourceLocation, Value};

/// What a node in the flat sequence stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// A call that had nested calls; its `Return` follows its children.
    Call,
    /// Closes a `Call` at the same depth.
    Return,
    /// A leaf call merged with its return.
    CallReturn,
}

impl Event {
    /// Whether the node opens a call (and can therefore be an ancestor).
    pub fn opens_call(self) -> bool {
        matches!(self, Event::Call | Event::CallReturn)
    }
}

/// How a parameter was declared by the invoked routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Required,
    Optional,
    RequiredKeyword,
    OptionalKeyword,
    Rest,
    KeywordRest,
    Block,
    Unknown,
}

/// A single captured parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub kind: ParamKind,
    pub name: String,
    /// Absent when the value could not be resolved at capture time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Parameter {
    pub fn new(kind: ParamKind, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn required(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(ParamKind::Required, name, value)
    }

    /// A parameter whose value could not be captured.
    pub fn unresolved(kind: ParamKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: None,
        }
    }
}

/// Where a call came from. Scope and source position are reported
/// independently; either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin {
    /// Class or module the routine is defined in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl Origin {
    pub fn at(path: impl Into<String>, line: u32) -> Self {
        Self {
            scope: None,
            location: Some(SourceLocation {
                path: path.into(),
                line,
            }),
        }
    }

    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Format as "file.rb:12", optionally dropping the directory part.
    pub fn format_location(&self, short: bool) -> Option<String> {
        let loc = self.location.as_ref()?;
        let path = if short {
            loc.path.rsplit('/').next().unwrap_or(&loc.path)
        } else {
            loc.path.as_str()
        };
        Some(format!("{}:{}", path, loc.line))
    }
}

/// One entry of the finalized, pre-order node sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub event: Event,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
    pub depth: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
}

impl Node {
    /// Create a bare node with no parameters, value, origin or timing.
    pub fn new(event: Event, name: impl Into<String>, depth: usize) -> Self {
        Self {
            event,
            name: name.into(),
            parameters: Vec::new(),
            return_value: None,
            depth,
            origin: None,
            start_time: None,
            end_time: None,
        }
    }

    /// Seconds between start and end, when both are known.
    pub fn duration(&self) -> Option<f64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// The defining scope recorded in the origin, if any.
    pub fn scope(&self) -> Option<&str> {
        self.origin.as_ref().and_then(|o| o.scope.as_deref())
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.origin.as_ref().and_then(|o| o.location.as_ref())
    }

    /// Format as "Scope#name", or just "name" when no scope is known.
    pub fn qualified_name(&self) -> String {
        qualify(self.scope(), &self.name)
    }

    pub fn is_return(&self) -> bool {
        self.event == Event::Return
    }
}

/// Join a scope and a routine name the way names are displayed and matched.
pub fn qualify(scope: Option<&str>, name: &str) -> String {
    match scope {
        Some(scope) if !scope.is_empty() => format!("{}#{}", scope, name),
        _ => name.to_string(),
    }
}

/// Value-typed record of a node for serializers.
///
/// A pure mapping of [`Node`]: no behavior, plus the derived duration so
/// encoders do not have to compute it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub event: Event,
    pub name: String,
    pub depth: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            event: node.event,
            name: node.name.clone(),
            depth: node.depth,
            parameters: node.parameters.clone(),
            return_value: node.return_value.clone(),
            scope: node.scope().map(str::to_string),
            file: node.location().map(|loc| loc.path.clone()),
            line: node.location().map(|loc| loc.line),
            duration: node.duration(),
        }
    }
}
