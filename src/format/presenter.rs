use super::Formatter;
use crate::types::{Event, Node};

/// A node seen through a formatter.
pub struct Presenter<'a> {
    node: &'a Node,
    formatter: &'a dyn Formatter,
}

impl<'a> Presenter<'a> {
    pub fn new(node: &'a Node, formatter: &'a dyn Formatter) -> Self {
        Self { node, formatter }
    }

    /// "Scope#name(params)".
    pub fn signature(&self) -> String {
        format!(
            "{}({})",
            self.node.qualified_name(),
            self.formatter.parameters(&self.node.parameters)
        )
    }

    /// " -> value", or nothing when no value was captured.
    fn returned(&self) -> String {
        self.node
            .return_value
            .as_ref()
            .map(|v| format!(" -> {}", self.formatter.value(v)))
            .unwrap_or_default()
    }

    fn timing(&self) -> String {
        self.node
            .duration()
            .map(|d| format!(" ({})", self.formatter.duration(d)))
            .unwrap_or_default()
    }

    /// The line text for this node, without indentation.
    pub fn content(&self) -> String {
        match self.node.event {
            Event::Call => self.signature(),
            Event::CallReturn => format!("{}{}{}", self.signature(), self.returned(), self.timing()),
            Event::Return => format!("{}{}{}", self.node.qualified_name(), self.returned(), self.timing()),
        }
    }

    /// Short "file:line" of the call site, for opening nodes only.
    pub fn location(&self) -> Option<String> {
        if self.node.is_return() {
            return None;
        }
        self.node.origin.as_ref().and_then(|o| o.format_location(true))
    }
}
