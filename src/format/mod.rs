//! Text presentation of nodes.
//!
//! [`Formatter`] turns values, parameters and durations into text; the
//! [`Presenter`] combines a node with a formatter into the line content shown
//! by the table output and the interactive navigator.

mod presenter;

pub use presenter::Presenter;

use crate::types::{Node, ParamKind, Parameter, Value};

/// Renders captured data as text.
pub trait Formatter {
    fn value(&self, value: &Value) -> String;

    fn parameter(&self, parameter: &Parameter) -> String {
        let rendered = parameter
            .value
            .as_ref()
            .map(|v| self.value(v))
            .unwrap_or_else(|| "?".to_string());
        let name = &parameter.name;
        match parameter.kind {
            ParamKind::Required | ParamKind::Optional | ParamKind::Unknown => {
                format!("{} = {}", name, rendered)
            }
            ParamKind::RequiredKeyword | ParamKind::OptionalKeyword => format!("{}: {}", name, rendered),
            ParamKind::Rest => format!("*{} = {}", name, rendered),
            ParamKind::KeywordRest => format!("**{} = {}", name, rendered),
            ParamKind::Block => format!("&{}", name),
        }
    }

    fn parameters(&self, parameters: &[Parameter]) -> String {
        parameters
            .iter()
            .map(|p| self.parameter(p))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn duration(&self, seconds: f64) -> String {
        if seconds < 0.001 {
            format!("{:.1}µs", seconds * 1_000_000.0)
        } else if seconds < 1.0 {
            format!("{:.2}ms", seconds * 1_000.0)
        } else {
            format!("{:.3}s", seconds)
        }
    }
}

/// Uncolored formatter with optional truncation of long values.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter {
    max_width: Option<usize>,
}

impl PlainFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cut rendered values longer than `width` characters.
    pub fn with_max_width(width: usize) -> Self {
        Self {
            max_width: Some(width.max(2)),
        }
    }

    fn render(&self, value: &Value) -> String {
        match value {
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => format!("{:?}", f),
            Value::Str(s) => format!("{:?}", s),
            Value::Symbol(s) => format!(":{}", s),
            Value::Array(items) => {
                let inner: Vec<String> = items.iter().map(|v| self.render(v)).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Map(pairs) => {
                if pairs.is_empty() {
                    return "{}".to_string();
                }
                let inner: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| match k {
                        Value::Symbol(s) => format!("{}: {}", s, self.render(v)),
                        _ => format!("{} => {}", self.render(k), self.render(v)),
                    })
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            Value::Opaque { inspect, .. } => inspect.clone(),
        }
    }
}

impl Formatter for PlainFormatter {
    fn value(&self, value: &Value) -> String {
        let rendered = self.render(value);
        match self.max_width {
            Some(width) if rendered.chars().count() > width => {
                let cut: String = rendered.chars().take(width - 1).collect();
                format!("{}…", cut)
            }
            _ => rendered,
        }
    }
}

/// Render a node sequence as an indented text tree, one line per node.
pub fn text_lines(nodes: &[Node], formatter: &dyn Formatter) -> Vec<String> {
    nodes
        .iter()
        .map(|node| {
            let presenter = Presenter::new(node, formatter);
            let mut line = format!("{}{}", "  ".repeat(node.depth), presenter.content());
            if let Some(location) = presenter.location() {
                line.push_str("  ");
                line.push_str(&location);
            }
            line
        })
        .collect()
}
