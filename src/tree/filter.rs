//! Inclusion/exclusion filtering of calls.
//!
//! A call is kept when no inclusion criteria are configured or at least one
//! matches, and no exclusion criterion matches.

use std::fmt;

use enum_dispatch::enum_dispatch;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{qualify, CallNotification};

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Unsupported filter criterion type '{kind}' (expected 'name' or 'pattern')")]
    UnsupportedCriterion { kind: String },

    #[error("Invalid filter pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Something a call can be tested against.
#[enum_dispatch]
pub trait Matches {
    fn matches(&self, name: &str, scope: Option<&str>, raw: &CallNotification) -> bool;
}

/// Exact match against either the bare name or "Scope#name".
#[derive(Debug, Clone)]
pub struct ExactName(pub String);

impl Matches for ExactName {
    fn matches(&self, name: &str, scope: Option<&str>, _raw: &CallNotification) -> bool {
        self.0 == name || self.0 == qualify(scope, name)
    }
}

/// Regex searched in "Scope#name" (or the bare name when there is no scope).
#[derive(Debug, Clone)]
pub struct NamePattern(pub Regex);

impl NamePattern {
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|e| FilterError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }
}

impl Matches for NamePattern {
    fn matches(&self, name: &str, scope: Option<&str>, _raw: &CallNotification) -> bool {
        self.0.is_match(&qualify(scope, name))
    }
}

type PredicateFn = dyn Fn(&str, Option<&str>, &CallNotification) -> bool;

/// Arbitrary caller-supplied test.
pub struct Predicate(Box<PredicateFn>);

impl Predicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, Option<&str>, &CallNotification) -> bool + 'static,
    {
        Self(Box::new(f))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

impl Matches for Predicate {
    fn matches(&self, name: &str, scope: Option<&str>, raw: &CallNotification) -> bool {
        (self.0)(name, scope, raw)
    }
}

#[enum_dispatch(Matches)]
#[derive(Debug)]
pub enum Criterion {
    ExactName,
    NamePattern,
    Predicate,
}

impl Criterion {
    pub fn name(name: impl Into<String>) -> Self {
        ExactName(name.into()).into()
    }

    pub fn pattern(pattern: &str) -> Result<Self, FilterError> {
        NamePattern::new(pattern).map(Into::into)
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str, Option<&str>, &CallNotification) -> bool + 'static,
    {
        Predicate::new(f).into()
    }

    /// Build from a configuration entry.
    pub fn from_spec(spec: &CriterionSpec) -> Result<Self, FilterError> {
        match spec.kind.as_str() {
            "name" => Ok(Self::name(spec.value.clone())),
            "pattern" => Self::pattern(&spec.value),
            other => Err(FilterError::UnsupportedCriterion {
                kind: other.to_string(),
            }),
        }
    }
}

/// Serialized form of a criterion in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl CriterionSpec {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// What happens to the calls made inside an excluded call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilteredDescendants {
    /// Keep them, attached at the depth of the nearest surviving ancestor.
    #[default]
    Reparent,
    /// Drop the excluded call's whole subtree.
    Drop,
}

#[derive(Debug, Default)]
pub struct Filter {
    include: Vec<Criterion>,
    exclude: Vec<Criterion>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, criterion: Criterion) -> Self {
        self.include.push(criterion);
        self
    }

    pub fn exclude(mut self, criterion: Criterion) -> Self {
        self.exclude.push(criterion);
        self
    }

    /// Build from configuration entries, failing on the first bad one.
    pub fn from_specs(include: &[CriterionSpec], exclude: &[CriterionSpec]) -> Result<Self, FilterError> {
        let include = include
            .iter()
            .map(Criterion::from_spec)
            .collect::<Result<Vec<_>, _>>()?;
        let exclude = exclude
            .iter()
            .map(Criterion::from_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { include, exclude })
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn should_include(&self, name: &str, scope: Option<&str>, raw: &CallNotification) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|c| c.matches(name, scope, raw));
        included && !self.exclude.iter().any(|c| c.matches(name, scope, raw))
    }

    /// Convenience over [`Filter::should_include`] for a whole notification.
    pub fn admits(&self, call: &CallNotification) -> bool {
        self.should_include(&call.name, call.scope.as_deref(), call)
    }
}
