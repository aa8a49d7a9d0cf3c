use crate::generation::terminal::Terminal;
use crate::types::HyperparameterValue;
use std::collections::HashMap;

/// Hyperparameter values chosen for one operator, keyed by hyperparameter name.
#[derive(Debug, Clone, Default)]
pub struct Assignment<'a> {
    values: HashMap<&'a str, &'a HyperparameterValue>,
}

impl<'a> Assignment<'a> {
    pub fn from_terminals<I>(terminals: I) -> Self
    where
        I: IntoIterator<Item = &'a Terminal>,
    {
        Self {
            values: terminals
                .into_iter()
                .map(|t| (t.output(), t.value()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a HyperparameterValue> {
        self.values.get(name).copied()
    }

    pub fn str(&self, name: &str) -> Option<&'a str> {
        self.get(name).and_then(|v| v.as_str())
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|v| v.as_bool())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A predicate rejecting illegal hyperparameter combinations of an operator.
pub trait ParameterCheck: Send + Sync {
    /// Name used to reference the check from a search space (`param_check = ["name"]`).
    fn name(&self) -> &str;

    fn check(&self, assignment: &Assignment<'_>) -> bool;
}

/// Adapts a closure into a [`ParameterCheck`].
pub struct FnCheck<F> {
    name: String,
    predicate: F,
}

impl<F> FnCheck<F>
where
    F: Fn(&Assignment<'_>) -> bool + Send + Sync,
{
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<F> ParameterCheck for FnCheck<F>
where
    F: Fn(&Assignment<'_>) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, assignment: &Assignment<'_>) -> bool {
        (self.predicate)(assignment)
    }
}
