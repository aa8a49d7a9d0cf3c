use crate::types::HyperparameterValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete value for a specific hyperparameter of an operator.
///
/// `output` is the hyperparameter name (`alpha`), `identifier` the type the
/// terminal satisfies (`BernoulliNB.alpha`, or `alpha` when shared). Terminals
/// are interchangeable only when their identifiers match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terminal {
    value: HyperparameterValue,
    output: String,
    identifier: String,
}

impl Terminal {
    pub fn new(
        value: HyperparameterValue,
        output: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            value,
            output: output.into(),
            identifier: identifier.into(),
        }
    }

    pub fn value(&self) -> &HyperparameterValue {
        &self.value
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn format_value(&self) -> String {
        self.value.to_string()
    }

    /// `identifier=value`, the form used inside pipeline strings.
    pub fn repr(&self) -> String {
        format!("{}={}", self.identifier, self.value)
    }
}

/// `output=value`; the sort key for terminals within one node.
impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.output, self.value)
    }
}
