use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Output type of the raw-data sentinel and of every data-transforming primitive.
pub const DATA_TERMINAL: &str = "data";

/// Output type of primitives that produce predictions (the pipeline's learner).
pub const PREDICTION: &str = "prediction";

/// Role of an operator, decided once when the search space is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorRole {
    Transformer, // preprocessing, feature selection, data transformation
    Classifier,
    Regressor,
}

impl OperatorRole {
    /// Resolve a role from capability tags. Transformer tags win over learner tags.
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Option<Self> {
        let has = |candidates: &[&str]| {
            tags.iter()
                .any(|tag| candidates.iter().any(|c| tag.as_ref().eq_ignore_ascii_case(c)))
        };

        if has(&["DATA_PREPROCESSING", "FEATURE_SELECTION", "DATA_TRANSFORMATION", "TRANSFORMER"]) {
            Some(OperatorRole::Transformer)
        } else if has(&["CLASSIFICATION", "CLASSIFIER"]) {
            Some(OperatorRole::Classifier)
        } else if has(&["REGRESSION", "REGRESSOR"]) {
            Some(OperatorRole::Regressor)
        } else {
            None
        }
    }

    /// Catalog key under which primitives of this role are registered.
    pub fn output_type(&self) -> &'static str {
        match self {
            OperatorRole::Transformer => DATA_TERMINAL,
            OperatorRole::Classifier | OperatorRole::Regressor => PREDICTION,
        }
    }
}

/// A single allowed value for a hyperparameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HyperparameterValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A function-valued hyperparameter, rendered by name (e.g. a scoring function).
    Callable { callable: String },
}

impl HyperparameterValue {
    pub fn callable(name: impl Into<String>) -> Self {
        HyperparameterValue::Callable { callable: name.into() }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HyperparameterValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HyperparameterValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Formats values the way pipeline strings have always shown them:
/// quoted strings, `True`/`False`, `None`, floats with a fractional part.
/// A `'` or `\` inside a string is escaped with a backslash.
impl fmt::Display for HyperparameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HyperparameterValue::None => write!(f, "None"),
            HyperparameterValue::Bool(true) => write!(f, "True"),
            HyperparameterValue::Bool(false) => write!(f, "False"),
            HyperparameterValue::Int(v) => write!(f, "{}", v),
            HyperparameterValue::Float(v) => write!(f, "{:?}", v),
            HyperparameterValue::Str(s) => {
                f.write_char('\'')?;
                for c in s.chars() {
                    if matches!(c, '\'' | '\\') {
                        f.write_char('\\')?;
                    }
                    f.write_char(c)?;
                }
                f.write_char('\'')
            }
            HyperparameterValue::Callable { callable } => write!(f, "{}", callable),
        }
    }
}

impl From<i64> for HyperparameterValue {
    fn from(v: i64) -> Self {
        HyperparameterValue::Int(v)
    }
}

impl From<f64> for HyperparameterValue {
    fn from(v: f64) -> Self {
        HyperparameterValue::Float(v)
    }
}

impl From<bool> for HyperparameterValue {
    fn from(v: bool) -> Self {
        HyperparameterValue::Bool(v)
    }
}

impl From<&str> for HyperparameterValue {
    fn from(v: &str) -> Self {
        HyperparameterValue::Str(v.to_string())
    }
}
