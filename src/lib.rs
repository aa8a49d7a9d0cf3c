//! Typed genetic-programming representation of machine learning pipelines.
//!
//! A [`SearchSpace`] of operators and hyperparameter values is compiled into a
//! [`PrimitiveSet`]; individuals are sampled from it, mutated in place, and
//! written to or read from their canonical pipeline string.

pub mod config;
pub mod error;
pub mod functions;
pub mod generation;
pub mod types;

pub use crate::config::{AppConfig, ConfigManager, GenerationConfig, OperatorDescriptor, SearchSpace};
pub use error::{AutolError, Result};
pub use functions::{CheckRegistry, ParameterCheck};
pub use generation::{Individual, Population, PrimitiveNode, PrimitiveSet, Terminal};
pub use types::{HyperparameterValue, OperatorRole, DATA_TERMINAL, PREDICTION};
