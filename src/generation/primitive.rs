use super::terminal::Terminal;
use crate::error::{AutolError, Result};
use crate::types::OperatorRole;
use std::fmt;
use std::sync::Arc;

/// An operator that consumes data plus hyperparameter terminals and produces `output`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Primitive {
    input: Vec<String>,
    output: String,
    name: String,
    role: OperatorRole,
}

impl Primitive {
    pub fn new(name: impl Into<String>, role: OperatorRole, input: Vec<String>) -> Self {
        Self {
            input,
            output: role.output_type().to_string(),
            name: name.into(),
            role,
        }
    }

    /// Terminal identifiers this primitive requires, one terminal each.
    pub fn input(&self) -> &[String] {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> OperatorRole {
        self.role
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// What a node reads its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    /// The raw input dataset.
    Data,
    /// Another node in the same individual's arena.
    Node(usize),
}

/// A primitive instantiated with terminals.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveNode {
    primitive: Arc<Primitive>,
    terminals: Vec<Terminal>,
    pub(crate) upstream: Upstream,
}

impl PrimitiveNode {
    /// A node with exactly one terminal per required input of `primitive`.
    ///
    /// Terminals are kept sorted by their display form so node output is deterministic.
    pub fn new(primitive: Arc<Primitive>, mut terminals: Vec<Terminal>) -> Result<Self> {
        for (i, terminal) in terminals.iter().enumerate() {
            let required = primitive.input().iter().any(|needed| needed == terminal.identifier());
            let duplicate = terminals[..i]
                .iter()
                .any(|earlier| earlier.identifier() == terminal.identifier());
            if !required || duplicate {
                return Err(AutolError::UnexpectedTerminal {
                    primitive: primitive.name().to_string(),
                    identifier: terminal.identifier().to_string(),
                });
            }
        }

        let missing: Vec<String> = primitive
            .input()
            .iter()
            .filter(|needed| !terminals.iter().any(|t| t.identifier() == needed.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(AutolError::MissingRequiredTerminal {
                primitive: primitive.name().to_string(),
                missing,
            });
        }

        terminals.sort_by_cached_key(|t| t.to_string());
        Ok(Self {
            primitive,
            terminals,
            upstream: Upstream::Data,
        })
    }

    pub fn primitive(&self) -> &Arc<Primitive> {
        &self.primitive
    }

    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    pub fn upstream(&self) -> Upstream {
        self.upstream
    }

    pub(crate) fn terminals_mut(&mut self) -> &mut [Terminal] {
        &mut self.terminals
    }
}
