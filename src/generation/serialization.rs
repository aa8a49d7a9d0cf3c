//! Canonical text form of an individual.
//!
//! Operators are written as nested calls with the node closest to the raw data
//! innermost, each followed by its terminals as `identifier=value`:
//!
//! ```text
//! BernoulliNB(MinMaxScaler(data), alpha=1.0, BernoulliNB.fit_prior=True)
//! ```
//!
//! Terminals of one node are ordered by their `hyperparameter=value` form, so the
//! text does not depend on construction order. String values are single-quoted with
//! `'` and `\` escaped by a backslash.

use super::{
    individual::Individual,
    primitive::PrimitiveNode,
    primitive_set::PrimitiveSet,
    terminal::Terminal,
};
use crate::error::{AutolError, Result};
use crate::types::DATA_TERMINAL;
use std::sync::Arc;

pub fn to_pipeline_string(individual: &Individual) -> String {
    individual
        .primitives()
        .into_iter()
        .rev()
        .fold(DATA_TERMINAL.to_string(), |inner, node| {
            let mut terminals: Vec<&Terminal> = node.terminals().iter().collect();
            terminals.sort_by_cached_key(|t| t.to_string());

            if terminals.is_empty() {
                format!("{}({})", node.primitive(), inner)
            } else {
                let terminal_str = terminals
                    .iter()
                    .map(|t| t.repr())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({}, {})", node.primitive(), inner, terminal_str)
            }
        })
}

pub fn from_pipeline_string(text: &str, primitive_set: &PrimitiveSet) -> Result<Individual> {
    let chain = PipelineParser::new(text, primitive_set).parse()?;
    let individual = Individual::from_chain(chain)?;
    log::debug!("Parsed pipeline of {} primitives", individual.len());
    Ok(individual)
}

struct PipelineParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    primitive_set: &'a PrimitiveSet,
}

impl<'a> PipelineParser<'a> {
    fn new(text: &'a str, primitive_set: &'a PrimitiveSet) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            primitive_set,
        }
    }

    /// Reads every `Name(` opening up to `data` first, then closes the nodes from the
    /// innermost outwards, so nesting depth never grows the call stack.
    fn parse(mut self) -> Result<Vec<PrimitiveNode>> {
        let mut openings = Vec::new();
        loop {
            let name = self.name()?;
            self.skip_whitespace();
            if self.peek() == Some(b'(') {
                self.pos += 1;
                openings.push(name);
            } else if name != DATA_TERMINAL {
                return Err(self.malformed(&format!(
                    "expected '{}' or a primitive, found '{}'",
                    DATA_TERMINAL, name
                )));
            } else if openings.is_empty() {
                return Err(self.malformed("expected a primitive"));
            } else {
                break;
            }
        }

        let mut chain = Vec::with_capacity(openings.len());
        for name in openings.into_iter().rev() {
            let terminals = self.terminal_group()?;
            chain.push(self.resolve(name, &terminals)?);
        }
        chain.reverse();

        self.skip_whitespace();
        if self.pos < self.bytes.len() {
            return Err(self.malformed("unexpected trailing input"));
        }
        Ok(chain)
    }

    /// `[, identifier=value]* )`, closing the innermost open node.
    fn terminal_group(&mut self) -> Result<Vec<(&'a str, &'a str)>> {
        let mut terminals = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b')') => {
                    self.pos += 1;
                    return Ok(terminals);
                }
                Some(b',') => {
                    self.pos += 1;
                    terminals.push(self.terminal()?);
                }
                _ => return Err(self.malformed("expected ',' or ')'")),
            }
        }
    }

    fn terminal(&mut self) -> Result<(&'a str, &'a str)> {
        let identifier = self.name()?;
        self.skip_whitespace();
        self.expect(b'=')?;
        self.skip_whitespace();

        let start = self.pos;
        if self.peek() == Some(b'\'') {
            self.pos += 1;
            while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\'' {
                // Backslash escapes the next byte.
                if self.bytes[self.pos] == b'\\' {
                    self.pos += 1;
                }
                self.pos += 1;
            }
            if self.pos >= self.bytes.len() {
                return Err(self.malformed("unterminated string value"));
            }
            self.pos += 1;
        } else {
            while self.pos < self.bytes.len() && !matches!(self.bytes[self.pos], b',' | b')') {
                self.pos += 1;
            }
        }

        let value = self.text[start..self.pos].trim_end();
        if value.is_empty() {
            return Err(self.malformed(&format!("missing value for {}", identifier)));
        }
        Ok((identifier, value))
    }

    fn resolve(&self, name: &str, terminals: &[(&str, &str)]) -> Result<PrimitiveNode> {
        let primitive = self
            .primitive_set
            .find_primitive(name)
            .ok_or_else(|| AutolError::UnknownPrimitive(name.to_string()))?;

        let resolved = terminals
            .iter()
            .map(|&(identifier, value)| {
                self.primitive_set
                    .find_terminal(identifier, value)
                    .cloned()
                    .ok_or_else(|| AutolError::UnknownTerminal(format!("{}={}", identifier, value)))
            })
            .collect::<Result<Vec<Terminal>>>()?;

        PrimitiveNode::new(Arc::clone(primitive), resolved)
    }

    fn name(&mut self) -> Result<&'a str> {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos < self.bytes.len()
            && (self.bytes[self.pos].is_ascii_alphanumeric() || matches!(self.bytes[self.pos], b'_' | b'.'))
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.malformed("expected a name"));
        }
        Ok(&self.text[start..self.pos])
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.malformed(&format!("expected '{}'", byte as char)))
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn malformed(&self, reason: &str) -> AutolError {
        AutolError::MalformedPipeline(format!("{} at position {} in '{}'", reason, self.pos, self.text))
    }
}
