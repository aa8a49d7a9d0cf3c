use super::{
    fitness::Fitness,
    primitive::{PrimitiveNode, Upstream},
    primitive_set::PrimitiveSet,
    serialization,
    terminal::Terminal,
};
use crate::error::{AutolError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A machine learning pipeline: a chain of primitive nodes from the learner
/// (the root) back to the raw data.
///
/// Nodes live in an arena owned by the individual and link upstream by index,
/// so no two individuals ever share a node.
#[derive(Debug)]
pub struct Individual {
    id: Uuid,
    pub fitness: Fitness,
    nodes: Vec<PrimitiveNode>,
    root: usize,
}

/// Serializable snapshot of an individual, for checkpoints and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualRecord {
    pub id: Uuid,
    pub pipeline: String,
    pub fitness: Fitness,
}

impl Individual {
    /// Build from nodes ordered root first, the last one reading raw data.
    pub fn from_chain(chain: Vec<PrimitiveNode>) -> Result<Self> {
        if chain.is_empty() {
            return Err(AutolError::Generation(
                "An individual needs at least one primitive".to_string(),
            ));
        }
        Ok(Self::assemble(chain))
    }

    fn assemble(chain: Vec<PrimitiveNode>) -> Self {
        let last = chain.len().saturating_sub(1);
        let nodes = chain
            .into_iter()
            .enumerate()
            .map(|(i, mut node)| {
                node.upstream = if i == last { Upstream::Data } else { Upstream::Node(i + 1) };
                node
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            fitness: Fitness::default(),
            nodes,
            root: 0,
        }
    }

    /// Parse a pipeline string against the primitive set.
    pub fn from_string(text: &str, primitive_set: &PrimitiveSet) -> Result<Self> {
        serialization::from_pipeline_string(text, primitive_set)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The learner node.
    pub fn main_node(&self) -> &PrimitiveNode {
        &self.nodes[self.root]
    }

    fn chain(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.nodes.len());
        let mut current = Upstream::Node(self.root);
        while let Upstream::Node(index) = current {
            indices.push(index);
            current = self.nodes[index].upstream;
        }
        indices
    }

    /// Nodes from the root to the one reading raw data.
    pub fn primitives(&self) -> Vec<&PrimitiveNode> {
        self.chain().into_iter().map(|i| &self.nodes[i]).collect()
    }

    /// Terminals of all nodes in chain order; positions index into this list.
    pub fn terminals(&self) -> Vec<&Terminal> {
        self.primitives()
            .into_iter()
            .flat_map(|node| node.terminals())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.chain().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the terminal at `position` with one of the same identifier.
    pub fn replace_terminal(&mut self, position: usize, new_terminal: Terminal) -> Result<()> {
        let mut scan_position = 0;
        for index in self.chain() {
            let count = self.nodes[index].terminals().len();
            if scan_position + count > position {
                let slot = &mut self.nodes[index].terminals_mut()[position - scan_position];
                if slot.identifier() != new_terminal.identifier() {
                    return Err(AutolError::IncompatibleTerminalType {
                        position,
                        expected: slot.identifier().to_string(),
                        actual: new_terminal.identifier().to_string(),
                    });
                }
                *slot = new_terminal;
                return Ok(());
            }
            scan_position += count;
        }

        Err(AutolError::PositionOutOfRange {
            position,
            len: scan_position,
        })
    }

    /// Replace the node at `position` (0 = root) with one producing the same output.
    /// The replacement takes over the replaced node's upstream.
    pub fn replace_primitive_node(&mut self, position: usize, mut new_node: PrimitiveNode) -> Result<()> {
        let chain = self.chain();
        let index = *chain.get(position).ok_or(AutolError::PositionOutOfRange {
            position,
            len: chain.len(),
        })?;

        let existing = &self.nodes[index];
        if existing.primitive().output() != new_node.primitive().output() {
            return Err(AutolError::IncompatibleOutputType {
                position,
                expected: existing.primitive().output().to_string(),
                actual: new_node.primitive().output().to_string(),
            });
        }

        new_node.upstream = existing.upstream;
        self.nodes[index] = new_node;
        Ok(())
    }

    /// Deep copy with a new id and empty fitness.
    pub fn copy_as_new(&self) -> Self {
        Self::assemble(self.primitives().into_iter().cloned().collect())
    }

    /// Coarse gate for crossover: both have at least two primitives, or they share one.
    pub fn can_mate_with(&self, other: &Individual) -> bool {
        let own = self.primitives();
        let others = other.primitives();

        let both_at_least_length_2 = own.len() >= 2 && others.len() >= 2;
        both_at_least_length_2
            || own
                .iter()
                .any(|node| others.iter().any(|o| o.primitive() == node.primitive()))
    }

    /// Whether every node passes its operator's validity check, if it has one.
    pub fn satisfies_checks(&self, primitive_set: &PrimitiveSet) -> bool {
        self.primitives()
            .into_iter()
            .all(|node| primitive_set.satisfies_checks(node))
    }

    pub fn pipeline_str(&self) -> String {
        serialization::to_pipeline_string(self)
    }

    pub fn to_record(&self) -> IndividualRecord {
        IndividualRecord {
            id: self.id,
            pipeline: self.pipeline_str(),
            fitness: self.fitness.clone(),
        }
    }

    /// Restore a checkpointed individual, keeping its id and fitness.
    pub fn from_record(record: &IndividualRecord, primitive_set: &PrimitiveSet) -> Result<Self> {
        let mut individual = Self::from_string(&record.pipeline, primitive_set)?;
        individual.id = record.id;
        individual.fitness = record.fitness.clone();
        Ok(individual)
    }
}

impl PartialEq for Individual {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Individual {}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Individual {}\nPipeline: {}\nFitness: {}",
            self.id,
            self.pipeline_str(),
            self.fitness
        )
    }
}
