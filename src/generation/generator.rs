use super::{
    individual::Individual,
    primitive::{Primitive, PrimitiveNode},
    primitive_set::PrimitiveSet,
    terminal::Terminal,
};
use crate::error::{AutolError, Result};
use crate::types::{DATA_TERMINAL, PREDICTION};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// One uniformly chosen terminal for each terminal type `primitive` requires.
pub fn random_terminals_for_primitive<R: Rng + ?Sized>(
    primitive_set: &PrimitiveSet,
    primitive: &Primitive,
    rng: &mut R,
) -> Result<Vec<Terminal>> {
    primitive
        .input()
        .iter()
        .map(|needed| {
            primitive_set
                .terminals(needed)
                .choose(rng)
                .cloned()
                .ok_or_else(|| AutolError::UnresolvedHyperparameter {
                    operator: primitive.name().to_string(),
                    hyperparameter: needed.clone(),
                })
        })
        .collect()
}

/// A node with a uniformly chosen primitive of `output_type` (other than `exclude`)
/// and random terminals.
pub fn random_primitive_node<R: Rng + ?Sized>(
    output_type: &str,
    primitive_set: &PrimitiveSet,
    exclude: Option<&Primitive>,
    rng: &mut R,
) -> Result<PrimitiveNode> {
    let candidates: Vec<&Arc<Primitive>> = primitive_set
        .primitives(output_type)
        .iter()
        .filter(|p| exclude.map_or(true, |e| ***p != *e))
        .collect();

    let primitive = candidates.choose(rng).ok_or_else(|| {
        AutolError::Generation(format!("No primitives available with output {}", output_type))
    })?;

    let terminals = random_terminals_for_primitive(primitive_set, primitive, rng)?;
    PrimitiveNode::new(Arc::clone(primitive), terminals)
}

/// A random pipeline of uniformly chosen length in `[min_length, max_length]`:
/// a learner fed by `length - 1` data primitives.
pub fn random_individual<R: Rng + ?Sized>(
    primitive_set: &PrimitiveSet,
    min_length: usize,
    max_length: usize,
    rng: &mut R,
) -> Result<Individual> {
    if min_length < 1 || max_length < min_length {
        return Err(AutolError::Generation(format!(
            "Invalid pipeline length bounds [{}, {}]",
            min_length, max_length
        )));
    }

    let length = rng.gen_range(min_length..=max_length);
    let mut chain = Vec::with_capacity(length);
    chain.push(random_primitive_node(PREDICTION, primitive_set, None, rng)?);
    for _ in 1..length {
        chain.push(random_primitive_node(DATA_TERMINAL, primitive_set, None, rng)?);
    }

    let individual = Individual::from_chain(chain)?;
    log::trace!("Generated {}", individual.pipeline_str());
    Ok(individual)
}
