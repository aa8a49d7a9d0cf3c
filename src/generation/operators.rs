use super::{
    generator::random_primitive_node,
    individual::Individual,
    primitive_set::PrimitiveSet,
};
use crate::error::Result;
use rand::seq::SliceRandom;
use rand::Rng;

/// Replace one terminal with a different value of the same hyperparameter.
///
/// Returns `Ok(false)` when no terminal has an alternative value.
pub fn mutate_replace_terminal<R: Rng + ?Sized>(
    individual: &mut Individual,
    primitive_set: &PrimitiveSet,
    rng: &mut R,
) -> Result<bool> {
    let candidates: Vec<usize> = individual
        .terminals()
        .iter()
        .enumerate()
        .filter(|(_, current)| {
            primitive_set
                .terminals(current.identifier())
                .iter()
                .any(|t| t != **current)
        })
        .map(|(position, _)| position)
        .collect();

    let Some(&position) = candidates.choose(rng) else {
        log::debug!("No terminal of {} can be replaced", individual.pipeline_str());
        return Ok(false);
    };

    let current = individual.terminals()[position].clone();
    let alternatives: Vec<_> = primitive_set
        .terminals(current.identifier())
        .iter()
        .filter(|t| **t != current)
        .collect();

    match alternatives.choose(rng) {
        Some(&replacement) => {
            individual.replace_terminal(position, replacement.clone())?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Replace one node with a node of a different primitive producing the same output.
///
/// Returns `Ok(false)` when every position's output type has a single primitive.
pub fn mutate_replace_primitive<R: Rng + ?Sized>(
    individual: &mut Individual,
    primitive_set: &PrimitiveSet,
    rng: &mut R,
) -> Result<bool> {
    let candidates: Vec<usize> = individual
        .primitives()
        .iter()
        .enumerate()
        .filter(|(_, node)| primitive_set.primitives(node.primitive().output()).len() > 1)
        .map(|(position, _)| position)
        .collect();

    let Some(&position) = candidates.choose(rng) else {
        log::debug!("No primitive of {} can be replaced", individual.pipeline_str());
        return Ok(false);
    };

    let current = individual.primitives()[position].primitive().clone();
    let replacement = random_primitive_node(current.output(), primitive_set, Some(&*current), rng)?;
    individual.replace_primitive_node(position, replacement)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::search_space::{OperatorDescriptor, SearchSpace};
    use crate::functions::registry::CheckRegistry;
    use crate::generation::generator::random_individual;
    use crate::types::{HyperparameterValue, OperatorRole};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_set() -> PrimitiveSet {
        let space = SearchSpace::new().operator(
            OperatorDescriptor::with_role("GaussianNB", OperatorRole::Classifier),
            vec![("var_smoothing", vec![HyperparameterValue::Float(1e-9)])],
        );
        PrimitiveSet::build(&space, &CheckRegistry::new()).unwrap()
    }

    #[test]
    fn test_nothing_to_mutate() {
        let set = fixed_set();
        let mut rng = StdRng::seed_from_u64(3);
        let mut individual = random_individual(&set, 1, 1, &mut rng).unwrap();
        let before = individual.pipeline_str();

        assert!(!mutate_replace_terminal(&mut individual, &set, &mut rng).unwrap());
        assert!(!mutate_replace_primitive(&mut individual, &set, &mut rng).unwrap());
        assert_eq!(individual.pipeline_str(), before);
    }

    #[test]
    fn test_terminal_with_alternative_is_replaced() {
        let space = SearchSpace::new().operator(
            OperatorDescriptor::with_role("GaussianNB", OperatorRole::Classifier),
            vec![(
                "var_smoothing",
                vec![HyperparameterValue::Float(1e-9), HyperparameterValue::Float(1e-8)],
            )],
        );
        let set = PrimitiveSet::build(&space, &CheckRegistry::new()).unwrap();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut individual = random_individual(&set, 1, 1, &mut rng).unwrap();
            let before = individual.terminals()[0].clone();

            assert!(mutate_replace_terminal(&mut individual, &set, &mut rng).unwrap());
            let after = individual.terminals()[0].clone();
            assert_ne!(after, before);
            assert_eq!(after.identifier(), before.identifier());
        }
    }
}
