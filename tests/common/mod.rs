#![allow(dead_code)]

use autol::{CheckRegistry, HyperparameterValue, OperatorDescriptor, OperatorRole, PrimitiveSet, SearchSpace};

pub const CLASSIFICATION_SPACE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/classification.toml");

pub fn classification_set() -> PrimitiveSet {
    let space = SearchSpace::from_file(CLASSIFICATION_SPACE).unwrap();
    PrimitiveSet::build(&space, &CheckRegistry::with_builtins()).unwrap()
}

/// `OpA` predicts with `h1` in {1, 2}; `OpB` transforms with `h2` in {3}.
pub fn example_space() -> SearchSpace {
    SearchSpace::new()
        .operator(
            OperatorDescriptor::with_role("OpA", OperatorRole::Classifier),
            vec![("h1", vec![HyperparameterValue::Int(1), HyperparameterValue::Int(2)])],
        )
        .operator(
            OperatorDescriptor::with_role("OpB", OperatorRole::Transformer),
            vec![("h2", vec![HyperparameterValue::Int(3)])],
        )
}

pub fn example_set() -> PrimitiveSet {
    PrimitiveSet::build(&example_space(), &CheckRegistry::new()).unwrap()
}
