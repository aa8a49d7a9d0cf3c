mod common;

use autol::generation::{
    mutate_replace_primitive, mutate_replace_terminal, random_primitive_node, Upstream,
};
use autol::{AutolError, Individual, PrimitiveNode, PrimitiveSet, DATA_TERMINAL, PREDICTION};
use std::sync::Arc;
use rand::rngs::StdRng;
use rand::SeedableRng;

const TREE_PIPELINE: &str = "DecisionTreeClassifier(Normalizer(MinMaxScaler(data), Normalizer.norm='l2'), \
DecisionTreeClassifier.criterion='gini', DecisionTreeClassifier.max_depth=4, \
DecisionTreeClassifier.min_samples_split=2)";

fn tree(set: &PrimitiveSet) -> Individual {
    Individual::from_string(TREE_PIPELINE, set).unwrap()
}

fn node_of(set: &PrimitiveSet, pipeline: &str) -> PrimitiveNode {
    Individual::from_string(pipeline, set)
        .unwrap()
        .main_node()
        .clone()
}

#[test]
fn test_replace_terminal_in_upstream_node() {
    let set = common::classification_set();
    let mut individual = tree(&set);
    let max_norm = set.find_terminal("Normalizer.norm", "'max'").unwrap().clone();

    individual.replace_terminal(3, max_norm).unwrap();

    assert_eq!(
        individual.pipeline_str(),
        TREE_PIPELINE.replace("Normalizer.norm='l2'", "Normalizer.norm='max'")
    );
}

#[test]
fn test_replace_terminal_with_wrong_type_leaves_individual_unchanged() {
    let set = common::classification_set();
    let mut individual = tree(&set);
    let entropy = set
        .find_terminal("DecisionTreeClassifier.criterion", "'entropy'")
        .unwrap()
        .clone();

    let result = individual.replace_terminal(1, entropy);

    assert!(matches!(
        result,
        Err(AutolError::IncompatibleTerminalType { position: 1, ref expected, .. })
            if expected == "DecisionTreeClassifier.max_depth"
    ));
    assert_eq!(individual.pipeline_str(), TREE_PIPELINE);
}

#[test]
fn test_replace_terminal_past_the_end() {
    let set = common::classification_set();
    let mut individual = tree(&set);
    let l1 = set.find_terminal("Normalizer.norm", "'l1'").unwrap().clone();

    assert!(matches!(
        individual.replace_terminal(4, l1),
        Err(AutolError::PositionOutOfRange { position: 4, len: 4 })
    ));
}

#[test]
fn test_replace_only_primitive() {
    let set = common::classification_set();
    let mut individual = Individual::from_string("GaussianNB(data)", &set).unwrap();
    let bernoulli = node_of(&set, "BernoulliNB(data, alpha=0.1, fit_prior=True)");

    individual.replace_primitive_node(0, bernoulli).unwrap();

    assert_eq!(individual.len(), 1);
    assert_eq!(individual.main_node().primitive().name(), "BernoulliNB");
    assert_eq!(individual.main_node().upstream(), Upstream::Data);
    assert_eq!(individual.pipeline_str(), "BernoulliNB(data, alpha=0.1, fit_prior=True)");
}

#[test]
fn test_replace_middle_primitive_keeps_upstream() {
    let set = common::classification_set();
    let mut individual = tree(&set);
    let binarizer = Individual::from_string("GaussianNB(Binarizer(data, Binarizer.threshold=0.05))", &set)
        .unwrap()
        .primitives()[1]
        .clone();
    assert_eq!(binarizer.primitive().name(), "Binarizer");

    individual.replace_primitive_node(1, binarizer).unwrap();

    let names: Vec<&str> = individual
        .primitives()
        .iter()
        .map(|node| node.primitive().name())
        .collect();
    assert_eq!(names, vec!["DecisionTreeClassifier", "Binarizer", "MinMaxScaler"]);
    assert!(individual
        .pipeline_str()
        .starts_with("DecisionTreeClassifier(Binarizer(MinMaxScaler(data), Binarizer.threshold=0.05), "));
}

#[test]
fn test_replace_primitive_rejects_other_output_type() {
    let set = common::classification_set();
    let mut individual = tree(&set);
    let mut rng = StdRng::seed_from_u64(11);
    let transformer = random_primitive_node(DATA_TERMINAL, &set, None, &mut rng).unwrap();

    assert!(matches!(
        individual.replace_primitive_node(0, transformer.clone()),
        Err(AutolError::IncompatibleOutputType { position: 0, .. })
    ));
    assert!(matches!(
        individual.replace_primitive_node(3, transformer),
        Err(AutolError::PositionOutOfRange { position: 3, len: 3 })
    ));
    assert_eq!(individual.pipeline_str(), TREE_PIPELINE);
}

#[test]
fn test_copy_as_new_drops_fitness() {
    let set = common::classification_set();
    let mut original = tree(&set);
    original.fitness.record(vec![0.5], chrono::Utc::now(), 2.0);

    let mut copy = original.copy_as_new();
    assert_ne!(copy, original);
    assert!(!copy.fitness.is_evaluated());
    assert_eq!(copy.pipeline_str(), original.pipeline_str());

    let l1 = set.find_terminal("Normalizer.norm", "'l1'").unwrap().clone();
    copy.replace_terminal(3, l1).unwrap();
    assert_eq!(original.pipeline_str(), TREE_PIPELINE);
    assert!(original.fitness.is_evaluated());
}

#[test]
fn test_can_mate_with() {
    let set = common::classification_set();
    let gaussian = Individual::from_string("GaussianNB(data)", &set).unwrap();
    let other_gaussian = Individual::from_string("GaussianNB(MinMaxScaler(data))", &set).unwrap();
    let bernoulli = Individual::from_string("BernoulliNB(data, alpha=1.0, fit_prior=False)", &set).unwrap();
    let tree = tree(&set);

    assert!(gaussian.can_mate_with(&gaussian.copy_as_new()));
    assert!(gaussian.can_mate_with(&other_gaussian));
    assert!(!gaussian.can_mate_with(&bernoulli));
    assert!(!bernoulli.can_mate_with(&tree));
    // Two pipelines of length two or more always qualify.
    assert!(other_gaussian.can_mate_with(&tree));
    assert!(tree.can_mate_with(&other_gaussian));
}

#[test]
fn test_mutate_replace_terminal_changes_one_value() {
    let set = common::classification_set();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut individual = tree(&set);
        let before: Vec<_> = individual.terminals().into_iter().cloned().collect();

        assert!(mutate_replace_terminal(&mut individual, &set, &mut rng).unwrap());

        let after: Vec<_> = individual.terminals().into_iter().cloned().collect();
        let changed = before.iter().zip(&after).filter(|(b, a)| b != a).count();
        assert_eq!(changed, 1);
        assert!(before
            .iter()
            .zip(&after)
            .all(|(b, a)| b.identifier() == a.identifier()));
    }
}

#[test]
fn test_mutate_replace_primitive_keeps_shape() {
    let set = common::classification_set();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut individual = tree(&set);
        let before: Vec<_> = individual
            .primitives()
            .iter()
            .map(|node| node.primitive().clone())
            .collect();

        assert!(mutate_replace_primitive(&mut individual, &set, &mut rng).unwrap());

        let after = individual.primitives();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0].primitive().output(), PREDICTION);
        let changed = before
            .iter()
            .zip(&after)
            .filter(|(b, a)| **b != *a.primitive())
            .count();
        assert_eq!(changed, 1);
        assert!(Individual::from_string(&individual.pipeline_str(), &set).is_ok());
    }
}

#[test]
fn test_linear_svc_check() {
    let set = common::classification_set();
    let invalid = "LinearSVC(data, LinearSVC.C=1.0, LinearSVC.dual=True, LinearSVC.loss='hinge', \
LinearSVC.penalty='l1', LinearSVC.tol=0.01)";
    let valid = "LinearSVC(data, LinearSVC.C=1.0, LinearSVC.dual=True, LinearSVC.loss='hinge', \
LinearSVC.penalty='l2', LinearSVC.tol=0.01)";

    let invalid = Individual::from_string(invalid, &set).unwrap();
    let valid = Individual::from_string(valid, &set).unwrap();

    assert!(!invalid.satisfies_checks(&set));
    assert!(valid.satisfies_checks(&set));
    assert!(Individual::from_string("GaussianNB(data)", &set)
        .unwrap()
        .satisfies_checks(&set));
}

#[test]
fn test_replacement_node_needs_every_terminal() {
    let set = common::example_set();
    let op_a = Arc::clone(set.find_primitive("OpA").unwrap());
    let mut individual = Individual::from_string("OpA(data, OpA.h1=1)", &set).unwrap();

    let bare = PrimitiveNode::new(Arc::clone(&op_a), vec![]);
    assert!(matches!(
        bare,
        Err(AutolError::MissingRequiredTerminal { ref primitive, ref missing })
            if primitive == "OpA" && missing == &["OpA.h1".to_string()]
    ));

    let h2 = set.terminals("OpB.h2")[0].clone();
    let h1 = set.terminals("OpA.h1")[1].clone();
    assert!(matches!(
        PrimitiveNode::new(Arc::clone(&op_a), vec![h1.clone(), h2]),
        Err(AutolError::UnexpectedTerminal { ref identifier, .. }) if identifier == "OpB.h2"
    ));

    let replacement = PrimitiveNode::new(op_a, vec![h1]).unwrap();
    individual.replace_primitive_node(0, replacement).unwrap();
    assert_eq!(individual.pipeline_str(), "OpA(data, OpA.h1=2)");
    assert!(Individual::from_string(&individual.pipeline_str(), &set).is_ok());
}
