use super::{
    primitive::{Primitive, PrimitiveNode},
    terminal::Terminal,
};
use crate::config::search_space::{OperatorDescriptor, SearchSpace, SearchSpaceEntry, PARAM_CHECK};
use crate::error::{AutolError, Result};
use crate::functions::{
    registry::CheckRegistry,
    traits::{Assignment, ParameterCheck},
};
use crate::types::{HyperparameterValue, DATA_TERMINAL, PREDICTION};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Validity checks keyed by operator name.
pub type ValidityChecks = HashMap<String, Arc<dyn ParameterCheck>>;

/// All primitives (keyed by output type) and terminals (keyed by identifier)
/// of a search space. Read-only once built; share it behind a reference or `Arc`.
pub struct PrimitiveSet {
    primitives: BTreeMap<String, Vec<Arc<Primitive>>>,
    terminals: BTreeMap<String, Vec<Terminal>>,
    checks: ValidityChecks,
}

impl PrimitiveSet {
    /// Build the catalog for `space`, resolving `param_check` names against `registry`.
    ///
    /// Shared hyperparameters are registered before any operator, since operators
    /// refer to them by name only.
    pub fn build(space: &SearchSpace, registry: &CheckRegistry) -> Result<Self> {
        let mut set = Self {
            primitives: BTreeMap::new(),
            terminals: BTreeMap::new(),
            checks: HashMap::new(),
        };

        for entry in space.entries() {
            match entry {
                SearchSpaceEntry::Shared { name, values } => set.register_shared(name, values),
                SearchSpaceEntry::Unrecognized { key } => {
                    return Err(AutolError::InvalidConfigurationKey { key: key.clone() })
                }
                SearchSpaceEntry::Operator { .. } => {}
            }
        }

        for entry in space.entries() {
            if let SearchSpaceEntry::Operator { descriptor, hyperparameters } = entry {
                set.register_operator(descriptor, hyperparameters, registry)?;
            }
        }

        log::info!(
            "Built primitive set: {} data primitives, {} prediction primitives, {} terminal types, {} checks",
            set.primitives(DATA_TERMINAL).len(),
            set.primitives(PREDICTION).len(),
            set.terminals.len(),
            set.checks.len()
        );
        Ok(set)
    }

    fn register_shared(&mut self, name: &str, values: &[HyperparameterValue]) {
        log::debug!("Registering shared hyperparameter {} with {} values", name, values.len());
        let pool = self.terminals.entry(name.to_string()).or_default();
        pool.extend(values.iter().map(|v| Terminal::new(v.clone(), name, name)));
    }

    fn register_operator(
        &mut self,
        descriptor: &OperatorDescriptor,
        hyperparameters: &BTreeMap<String, Vec<HyperparameterValue>>,
        registry: &CheckRegistry,
    ) -> Result<()> {
        let operator = descriptor.name.as_str();
        if self.find_primitive(operator).is_some() {
            return Err(AutolError::Configuration(format!(
                "Operator {} is declared more than once",
                operator
            )));
        }

        let role = descriptor
            .role()
            .ok_or_else(|| AutolError::UnsupportedOperatorRole {
                operator: operator.to_string(),
                tags: descriptor.tags.clone(),
            })?;

        let mut input = Vec::with_capacity(hyperparameters.len());
        for (name, values) in hyperparameters {
            if values.is_empty() {
                // Shared hyperparameter, referenced by its bare name.
                if self.terminals(name).is_empty() {
                    return Err(AutolError::UnresolvedHyperparameter {
                        operator: operator.to_string(),
                        hyperparameter: name.clone(),
                    });
                }
                input.push(name.clone());
            } else if name == PARAM_CHECK {
                let check = self.resolve_check(operator, values, registry)?;
                self.checks.insert(operator.to_string(), check);
            } else {
                let identifier = format!("{}.{}", operator, name);
                let pool = self.terminals.entry(identifier.clone()).or_default();
                pool.extend(
                    values
                        .iter()
                        .map(|v| Terminal::new(v.clone(), name.as_str(), identifier.as_str())),
                );
                input.push(identifier);
            }
        }

        log::debug!("Registering {:?} {} requiring {:?}", role, operator, input);
        let primitive = Primitive::new(operator, role, input);
        self.primitives
            .entry(primitive.output().to_string())
            .or_default()
            .push(Arc::new(primitive));
        Ok(())
    }

    fn resolve_check(
        &self,
        operator: &str,
        values: &[HyperparameterValue],
        registry: &CheckRegistry,
    ) -> Result<Arc<dyn ParameterCheck>> {
        let unknown = |check: String| AutolError::UnknownParameterCheck {
            operator: operator.to_string(),
            check,
        };

        match values {
            [HyperparameterValue::Str(name)] | [HyperparameterValue::Callable { callable: name }] => {
                registry.get(name).ok_or_else(|| unknown(name.clone()))
            }
            other => Err(unknown(format!("{:?}", other))),
        }
    }

    /// Primitives producing `output_type` (`"data"` or `"prediction"`).
    pub fn primitives(&self, output_type: &str) -> &[Arc<Primitive>] {
        self.primitives
            .get(output_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Terminals satisfying `identifier`.
    pub fn terminals(&self, identifier: &str) -> &[Terminal] {
        self.terminals
            .get(identifier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every key of the catalog: output types followed by terminal identifiers.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.primitives
            .keys()
            .chain(self.terminals.keys())
            .map(String::as_str)
    }

    pub fn find_primitive(&self, name: &str) -> Option<&Arc<Primitive>> {
        self.primitives(DATA_TERMINAL)
            .iter()
            .chain(self.primitives(PREDICTION))
            .find(|p| p.name() == name)
    }

    /// The terminal of `identifier` whose formatted value is `value`.
    pub fn find_terminal(&self, identifier: &str, value: &str) -> Option<&Terminal> {
        self.terminals(identifier)
            .iter()
            .find(|t| t.format_value() == value)
    }

    pub fn validity_checks(&self) -> &ValidityChecks {
        &self.checks
    }

    pub fn check_for(&self, operator: &str) -> Option<&Arc<dyn ParameterCheck>> {
        self.checks.get(operator)
    }

    /// Whether `node` passes its operator's check; true for operators without one.
    pub fn satisfies_checks(&self, node: &PrimitiveNode) -> bool {
        match self.check_for(node.primitive().name()) {
            Some(check) => check.check(&Assignment::from_terminals(node.terminals())),
            None => true,
        }
    }
}
