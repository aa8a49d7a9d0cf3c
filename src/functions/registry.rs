use super::{
    checks::LinearSvcCheck,
    traits::{Assignment, FnCheck, ParameterCheck},
};
use std::{collections::HashMap, sync::Arc};

/// Named validity checks that a search space can reference through `param_check`.
pub struct CheckRegistry {
    checks: HashMap<String, Arc<dyn ParameterCheck>>,
}

impl CheckRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            checks: HashMap::new(),
        }
    }

    /// A registry holding the built-in checks.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    pub fn register(&mut self, check: Arc<dyn ParameterCheck>) {
        self.checks.insert(check.name().to_string(), check);
    }

    pub fn register_fn<F>(&mut self, name: &str, predicate: F)
    where
        F: Fn(&Assignment<'_>) -> bool + Send + Sync + 'static,
    {
        self.register(Arc::new(FnCheck::new(name, predicate)));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ParameterCheck>> {
        self.checks.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    fn register_builtins(&mut self) {
        let checks: Vec<Arc<dyn ParameterCheck>> = vec![Arc::new(LinearSvcCheck)];
        for check in checks {
            self.register(check);
        }
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_retrieval() {
        let registry = CheckRegistry::with_builtins();
        let check = registry.get("linear_svc");
        assert!(check.is_some());
        assert_eq!(check.unwrap().name(), "linear_svc");
    }

    #[test]
    fn test_check_not_found() {
        let registry = CheckRegistry::new();
        assert!(registry.get("linear_svc").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_closure() {
        let mut registry = CheckRegistry::new();
        registry.register_fn("never", |_| false);
        let check = registry.get("never").unwrap();
        assert!(!check.check(&Assignment::default()));
        assert_eq!(registry.len(), 1);
    }
}
