use crate::error::{AutolError, Result};
use crate::types::{HyperparameterValue, OperatorRole};
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Hyperparameter name whose value names a validity check instead of declaring terminals.
pub const PARAM_CHECK: &str = "param_check";

/// Describes an operator of the underlying ML library.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperatorDescriptor {
    pub name: String,
    pub tags: Vec<String>,
}

impl OperatorDescriptor {
    pub fn new(name: impl Into<String>, tags: Vec<String>) -> Self {
        Self { name: name.into(), tags }
    }

    pub fn with_role(name: impl Into<String>, role: OperatorRole) -> Self {
        let tag = match role {
            OperatorRole::Transformer => "DATA_TRANSFORMATION",
            OperatorRole::Classifier => "CLASSIFICATION",
            OperatorRole::Regressor => "REGRESSION",
        };
        Self::new(name, vec![tag.to_string()])
    }

    pub fn role(&self) -> Option<OperatorRole> {
        OperatorRole::from_tags(&self.tags)
    }
}

/// One key of the search space together with what it maps to.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchSpaceEntry {
    /// A hyperparameter shared between operators, with its allowed values.
    Shared {
        name: String,
        values: Vec<HyperparameterValue>,
    },
    /// An operator with hyperparameter name -> allowed values.
    /// An empty list refers to the shared hyperparameter of the same name.
    Operator {
        descriptor: OperatorDescriptor,
        hyperparameters: BTreeMap<String, Vec<HyperparameterValue>>,
    },
    /// A key that is neither a shared hyperparameter nor an operator.
    Unrecognized { key: String },
}

/// The configuration from which a primitive set is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSpace {
    entries: Vec<SearchSpaceEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Shared(Vec<HyperparameterValue>),
    Operator {
        tags: Vec<String>,
        #[serde(default)]
        hyperparameters: BTreeMap<String, Vec<HyperparameterValue>>,
    },
    Other(IgnoredAny),
}

impl SearchSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared<V>(mut self, name: impl Into<String>, values: V) -> Self
    where
        V: IntoIterator,
        V::Item: Into<HyperparameterValue>,
    {
        self.entries.push(SearchSpaceEntry::Shared {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn operator<I, K>(mut self, descriptor: OperatorDescriptor, hyperparameters: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<HyperparameterValue>)>,
        K: Into<String>,
    {
        self.entries.push(SearchSpaceEntry::Operator {
            descriptor,
            hyperparameters: hyperparameters
                .into_iter()
                .map(|(name, values)| (name.into(), values))
                .collect(),
        });
        self
    }

    pub fn push(&mut self, entry: SearchSpaceEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SearchSpaceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a TOML document.
    ///
    /// Top-level arrays declare shared hyperparameters. Top-level tables with a
    /// `tags` list declare operators, with their value lists under `hyperparameters`:
    ///
    /// ```toml
    /// alpha = [0.1, 1.0]
    ///
    /// [BernoulliNB]
    /// tags = ["CLASSIFICATION"]
    /// [BernoulliNB.hyperparameters]
    /// alpha = []
    /// fit_prior = [true, false]
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawEntry> = toml::from_str(contents)?;
        Ok(Self::from_raw(raw))
    }

    /// Parse a JSON document with the same layout as [`SearchSpace::from_toml_str`].
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawEntry> = serde_json::from_str(contents)?;
        Ok(Self::from_raw(raw))
    }

    /// Load from a `.json` or `.toml` file, chosen by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AutolError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let space = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_toml_str(&contents)?
        };
        log::debug!("Loaded {} search space entries from {}", space.len(), path.display());
        Ok(space)
    }

    fn from_raw(raw: BTreeMap<String, RawEntry>) -> Self {
        let entries = raw
            .into_iter()
            .map(|(key, entry)| match entry {
                RawEntry::Shared(values) => SearchSpaceEntry::Shared { name: key, values },
                RawEntry::Operator { tags, hyperparameters } => SearchSpaceEntry::Operator {
                    descriptor: OperatorDescriptor::new(key, tags),
                    hyperparameters,
                },
                RawEntry::Other(_) => SearchSpaceEntry::Unrecognized { key },
            })
            .collect();
        Self { entries }
    }
}
