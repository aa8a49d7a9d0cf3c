use super::{generator::random_individual, individual::Individual, primitive_set::PrimitiveSet};
use crate::config::{generation::GenerationConfig, traits::ConfigSection};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::HashSet;

/// A set of individuals sampled from one primitive set.
#[derive(Debug, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Sample `population_size` random individuals in parallel.
    ///
    /// Each individual draws from its own generator seeded from the configured seed,
    /// so a seeded run yields the same pipelines regardless of thread scheduling.
    pub fn random(primitive_set: &PrimitiveSet, config: &GenerationConfig) -> Result<Self> {
        config.validate()?;

        let mut master = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let seeds: Vec<u64> = (0..config.population_size).map(|_| master.gen()).collect();

        let individuals = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                random_individual(primitive_set, config.min_length, config.max_length, &mut rng)
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!("Sampled {} random individuals", individuals.len());
        Ok(Self { individuals })
    }

    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    /// Drop individuals whose pipeline equals an earlier one's. Returns how many were removed.
    pub fn dedup_by_pipeline(&mut self) -> usize {
        let before = self.individuals.len();
        let mut seen_pipelines = HashSet::new();
        self.individuals
            .retain(|individual| seen_pipelines.insert(individual.pipeline_str()));

        let removed = before - self.individuals.len();
        if removed > 0 {
            log::debug!("Removed {} duplicate pipelines", removed);
        }
        removed
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    pub fn into_inner(self) -> Vec<Individual> {
        self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}

impl From<Vec<Individual>> for Population {
    fn from(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}
