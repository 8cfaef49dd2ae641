//! The history of generations of an evolution.
//! The latest generation collects the scores of the
//! networks currently being evaluated; the ones before
//! it are kept, within the retention policy, as a record.
mod config;
mod errors;
mod generation;
pub mod logging;
mod offspring_factory;

pub use config::{EvolutionConfig, ScoreSort};
pub use errors::{ConfigError, EvolutionError};
pub use generation::Generation;

use crate::genome::Genome;
use crate::networks::{Network, SharedActivation};
use crate::rng::RandomSource;

use std::sync::Arc;

/// An ordered history of generations, oldest first.
#[derive(Clone, Debug, Default)]
pub struct Generations {
    generations: Vec<Generation>,
}

impl Generations {
    /// Creates an empty history.
    pub fn new() -> Generations {
        Generations::default()
    }

    /// Produces the networks of a new generation, and
    /// opens an empty generation to collect their scores.
    ///
    /// The first generation is made of freshly generated
    /// networks; every later one is derived from the
    /// scores of the generation before it.
    ///
    /// # Errors
    /// Returns an error if the latest generation can't
    /// produce a population. The history is then left
    /// unchanged.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::{ActivationType, EvolutionConfig, Generations};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = EvolutionConfig::default();
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let mut generations = Generations::new();
    ///
    /// let networks = generations
    ///     .create_generation(&config, &ActivationType::Sigmoid.shared(), &mut rng)
    ///     .unwrap();
    /// assert_eq!(networks.len(), config.population.get());
    /// assert_eq!(generations.len(), 1);
    /// assert!(generations.current().unwrap().is_empty());
    /// ```
    pub fn create_generation(
        &mut self,
        config: &EvolutionConfig,
        activation: &SharedActivation,
        random: &mut dyn RandomSource,
    ) -> Result<Vec<Network>, EvolutionError> {
        let networks = match self.generations.last() {
            Some(current) => current.generate_next_generation(config, random)?,
            None => (0..config.population.get())
                .map(|_| Network::perceptron(&config.network, Arc::clone(activation), &mut *random))
                .collect(),
        };
        self.generations.push(Generation::new());
        Ok(networks)
    }

    /// Adds a scored genome to the current generation.
    /// Returns `false`, without adding it, if there is
    /// no generation yet.
    pub fn add_genome(&mut self, genome: Genome, sort: ScoreSort) -> bool {
        match self.generations.last_mut() {
            Some(current) => {
                current.add_genome(genome, sort);
                true
            }
            None => false,
        }
    }

    /// Returns the generation currently collecting scores.
    pub fn current(&self) -> Option<&Generation> {
        self.generations.last()
    }

    /// Returns the latest completed generation.
    pub fn previous(&self) -> Option<&Generation> {
        self.generations.iter().rev().nth(1)
    }

    /// Drops the networks of the latest completed
    /// generation, keeping its scores. Returns whether
    /// there was such a generation.
    pub fn prune_previous_networks(&mut self) -> bool {
        match self.generations.iter_mut().rev().nth(1) {
            Some(previous) => {
                previous.prune_networks();
                true
            }
            None => false,
        }
    }

    /// Discards the oldest generations so that at most
    /// `count` remain. Returns the number discarded.
    pub fn retain_latest(&mut self, count: usize) -> usize {
        let excess = self.generations.len().saturating_sub(count);
        self.generations.drain(..excess);
        excess
    }

    /// Iterates over the generations, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Generation> {
        self.generations.iter()
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::{ActivationType, Topology};

    use rand::{rngs::StdRng, SeedableRng};
    use std::num::NonZeroUsize;

    fn config() -> EvolutionConfig {
        EvolutionConfig {
            network: Topology::new(2, &[3], 1),
            population: NonZeroUsize::new(6).unwrap(),
            ..EvolutionConfig::default()
        }
    }

    fn score_all(generations: &mut Generations, networks: &[Network]) {
        for (score, network) in networks.iter().enumerate() {
            let genome = Genome::new(score as f64, network.clone());
            assert!(generations.add_genome(genome, ScoreSort::Descending));
        }
    }

    #[test]
    fn bootstrap_networks_are_independent() {
        let mut generations = Generations::new();
        let networks = generations
            .create_generation(
                &config(),
                &ActivationType::Sigmoid.shared(),
                &mut StdRng::seed_from_u64(2),
            )
            .unwrap();
        assert_eq!(networks.len(), 6);
        for (i, network) in networks.iter().enumerate() {
            assert_eq!(network.layer_sizes(), vec![2, 3, 1]);
            assert!(networks[i + 1..].iter().all(|other| other != network));
        }
    }

    #[test]
    fn add_genome_without_generation() {
        let mut generations = Generations::new();
        let mut rng = StdRng::seed_from_u64(0);
        let network = Network::perceptron(
            &Topology::default(),
            ActivationType::Sigmoid.shared(),
            &mut rng,
        );
        assert!(!generations.add_genome(Genome::new(1.0, network), ScoreSort::Descending));
        assert!(generations.is_empty());
    }

    #[test]
    fn derive_from_latest() {
        let config = config();
        let activation = ActivationType::Sigmoid.shared();
        let mut rng = StdRng::seed_from_u64(1);
        let mut generations = Generations::new();

        let first = generations.create_generation(&config, &activation, &mut rng).unwrap();
        score_all(&mut generations, &first);
        let second = generations.create_generation(&config, &activation, &mut rng).unwrap();

        assert_eq!(generations.len(), 2);
        assert_eq!(second.len(), 6);
        assert_eq!(generations.previous().unwrap().len(), 6);
        assert!(generations.current().unwrap().is_empty());
        // Best score was given to the last network.
        assert_eq!(second[0], first[5]);
    }

    #[test]
    fn failed_derivation_keeps_history() {
        let config = config();
        let activation = ActivationType::Sigmoid.shared();
        let mut rng = StdRng::seed_from_u64(1);
        let mut generations = Generations::new();

        generations.create_generation(&config, &activation, &mut rng).unwrap();
        assert_eq!(
            generations
                .create_generation(&config, &activation, &mut rng)
                .unwrap_err(),
            EvolutionError::EmptyGeneration
        );
        assert_eq!(generations.len(), 1);
    }

    #[test]
    fn retention_helpers() {
        let config = config();
        let activation = ActivationType::Sigmoid.shared();
        let mut rng = StdRng::seed_from_u64(1);
        let mut generations = Generations::new();

        assert!(!generations.prune_previous_networks());
        for _ in 0..4 {
            let networks = generations.create_generation(&config, &activation, &mut rng).unwrap();
            score_all(&mut generations, &networks);
        }
        assert!(generations.prune_previous_networks());
        assert!(generations
            .previous()
            .unwrap()
            .genomes()
            .iter()
            .all(|g| g.network().is_none()));
        assert_eq!(generations.previous().unwrap().len(), 6);
        assert!(generations
            .current()
            .unwrap()
            .genomes()
            .iter()
            .all(|g| g.network().is_some()));

        assert_eq!(generations.retain_latest(2), 2);
        assert_eq!(generations.len(), 2);
        assert_eq!(generations.retain_latest(5), 0);
    }
}
