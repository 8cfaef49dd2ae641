use super::errors::ConfigError;
use crate::networks::{ActivationType, Topology};

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Direction in which genomes are ranked by score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreSort {
    /// Higher scores are better.
    #[default]
    Descending,
    /// Lower scores are better.
    Ascending,
}

impl ScoreSort {
    /// Returns whether `score` ranks strictly before `other`.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::ScoreSort;
    ///
    /// assert!(ScoreSort::Descending.ranks_before(2.0, 1.0));
    /// assert!(ScoreSort::Ascending.ranks_before(1.0, 2.0));
    /// assert!(!ScoreSort::Ascending.ranks_before(1.0, 1.0));
    /// ```
    pub fn ranks_before(self, score: f64, other: f64) -> bool {
        match self {
            ScoreSort::Descending => score > other,
            ScoreSort::Ascending => score < other,
        }
    }
}

/// Configuration data for population generation
/// and evolution.
///
/// Deserializing fills every missing field with its
/// default value, and ignores unknown fields, so
/// partial configuration documents are accepted.
///
/// # Note
/// All quantities expressing probabilities or
/// fractions should be in the range [0.0, 1.0].
/// This is checked by [`validate`](EvolutionConfig::validate),
/// which runs when an engine is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvolutionConfig {
    /// Layer layout of every network.
    pub network: Topology,
    /// Number of networks per generation.
    pub population: NonZeroUsize,
    /// Fraction of the population made of the previous
    /// generation's best networks, copied unchanged.
    pub elitism: f64,
    /// Fraction of the population made of networks
    /// with freshly randomized weights.
    pub random_behaviour: f64,
    /// Chance of each weight being mutated in a child.
    pub mutation_rate: f64,
    /// Bound of the uniform distribution weight
    /// mutations are drawn from.
    pub mutation_range: f64,
    /// Chance of a child inheriting each weight from
    /// its second parent instead of its first.
    pub cross_over_factor: f64,
    /// Number of children produced by each breeding pair.
    /// Zero is treated as one.
    pub nb_child: usize,
    /// Number of completed generations kept in the
    /// history, besides the current one. `None` keeps
    /// every generation.
    pub historic: Option<usize>,
    /// Whether to drop the networks of completed
    /// generations, keeping only their scores.
    pub low_historic: bool,
    /// Ranking direction of scores.
    pub score_sort: ScoreSort,
    /// Activation function used when none is supplied
    /// to the engine.
    pub activation: ActivationType,
}

impl Default for EvolutionConfig {
    /// # Examples
    /// ```
    /// use neuroevolution::{EvolutionConfig, ScoreSort};
    ///
    /// let config = EvolutionConfig::default();
    /// assert_eq!(config.population.get(), 50);
    /// assert_eq!(config.elitism, 0.2);
    /// assert_eq!(config.historic, Some(0));
    /// assert_eq!(config.score_sort, ScoreSort::Descending);
    /// ```
    fn default() -> EvolutionConfig {
        EvolutionConfig {
            network: Topology::default(),
            population: NonZeroUsize::new(50).unwrap(),
            elitism: 0.2,
            random_behaviour: 0.2,
            mutation_rate: 0.1,
            mutation_range: 0.5,
            cross_over_factor: 0.5,
            nb_child: 1,
            historic: Some(0),
            low_historic: false,
            score_sort: ScoreSort::Descending,
            activation: ActivationType::Sigmoid,
        }
    }
}

impl EvolutionConfig {
    /// Checks that every value is usable.
    ///
    /// # Errors
    /// Returns an error if a fraction is outside [0.0, 1.0],
    /// if the mutation range is negative or not finite,
    /// or if any layer of the topology is empty.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::EvolutionConfig;
    ///
    /// assert!(EvolutionConfig::default().validate().is_ok());
    ///
    /// let config = EvolutionConfig {
    ///     elitism: 1.5,
    ///     ..EvolutionConfig::default()
    /// };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fractions = [
            ("elitism", self.elitism),
            ("randomBehaviour", self.random_behaviour),
            ("mutationRate", self.mutation_rate),
            ("crossOverFactor", self.cross_over_factor),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::FractionOutOfRange(name, value));
            }
        }
        if !(self.mutation_range.is_finite() && self.mutation_range >= 0.0) {
            return Err(ConfigError::InvalidMutationRange(self.mutation_range));
        }
        if let Some(layer) = self.network.layer_sizes().iter().position(|n| *n == 0) {
            return Err(ConfigError::EmptyLayer(layer));
        }
        Ok(())
    }

    /// Number of elite networks carried over each generation.
    pub fn elite_count(&self) -> usize {
        (self.elitism * self.population.get() as f64).round() as usize
    }

    /// Number of randomized networks injected each generation.
    pub fn random_count(&self) -> usize {
        (self.random_behaviour * self.population.get() as f64).round() as usize
    }

    /// Number of children bred from each pair of parents.
    pub fn children_per_pair(&self) -> usize {
        self.nb_child.max(1)
    }
}
