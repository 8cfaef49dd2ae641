use crate::generations::{ConfigError, EvolutionConfig, EvolutionError, Generations};
use crate::genome::Genome;
use crate::networks::{Activation, Network, SharedActivation};
use crate::rng::RandomSource;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use std::sync::Arc;

/// A neuroevolution engine.
///
/// Hands out a population of networks each generation,
/// collects the score each network achieved, and derives
/// the next population from the best-scored ones.
pub struct Neuroevolution {
    config: EvolutionConfig,
    activation: SharedActivation,
    random: Box<dyn RandomSource>,
    generations: Generations,
    generation: usize,
}

impl Neuroevolution {
    /// Creates an engine using the configured activation
    /// function and an entropy-seeded random generator.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::{EvolutionConfig, Neuroevolution};
    ///
    /// let engine = Neuroevolution::new(EvolutionConfig::default()).unwrap();
    /// assert_eq!(engine.generation(), 0);
    ///
    /// let invalid = EvolutionConfig {
    ///     mutation_rate: 2.0,
    ///     ..EvolutionConfig::default()
    /// };
    /// assert!(Neuroevolution::new(invalid).is_err());
    /// ```
    pub fn new(config: EvolutionConfig) -> Result<Neuroevolution, ConfigError> {
        let activation = config.activation;
        Neuroevolution::with_strategies(config, activation, StdRng::from_entropy())
    }

    /// Creates an engine evaluating networks with `activation`,
    /// and drawing every random value from `random`.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::{EvolutionConfig, Neuroevolution};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut engine = Neuroevolution::with_strategies(
    ///     EvolutionConfig::default(),
    ///     |sum: f64| sum.tanh(),
    ///     StdRng::seed_from_u64(42),
    /// )
    /// .unwrap();
    ///
    /// let mut networks = engine.next_generation().unwrap();
    /// let outputs = networks[0].compute(&[0.0]).unwrap();
    /// assert_eq!(outputs, vec![0.0]);
    /// ```
    pub fn with_strategies<A, R>(
        config: EvolutionConfig,
        activation: A,
        random: R,
    ) -> Result<Neuroevolution, ConfigError>
    where
        A: Activation + Send + Sync + 'static,
        R: RandomSource + 'static,
    {
        config.validate()?;
        Ok(Neuroevolution {
            config,
            activation: Arc::new(activation),
            random: Box::new(random),
            generations: Generations::new(),
            generation: 0,
        })
    }

    /// Discards the whole history. The next call to
    /// [`next_generation`](Neuroevolution::next_generation)
    /// starts over from random networks.
    pub fn restart(&mut self) {
        self.generations = Generations::new();
        self.generation = 0;
    }

    /// Returns the networks of the next generation.
    ///
    /// Each of them should be scored with
    /// [`network_score`](Neuroevolution::network_score)
    /// before the following call.
    ///
    /// # Errors
    /// Returns an error if the current generation doesn't
    /// hold enough scored networks to derive a population.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::{EvolutionConfig, Neuroevolution, Topology};
    /// use std::num::NonZeroUsize;
    ///
    /// let mut engine = Neuroevolution::new(EvolutionConfig {
    ///     network: Topology::new(2, &[4], 1),
    ///     population: NonZeroUsize::new(10).unwrap(),
    ///     ..EvolutionConfig::default()
    /// })
    /// .unwrap();
    ///
    /// let networks = engine.next_generation().unwrap();
    /// assert_eq!(networks.len(), 10);
    ///
    /// // Nothing was scored, so nothing can be derived.
    /// assert!(engine.next_generation().is_err());
    /// ```
    pub fn next_generation(&mut self) -> Result<Vec<Network>, EvolutionError> {
        if let (Some(champion), Some(current)) = (self.champion(), self.generations.current()) {
            info!(
                "generation {} closed with {} scores, best {}",
                self.generation,
                current.len(),
                champion.score()
            );
        }

        let networks = self.generations.create_generation(
            &self.config,
            &self.activation,
            self.random.as_mut(),
        )?;
        self.generation += 1;

        if self.config.low_historic && self.generations.prune_previous_networks() {
            debug!("pruned networks of generation {}", self.generation - 1);
        }
        if let Some(historic) = self.config.historic {
            let discarded = self.generations.retain_latest(historic.saturating_add(1));
            if discarded > 0 {
                debug!("discarded {} generation(s) from history", discarded);
            }
        }

        info!(
            "generation {} created with {} networks",
            self.generation,
            networks.len()
        );
        Ok(networks)
    }

    /// Records the score achieved by a network of the
    /// current generation.
    ///
    /// Scores given before the first generation
    /// is created are ignored.
    pub fn network_score(&mut self, network: &Network, score: f64) {
        let genome = Genome::new(score, network.clone());
        if !self.generations.add_genome(genome, self.config.score_sort) {
            debug!("ignored score {} given before the first generation", score);
        }
    }

    /// Returns the best-ranked genome scored so far
    /// in the current generation.
    pub fn champion(&self) -> Option<&Genome> {
        self.generations.current().and_then(|g| g.best())
    }

    /// Returns the number of generations created
    /// since the engine was built or restarted.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the retained history of generations.
    pub fn generations(&self) -> &Generations {
        &self.generations
    }

    /// Returns the engine's configuration.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generations::ScoreSort;
    use crate::networks::{ActivationType, Topology};

    use std::num::NonZeroUsize;

    fn engine(config: EvolutionConfig) -> Neuroevolution {
        Neuroevolution::with_strategies(config, ActivationType::Sigmoid, StdRng::seed_from_u64(17))
            .unwrap()
    }

    fn score_in_order(engine: &mut Neuroevolution, networks: &[Network]) {
        for (i, network) in networks.iter().enumerate() {
            engine.network_score(network, (i + 1) as f64);
        }
    }

    #[test]
    fn end_to_end_scenario() {
        let mut engine = engine(EvolutionConfig {
            network: Topology::new(2, &[2], 1),
            population: NonZeroUsize::new(4).unwrap(),
            elitism: 0.5,
            random_behaviour: 0.0,
            mutation_rate: 0.0,
            nb_child: 2,
            ..EvolutionConfig::default()
        });

        let first = engine.next_generation().unwrap();
        assert_eq!(first.len(), 4);
        score_in_order(&mut engine, &first);

        let second = engine.next_generation().unwrap();
        assert_eq!(second.len(), 4);
        // Scores 4 and 3 were the best.
        assert_eq!(second[0], first[3]);
        assert_eq!(second[1], first[2]);
        // The rest come from breeding genome[0] with genome[1],
        // so each weight comes from one of them.
        for child in &second[2..] {
            for ((weight, best), runner_up) in child
                .weights()
                .zip(first[3].weights())
                .zip(first[2].weights())
            {
                assert!(weight == best || weight == runner_up);
            }
        }
    }

    #[test]
    fn elitism_keeps_the_champion() {
        let mut engine = engine(EvolutionConfig {
            population: NonZeroUsize::new(20).unwrap(),
            elitism: 0.05,
            ..EvolutionConfig::default()
        });
        let mut networks = engine.next_generation().unwrap();
        for _ in 0..5 {
            score_in_order(&mut engine, &networks);
            let best = networks.last().unwrap().clone();
            networks = engine.next_generation().unwrap();
            assert_eq!(networks[0], best);
        }
    }

    #[test]
    fn ascending_scores() {
        let mut engine = engine(EvolutionConfig {
            population: NonZeroUsize::new(5).unwrap(),
            elitism: 0.2,
            score_sort: ScoreSort::Ascending,
            ..EvolutionConfig::default()
        });
        let first = engine.next_generation().unwrap();
        score_in_order(&mut engine, &first);
        assert_eq!(engine.champion().unwrap().score(), 1.0);
        let second = engine.next_generation().unwrap();
        assert_eq!(second[0], first[0]);
    }

    #[test]
    fn historic_retention() {
        let mut engine = engine(EvolutionConfig {
            population: NonZeroUsize::new(6).unwrap(),
            historic: Some(2),
            ..EvolutionConfig::default()
        });
        for call in 1..=6 {
            let networks = engine.next_generation().unwrap();
            assert_eq!(engine.generations().len(), call.min(3));
            score_in_order(&mut engine, &networks);
        }
        assert_eq!(engine.generation(), 6);
    }

    #[test]
    fn unlimited_historic() {
        let mut engine = engine(EvolutionConfig {
            population: NonZeroUsize::new(6).unwrap(),
            historic: None,
            ..EvolutionConfig::default()
        });
        for _ in 0..5 {
            let networks = engine.next_generation().unwrap();
            score_in_order(&mut engine, &networks);
        }
        assert_eq!(engine.generations().len(), 5);
    }

    #[test]
    fn maximal_historic_keeps_everything() {
        let mut engine = engine(EvolutionConfig {
            population: NonZeroUsize::new(6).unwrap(),
            historic: Some(usize::MAX),
            ..EvolutionConfig::default()
        });
        for call in 1..=4 {
            let networks = engine.next_generation().unwrap();
            assert_eq!(engine.generations().len(), call);
            score_in_order(&mut engine, &networks);
            assert_eq!(engine.champion().unwrap().score(), 6.0);
        }
    }

    #[test]
    fn low_historic_keeps_scores_only() {
        let mut engine = engine(EvolutionConfig {
            population: NonZeroUsize::new(6).unwrap(),
            historic: Some(3),
            low_historic: true,
            ..EvolutionConfig::default()
        });
        for _ in 0..4 {
            let networks = engine.next_generation().unwrap();
            score_in_order(&mut engine, &networks);
        }
        let generations: Vec<_> = engine.generations().iter().collect();
        assert_eq!(generations.len(), 4);
        let previous = generations[2];
        assert_eq!(previous.len(), 6);
        assert!(previous.genomes().iter().all(|g| g.network().is_none()));
        assert!(generations[3]
            .genomes()
            .iter()
            .all(|g| g.network().is_some()));
        // Evolution carries on from the open generation.
        assert_eq!(engine.next_generation().unwrap().len(), 6);
    }

    #[test]
    fn score_before_first_generation_is_ignored() {
        let mut engine = engine(EvolutionConfig::default());
        let network = Network::perceptron(
            &Topology::default(),
            ActivationType::Sigmoid.shared(),
            &mut StdRng::seed_from_u64(0),
        );
        engine.network_score(&network, 3.0);
        assert!(engine.generations().is_empty());
        assert!(engine.champion().is_none());
    }

    #[test]
    fn scored_networks_are_copies() {
        let mut engine = engine(EvolutionConfig {
            population: NonZeroUsize::new(3).unwrap(),
            ..EvolutionConfig::default()
        });
        let mut networks = engine.next_generation().unwrap();
        engine.network_score(&networks[0], 1.0);
        let scored = networks[0].clone();
        for weight in networks[0].weights_mut() {
            *weight = 0.0;
        }
        assert_eq!(engine.champion().unwrap().network(), Some(&scored));
    }

    #[test]
    fn restart() {
        let mut engine = engine(EvolutionConfig {
            population: NonZeroUsize::new(4).unwrap(),
            ..EvolutionConfig::default()
        });
        let networks = engine.next_generation().unwrap();
        score_in_order(&mut engine, &networks);
        engine.next_generation().unwrap();

        engine.restart();
        assert!(engine.generations().is_empty());
        assert_eq!(engine.generation(), 0);
        // Restarting doesn't require any score.
        assert_eq!(engine.next_generation().unwrap().len(), 4);
        assert_eq!(engine.generations().len(), 1);
    }

    #[test]
    fn unscored_generation_is_an_error() {
        let mut engine = engine(EvolutionConfig::default());
        engine.next_generation().unwrap();
        assert_eq!(
            engine.next_generation().unwrap_err(),
            EvolutionError::EmptyGeneration
        );
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn networks_use_injected_activation() {
        let mut engine = Neuroevolution::with_strategies(
            EvolutionConfig {
                population: NonZeroUsize::new(3).unwrap(),
                ..EvolutionConfig::default()
            },
            |_: f64| 0.25,
            StdRng::seed_from_u64(0),
        )
        .unwrap();
        for mut network in engine.next_generation().unwrap() {
            assert_eq!(network.compute(&[1.0]), Some(vec![0.25]));
        }
    }
}
