use super::logging::Stats;
use super::offspring_factory::OffspringFactory;
use super::{EvolutionConfig, EvolutionError, ScoreSort};
use crate::genome::Genome;
use crate::networks::Network;
use crate::rng::RandomSource;

/// The genomes scored during one evolutionary cycle,
/// kept ranked from best to worst.
#[derive(Clone, Debug, Default)]
pub struct Generation {
    genomes: Vec<Genome>,
}

impl Generation {
    /// Creates an empty generation.
    pub fn new() -> Generation {
        Generation::default()
    }

    /// Inserts a genome at its rank.
    ///
    /// Genomes with equal scores keep their insertion
    /// order. Scores that can't be compared (NaN) rank last.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::{ActivationType, Generation, Genome, Network, NetworkData, ScoreSort};
    ///
    /// let data = NetworkData { neurons: vec![1, 1], weights: vec![0.5] };
    /// let network = Network::from_data(&data, ActivationType::Sigmoid.shared()).unwrap();
    ///
    /// let mut generation = Generation::new();
    /// for score in [3.0, 9.0, 1.0, 4.0] {
    ///     generation.add_genome(Genome::new(score, network.clone()), ScoreSort::Descending);
    /// }
    /// assert_eq!(generation.scores().collect::<Vec<_>>(), vec![9.0, 4.0, 3.0, 1.0]);
    /// ```
    pub fn add_genome(&mut self, genome: Genome, sort: ScoreSort) {
        let score = genome.score();
        let rank = if score.is_nan() {
            self.genomes.len()
        } else {
            self.genomes
                .iter()
                .position(|other| {
                    other.score().is_nan() || sort.ranks_before(score, other.score())
                })
                .unwrap_or(self.genomes.len())
        };
        self.genomes.insert(rank, genome);
    }

    /// Breeds two networks into `child_count` children.
    ///
    /// Each child starts as a copy of `parent1`; every
    /// weight is then replaced by `parent2`'s with
    /// probability [`cross_over_factor`], and finally
    /// perturbed with probability [`mutation_rate`] by a
    /// value within ±[`mutation_range`].
    ///
    /// [`cross_over_factor`]: EvolutionConfig::cross_over_factor
    /// [`mutation_rate`]: EvolutionConfig::mutation_rate
    /// [`mutation_range`]: EvolutionConfig::mutation_range
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::{ActivationType, EvolutionConfig, Generation, Network, Topology};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let topology = Topology::new(2, &[3], 1);
    /// let parent1 = Network::perceptron(&topology, ActivationType::Sigmoid.shared(), &mut rng);
    /// let parent2 = Network::perceptron(&topology, ActivationType::Sigmoid.shared(), &mut rng);
    ///
    /// let config = EvolutionConfig {
    ///     cross_over_factor: 1.0,
    ///     mutation_rate: 0.0,
    ///     ..EvolutionConfig::default()
    /// };
    /// let children = Generation::breed(&parent1, &parent2, 3, &config, &mut rng);
    /// assert_eq!(children.len(), 3);
    /// assert!(children.iter().all(|child| *child == parent2));
    /// ```
    pub fn breed(
        parent1: &Network,
        parent2: &Network,
        child_count: usize,
        config: &EvolutionConfig,
        random: &mut dyn RandomSource,
    ) -> Vec<Network> {
        OffspringFactory::new(&[], config, random).breed(parent1, parent2, child_count)
    }

    /// Produces the networks of the next population
    /// from this generation's ranked genomes: the elite,
    /// then randomized copies of the champion, then
    /// children of round-robin pairs, for a total of
    /// exactly [`population`](EvolutionConfig::population)
    /// networks.
    ///
    /// # Errors
    /// Returns an error if no genome was scored, if fewer
    /// than 2 were scored while children are needed, or
    /// if a needed network was pruned.
    pub fn generate_next_generation(
        &self,
        config: &EvolutionConfig,
        random: &mut dyn RandomSource,
    ) -> Result<Vec<Network>, EvolutionError> {
        OffspringFactory::new(&self.genomes, config, random).generate_offspring()
    }

    /// Returns the genomes, best-ranked first.
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Returns the best-ranked genome, if any.
    pub fn best(&self) -> Option<&Genome> {
        self.genomes.first()
    }

    /// Iterates over the scores, best-ranked first.
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.genomes.iter().map(Genome::score)
    }

    /// Returns statistics about the scores, or `None`
    /// if no genome was scored.
    pub fn stats(&self) -> Option<Stats> {
        Stats::from_scores(self.scores())
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Drops every genome's network, keeping the scores.
    pub fn prune_networks(&mut self) {
        self.genomes.iter_mut().for_each(Genome::prune_network);
    }
}
