use super::{EvolutionConfig, EvolutionError};
use crate::genome::Genome;
use crate::networks::Network;
use crate::rng::RandomSource;

use log::debug;

/// Auxiliary type for offspring generation.
/// Produces the networks of the next population
/// from a generation's ranked genomes, according
/// to the specified config.
pub(super) struct OffspringFactory<'a> {
    genomes: &'a [Genome],
    config: &'a EvolutionConfig,
    random: &'a mut dyn RandomSource,
}

impl<'a> OffspringFactory<'a> {
    pub(super) fn new(
        genomes: &'a [Genome],
        config: &'a EvolutionConfig,
        random: &'a mut dyn RandomSource,
    ) -> OffspringFactory<'a> {
        OffspringFactory {
            genomes,
            config,
            random,
        }
    }

    /// Generates a full population: the elite first,
    /// then the randomized networks, then the children
    /// of bred pairs.
    pub(super) fn generate_offspring(&mut self) -> Result<Vec<Network>, EvolutionError> {
        let champion = self.network_at(0)?;
        let mut offspring = Vec::with_capacity(self.config.population.get());

        self.add_elite(&mut offspring)?;
        let elite = offspring.len();
        self.add_randomized(&mut offspring, champion);
        let randomized = offspring.len() - elite;
        self.add_bred(&mut offspring)?;

        debug!(
            "next population: {} elite, {} randomized, {} bred",
            elite,
            randomized,
            offspring.len() - elite - randomized
        );
        Ok(offspring)
    }

    /// Returns the network of the genome at `rank`.
    fn network_at(&self, rank: usize) -> Result<&'a Network, EvolutionError> {
        let genomes: &'a [Genome] = self.genomes;
        match genomes.get(rank) {
            Some(genome) => genome.network().ok_or(EvolutionError::PrunedNetwork(rank)),
            None if genomes.is_empty() => Err(EvolutionError::EmptyGeneration),
            None => Err(EvolutionError::InsufficientGenomes(genomes.len())),
        }
    }

    fn is_full(&self, offspring: &[Network]) -> bool {
        offspring.len() >= self.config.population.get()
    }

    /// Copies the best-ranked networks unchanged.
    fn add_elite(&self, offspring: &mut Vec<Network>) -> Result<(), EvolutionError> {
        let elite = self.config.elite_count().min(self.genomes.len());
        for rank in 0..elite {
            if self.is_full(offspring) {
                break;
            }
            offspring.push(self.network_at(rank)?.clone());
        }
        Ok(())
    }

    /// Adds copies of the champion with every
    /// weight redrawn.
    fn add_randomized(&mut self, offspring: &mut Vec<Network>, champion: &Network) {
        for _ in 0..self.config.random_count() {
            if self.is_full(offspring) {
                break;
            }
            let mut network = champion.clone();
            for weight in network.weights_mut() {
                *weight = self.random.random_clamped();
            }
            offspring.push(network);
        }
    }

    /// Fills the rest of the population by breeding
    /// pairs of genomes in round-robin order: each pass
    /// pairs every genome ranked before a cursor with
    /// the genome at the cursor, which then advances,
    /// wrapping back to the start before the last rank.
    fn add_bred(&mut self, offspring: &mut Vec<Network>) -> Result<(), EvolutionError> {
        if self.is_full(offspring) {
            return Ok(());
        }
        let genome_count = self.genomes.len();
        if genome_count < 2 {
            return Err(EvolutionError::InsufficientGenomes(genome_count));
        }
        // Two genomes would otherwise never be paired.
        let wrap = (genome_count - 1).max(2);
        let children = self.config.children_per_pair();

        let mut max = 0;
        loop {
            for i in 0..max {
                let parent1 = self.network_at(i)?;
                let parent2 = self.network_at(max)?;
                for child in self.breed(parent1, parent2, children) {
                    offspring.push(child);
                    if self.is_full(offspring) {
                        return Ok(());
                    }
                }
            }
            max += 1;
            if max >= wrap {
                max = 0;
            }
        }
    }

    /// Produces `child_count` children of the two parents,
    /// each starting as a copy of `parent1`, inheriting
    /// weights of `parent2` by uniform crossover, and
    /// then mutated.
    pub(super) fn breed(
        &mut self,
        parent1: &Network,
        parent2: &Network,
        child_count: usize,
    ) -> Vec<Network> {
        (0..child_count)
            .map(|_| {
                let mut child = parent1.clone();
                self.cross_over(&mut child, parent2);
                self.mutate(&mut child);
                child
            })
            .collect()
    }

    fn cross_over(&mut self, child: &mut Network, parent2: &Network) {
        for (weight, other) in child.weights_mut().zip(parent2.weights()) {
            if self.random.chance(self.config.cross_over_factor) {
                *weight = other;
            }
        }
    }

    fn mutate(&mut self, child: &mut Network) {
        let range = self.config.mutation_range;
        for weight in child.weights_mut() {
            if self.random.chance(self.config.mutation_rate) {
                *weight += self.random.unit() * range * 2.0 - range;
            }
        }
    }
}
