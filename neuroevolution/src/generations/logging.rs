use crate::engine::Neuroevolution;
use crate::genome::Genome;
use crate::networks::NetworkData;

use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingLevel {
    /// Records every scored network.
    AllGenomes,
    /// Records only the best-ranked network.
    Champion,
    /// Records no networks.
    NoGenomes,
}

/// A snapshot of the generation being scored.
#[derive(Clone, Debug)]
pub struct Log {
    pub generation_number: usize,
    pub genome_count: usize,
    pub score_stats: Option<Stats>,
    pub generation_sample: GenerationMemberRecord,
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Log {{\n\
            \tgeneration_number: {:?}\n\
            \tgenome_count: {:?}\n\
            \tscores: {:?}\n\
            }}",
            self.generation_number, self.genome_count, self.score_stats,
        )
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f64,
    pub minimum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    /// Returns statistics about numbers in a sequence,
    /// or `None` if it is empty.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::logging::Stats;
    ///
    /// let stats = Stats::from_scores([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied()).unwrap();
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    ///
    /// assert!(Stats::from_scores(std::iter::empty()).is_none());
    /// ```
    pub fn from_scores(data: impl Iterator<Item = f64>) -> Option<Stats> {
        let mut data: Vec<f64> = data.collect();
        if data.is_empty() {
            return None;
        }
        data.sort_by(f64::total_cmp);

        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Some(Stats {
            maximum: data[data.len() - 1],
            minimum: data[0],
            mean: data.iter().sum::<f64>() / data.len() as f64,
            median,
        })
    }
}

/// A reporting-level dependant store
/// of scored networks from a generation.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerationMemberRecord {
    /// Every score, with its network unless pruned.
    Genomes(Vec<(f64, Option<NetworkData>)>),
    /// Only the best score and network.
    Champion(f64, Option<NetworkData>),
    /// Empty.
    None,
}

/// A log of the evolution of an engine over time.
#[derive(Clone, Debug)]
pub struct EvolutionLogger {
    reporting_level: ReportingLevel,
    logs: Vec<Log>,
}

impl EvolutionLogger {
    /// Returns a logger with the appropiate reporting level.
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Stores a snapshot of the engine's current generation.
    /// Does nothing before the engine's first generation.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::{EvolutionConfig, Neuroevolution};
    /// use neuroevolution::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// let mut engine = Neuroevolution::new(EvolutionConfig::default()).unwrap();
    /// let mut logger = EvolutionLogger::new(ReportingLevel::Champion);
    ///
    /// let networks = engine.next_generation().unwrap();
    /// for (score, network) in networks.iter().enumerate() {
    ///     engine.network_score(network, score as f64);
    /// }
    /// logger.log(&engine);
    ///
    /// let log = logger.iter().next().unwrap();
    /// assert_eq!(log.generation_number, 1);
    /// assert_eq!(log.score_stats.as_ref().unwrap().maximum, 49.0);
    /// ```
    pub fn log(&mut self, engine: &Neuroevolution) {
        let generation = match engine.generations().current() {
            Some(generation) => generation,
            None => return,
        };
        let record = |genome: &Genome| (genome.score(), genome.network().map(NetworkData::from));
        self.logs.push(Log {
            generation_number: engine.generation(),
            genome_count: generation.len(),
            score_stats: generation.stats(),
            generation_sample: match self.reporting_level {
                ReportingLevel::AllGenomes => {
                    GenerationMemberRecord::Genomes(generation.genomes().iter().map(record).collect())
                }
                ReportingLevel::Champion => match generation.best().map(record) {
                    Some((score, network)) => GenerationMemberRecord::Champion(score, network),
                    None => GenerationMemberRecord::None,
                },
                ReportingLevel::NoGenomes => GenerationMemberRecord::None,
            },
        })
    }

    /// Iterate over all logged snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &Log> {
        self.logs.iter()
    }

    /// Returns the latest snapshot.
    pub fn last(&self) -> Option<&Log> {
        self.logs.last()
    }
}
