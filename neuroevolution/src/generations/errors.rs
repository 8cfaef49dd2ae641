use std::error::Error;
use std::fmt;

/// An error type indicating that a configuration
/// can't be used to run an evolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A fraction or probability, named by its
    /// configuration key, is outside [0.0, 1.0].
    FractionOutOfRange(&'static str, f64),
    /// The mutation range is negative or not finite.
    InvalidMutationRange(f64),
    /// The layer at the given index has no neurons.
    EmptyLayer(usize),
}

/// An error type indicating that the next
/// generation could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvolutionError {
    /// No genome was scored in the current generation.
    EmptyGeneration,
    /// Too few genomes were scored to breed the
    /// networks the population still needs.
    InsufficientGenomes(usize),
    /// The network of the genome at the given rank
    /// was dropped by low-historic retention.
    PrunedNetwork(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FractionOutOfRange(name, value) => {
                write!(f, "{} must be within [0, 1], got {}", name, value)
            }
            Self::InvalidMutationRange(value) => write!(
                f,
                "mutationRange must be finite and non-negative, got {}",
                value
            ),
            Self::EmptyLayer(index) => write!(f, "network layer {} has no neurons", index),
        }
    }
}

impl fmt::Display for EvolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGeneration => {
                write!(f, "attempted evolution of a generation with no scored genomes")
            }
            Self::InsufficientGenomes(count) => write!(
                f,
                "attempted breeding with {} scored genome(s), at least 2 are required",
                count
            ),
            Self::PrunedNetwork(rank) => {
                write!(f, "network of genome ranked {} was pruned from history", rank)
            }
        }
    }
}

impl Error for ConfigError {}
impl Error for EvolutionError {}
