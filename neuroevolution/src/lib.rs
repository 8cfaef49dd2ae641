//! A neuroevolution engine: fixed-topology feedforward networks
//! evolved through their weights by a score-driven genetic algorithm.
//!
//! Each generation, the engine hands out a population of networks.
//! The caller evaluates them however it sees fit and reports a score
//! for each one; the next population is then made of the best-scored
//! networks, randomized copies of the champion, and children bred
//! from the ranked networks through crossover and mutation.
//!
//! Activation functions and the source of randomness are pluggable,
//! via the [`Activation`] and [`RandomSource`] traits. Scored generations
//! are kept in a configurable history, which can be snapshot through
//! the [`logging`] module.
//!
//! # Example usage: Evolution of XOR function approximator
//! ```
//! use neuroevolution::{EvolutionConfig, Network, Neuroevolution, Topology};
//! use std::num::NonZeroUsize;
//!
//! // Allowed error margin for neural net answers.
//! const ERROR_MARGIN: f64 = 0.3;
//!
//! fn evaluate_xor(network: &mut Network) -> f64 {
//!     let values = [
//!         ([1.0, 0.0, 0.0], 0.0),
//!         ([1.0, 0.0, 1.0], 1.0),
//!         ([1.0, 1.0, 0.0], 1.0),
//!         ([1.0, 1.0, 1.0], 0.0),
//!     ];
//!
//!     let mut errors = [0.0; 4];
//!     for (i, (input, output)) in values.iter().enumerate() {
//!         errors[i] = (network.compute(input).unwrap()[0] - output).abs();
//!         if errors[i] < ERROR_MARGIN {
//!             errors[i] = 0.0;
//!         }
//!     }
//!
//!     (4.0 - errors.iter().sum::<f64>()).powf(2.0)
//! }
//!
//! let config = EvolutionConfig {
//!     network: Topology::new(3, &[4], 1),
//!     population: NonZeroUsize::new(100).unwrap(),
//!     elitism: 0.2,
//!     random_behaviour: 0.2,
//!     mutation_rate: 0.1,
//!     mutation_range: 0.5,
//!     ..EvolutionConfig::default()
//! };
//!
//! let mut engine = Neuroevolution::new(config)?;
//! for _ in 0..50 {
//!     let mut networks = engine.next_generation()?;
//!     for network in &mut networks {
//!         let score = evaluate_xor(network);
//!         engine.network_score(network, score);
//!     }
//!
//!     let champion = engine.champion().unwrap();
//!     if (champion.score() - 16.0).abs() < f64::EPSILON {
//!         let data = champion.network().unwrap().to_data();
//!         println!("Solution found!: {}", serde_json::to_string(&data)?);
//!         break;
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod engine;
mod genome;
pub mod generations;
pub mod networks;
mod rng;

pub use engine::Neuroevolution;
pub use generations::logging;
pub use generations::{
    ConfigError, EvolutionConfig, EvolutionError, Generation, Generations, ScoreSort,
};
pub use genome::Genome;
pub use networks::{
    Activation, ActivationType, Layer, Network, NetworkData, NetworkDataError, Neuron,
    SharedActivation, Topology,
};
pub use rng::RandomSource;
