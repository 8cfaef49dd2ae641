use neuroevolution::logging::{EvolutionLogger, ReportingLevel, Stats};
use neuroevolution::{EvolutionConfig, Network, Neuroevolution, Topology};

use std::error::Error;
use std::fs;
use std::num::NonZeroUsize;

use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

const ERROR_MARGIN: f64 = 0.3;
const PERFECT_SCORE: f64 = 16.0;
const MAX_GENERATIONS: usize = 500;

fn evaluate_xor(network: &mut Network) -> f64 {
    let values = [
        ([1.0, 0.0, 0.0], 0.0),
        ([1.0, 0.0, 1.0], 1.0),
        ([1.0, 1.0, 0.0], 1.0),
        ([1.0, 1.0, 1.0], 0.0),
    ];

    let mut errors = [0.0, 0.0, 0.0, 0.0];
    for (i, (input, output)) in values.iter().enumerate() {
        errors[i] = match network.compute(input) {
            Some(outputs) => (outputs[0] - output).abs(),
            None => 1.0,
        };
        if errors[i] < ERROR_MARGIN {
            errors[i] = 0.0;
        }
    }

    (4.0 - errors.iter().copied().sum::<f64>()).powf(2.0)
}

fn load_config(path: Option<&str>) -> Result<EvolutionConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(ron::from_str(&fs::read_to_string(path)?)?),
        None => Ok(EvolutionConfig {
            network: Topology::new(3, &[4], 1),
            population: NonZeroUsize::new(100).unwrap(),
            ..EvolutionConfig::default()
        }),
    }
}

/// Usage: `xor [CONFIG.ron] [--stress]`.
///
/// Engine records are shown at `info` level by default;
/// set `RUST_LOG` to change it.
fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = init_logging(filter) {
        eprintln!("{}", e);
    }

    let (path, stress) = parse_args(std::env::args().skip(1));
    let config = match load_config(path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            return;
        }
    };

    solve(&config);
    if stress {
        stress_test(&config);
    }
}

/// Installs a subscriber printing both `tracing` events
/// and the engine's `log` records.
fn init_logging(filter: EnvFilter) -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
}

/// Returns the configuration path, if any, and
/// whether the stress test was requested.
fn parse_args(args: impl Iterator<Item = String>) -> (Option<String>, bool) {
    let mut path = None;
    let mut stress = false;
    for arg in args {
        if arg == "--stress" {
            stress = true;
        } else if path.is_none() {
            path = Some(arg);
        }
    }
    (path, stress)
}

/// Runs a single evolution, evaluating each generation's
/// networks in parallel.
fn solve(config: &EvolutionConfig) {
    let mut engine = match Neuroevolution::new(config.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let mut logger = EvolutionLogger::new(ReportingLevel::Champion);

    for _ in 0..MAX_GENERATIONS {
        let mut networks = match engine.next_generation() {
            Ok(networks) => networks,
            Err(e) => {
                eprintln!("{}", e);
                break;
            }
        };
        let scores: Vec<f64> = networks.par_iter_mut().map(evaluate_xor).collect();
        for (network, score) in networks.iter().zip(scores) {
            engine.network_score(network, score);
        }

        logger.log(&engine);
        if let Some(log) = logger.last() {
            println!("{}", log);
        }
        if let Some(champion) = engine.champion() {
            if (champion.score() - PERFECT_SCORE).abs() < f64::EPSILON {
                if let Some(network) = champion.network() {
                    println!("Solution found!: {}", network);
                    match ron::to_string(&network.to_data()) {
                        Ok(data) => println!("{}", data),
                        Err(e) => eprintln!("{}", e),
                    }
                }
                break;
            }
        }
    }
}

/// Repeats the evolution many times over, and reports how
/// many generations the successful runs took.
fn stress_test(config: &EvolutionConfig) {
    const ITERATIONS: usize = 200;

    let generations: Vec<Option<usize>> = (0..ITERATIONS)
        .into_par_iter()
        .map(|_| run_until_solved(config))
        .collect();

    println!(
        "Successful run generation count {:?}, {}% failure rate over {} iterations",
        Stats::from_scores(generations.iter().filter_map(|g| g.map(|g| g as f64))),
        generations.iter().filter(|g| g.is_none()).count() as f64 * 100.0 / ITERATIONS as f64,
        ITERATIONS
    );
}

fn run_until_solved(config: &EvolutionConfig) -> Option<usize> {
    let mut engine = Neuroevolution::new(config.clone()).ok()?;
    for _ in 0..MAX_GENERATIONS {
        let mut networks = engine.next_generation().ok()?;
        for network in &mut networks {
            let score = evaluate_xor(network);
            engine.network_score(network, score);
        }
        if engine
            .champion()
            .map_or(false, |c| (c.score() - PERFECT_SCORE).abs() < f64::EPSILON)
        {
            return Some(engine.generation());
        }
    }
    None
}
