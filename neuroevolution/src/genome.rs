use crate::networks::Network;

/// A scored individual: a network together
/// with the fitness it achieved.
///
/// The network may have been dropped by
/// [low-historic] retention, in which case only
/// the score remains.
///
/// [low-historic]: crate::EvolutionConfig::low_historic
#[derive(Clone, Debug, PartialEq)]
pub struct Genome {
    score: f64,
    network: Option<Network>,
}

impl Genome {
    /// Pairs a network with its score.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::{ActivationType, Genome, NetworkData, Network};
    ///
    /// let data = NetworkData { neurons: vec![1, 1], weights: vec![0.5] };
    /// let network = Network::from_data(&data, ActivationType::Sigmoid.shared()).unwrap();
    ///
    /// let genome = Genome::new(12.5, network.clone());
    /// assert_eq!(genome.score(), 12.5);
    /// assert_eq!(genome.network(), Some(&network));
    /// ```
    pub fn new(score: f64, network: Network) -> Genome {
        Genome {
            score,
            network: Some(network),
        }
    }

    /// Returns the genome's score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Returns the genome's network, unless it was pruned.
    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    /// Drops the genome's network, keeping only the score.
    pub(crate) fn prune_network(&mut self) {
        self.network = None;
    }
}

/// Unscored genomes default to a score of 0.
impl From<Network> for Genome {
    fn from(network: Network) -> Genome {
        Genome::new(0.0, network)
    }
}
