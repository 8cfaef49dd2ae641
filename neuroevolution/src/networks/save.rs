use super::Network;

use serde::{Deserialize, Serialize};

/// Flat snapshot of a network's structure and weights,
/// suitable for handing a network over in memory or
/// through any serde format.
///
/// Weights are listed layer by layer, neuron by neuron,
/// in the same order as [`Network::weights`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkData {
    /// Number of neurons in each layer.
    pub neurons: Vec<usize>,
    /// Input weights of every neuron.
    pub weights: Vec<f64>,
}

impl NetworkData {
    /// Returns the number of weights the layer sizes require,
    /// or `None` if it doesn't fit in a `usize`.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::NetworkData;
    ///
    /// let data = NetworkData {
    ///     neurons: vec![3, 4, 2],
    ///     weights: vec![],
    /// };
    /// assert_eq!(data.expected_weight_count(), Some(3 * 4 + 4 * 2));
    ///
    /// let huge = NetworkData {
    ///     neurons: vec![usize::MAX, 2],
    ///     weights: vec![],
    /// };
    /// assert_eq!(huge.expected_weight_count(), None);
    /// ```
    pub fn expected_weight_count(&self) -> Option<usize> {
        self.neurons
            .windows(2)
            .try_fold(0usize, |total, pair| total.checked_add(pair[0].checked_mul(pair[1])?))
    }
}

impl From<&Network> for NetworkData {
    fn from(network: &Network) -> NetworkData {
        NetworkData {
            neurons: network.layer_sizes(),
            weights: network.weights().collect(),
        }
    }
}
