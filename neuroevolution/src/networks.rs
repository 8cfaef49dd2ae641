//! Feedforward perceptron networks.
//!
//! A [`Network`] is a stack of fully-connected [`Layer`]s:
//! the first holds the inputs, the last the outputs, and every
//! neuron in between is connected to all the neurons of the
//! layer before it. Networks are evolved purely through their
//! weights; the layout given by a [`Topology`] never changes.
mod activation;
mod errors;
mod layer;
mod save;

pub use activation::{Activation, ActivationType, SharedActivation};
pub use errors::NetworkDataError;
pub use layer::{Layer, Neuron};
pub use save::NetworkData;

use crate::rng::RandomSource;

use serde::{Deserialize, Serialize};

use std::fmt;
use std::sync::Arc;

/// Layer layout of a perceptron network.
///
/// The default is a single input, a single hidden
/// neuron and a single output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Number of input neurons.
    pub inputs: usize,
    /// Number of neurons in each hidden layer, in order.
    pub hiddens: Vec<usize>,
    /// Number of output neurons.
    pub outputs: usize,
}

impl Topology {
    /// # Examples
    /// ```
    /// use neuroevolution::Topology;
    ///
    /// let topology = Topology::new(2, &[3, 3], 1);
    /// assert_eq!(topology.layer_sizes(), vec![2, 3, 3, 1]);
    /// ```
    pub fn new(inputs: usize, hiddens: &[usize], outputs: usize) -> Topology {
        Topology {
            inputs,
            hiddens: hiddens.to_vec(),
            outputs,
        }
    }

    /// Returns the size of every layer, input layer first.
    pub fn layer_sizes(&self) -> Vec<usize> {
        std::iter::once(self.inputs)
            .chain(self.hiddens.iter().copied())
            .chain(std::iter::once(self.outputs))
            .collect()
    }
}

impl Default for Topology {
    fn default() -> Topology {
        Topology::new(1, &[1], 1)
    }
}

/// A fully-connected feedforward neural network.
///
/// Cloning a network deep-copies its weights; only
/// the (stateless) activation handle is shared.
#[derive(Clone)]
pub struct Network {
    layers: Vec<Layer>,
    activation: SharedActivation,
}

impl Network {
    /// Generates a network with the passed layout,
    /// drawing every weight from `random`.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::{ActivationType, Network, Topology};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let network = Network::perceptron(
    ///     &Topology::new(3, &[4], 2),
    ///     ActivationType::Sigmoid.shared(),
    ///     &mut StdRng::seed_from_u64(0),
    /// );
    ///
    /// assert_eq!(network.layer_sizes(), vec![3, 4, 2]);
    /// assert_eq!(network.weight_count(), 3 * 4 + 4 * 2);
    /// ```
    pub fn perceptron(
        topology: &Topology,
        activation: SharedActivation,
        random: &mut dyn RandomSource,
    ) -> Network {
        let mut previous_neurons = 0;
        let layers = topology
            .layer_sizes()
            .into_iter()
            .map(|neurons| {
                let layer = Layer::populate(neurons, previous_neurons, &mut *random);
                previous_neurons = neurons;
                layer
            })
            .collect();

        Network { layers, activation }
    }

    /// Rebuilds a network from a snapshot.
    ///
    /// # Errors
    /// Returns an error if the number of weights doesn't
    /// match the layer sizes, or if the layer sizes are
    /// too large for their weights to be counted.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::{ActivationType, Network, NetworkData};
    ///
    /// let data = NetworkData {
    ///     neurons: vec![2, 1],
    ///     weights: vec![0.5, -0.5],
    /// };
    /// let mut network = Network::from_data(&data, ActivationType::Identity.shared()).unwrap();
    /// assert_eq!(network.compute(&[1.0, 1.0]), Some(vec![0.0]));
    ///
    /// let truncated = NetworkData {
    ///     neurons: vec![2, 1],
    ///     weights: vec![0.5],
    /// };
    /// assert!(Network::from_data(&truncated, ActivationType::Identity.shared()).is_err());
    /// ```
    pub fn from_data(
        data: &NetworkData,
        activation: SharedActivation,
    ) -> Result<Network, NetworkDataError> {
        let expected = data
            .expected_weight_count()
            .ok_or(NetworkDataError::LayerSizeOverflow)?;
        if data.weights.len() != expected {
            return Err(NetworkDataError::WeightCountMismatch {
                expected,
                found: data.weights.len(),
            });
        }

        let mut weights = data.weights.iter().copied();
        let mut previous_neurons = 0;
        let mut layers = Vec::with_capacity(data.neurons.len());
        for &neurons in &data.neurons {
            layers.push(Layer {
                neurons: (0..neurons)
                    .map(|_| Neuron::with_weights(weights.by_ref().take(previous_neurons).collect()))
                    .collect(),
            });
            previous_neurons = neurons;
        }

        Ok(Network { layers, activation })
    }

    /// Returns a snapshot of the network's layout and weights.
    pub fn to_data(&self) -> NetworkData {
        NetworkData::from(self)
    }

    /// Feeds `inputs` through the network and returns
    /// the output layer's values, or `None` if the
    /// network has no layers.
    ///
    /// Inputs beyond the input layer's size are ignored;
    /// input neurons without a corresponding value keep
    /// the one they were last given.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::{Activation, ActivationType, Network, NetworkData};
    ///
    /// let data = NetworkData {
    ///     neurons: vec![2, 2, 1],
    ///     weights: vec![1.0, 1.0, -1.0, 2.0, 0.5, 0.5],
    /// };
    /// let mut network = Network::from_data(&data, ActivationType::Sigmoid.shared()).unwrap();
    ///
    /// let sigmoid = |x: f64| ActivationType::Sigmoid.activate(x);
    /// let (h1, h2) = (sigmoid(0.3 + 0.2), sigmoid(-0.3 + 0.4));
    /// assert_eq!(network.compute(&[0.3, 0.2]), Some(vec![sigmoid(0.5 * h1 + 0.5 * h2)]));
    /// ```
    pub fn compute(&mut self, inputs: &[f64]) -> Option<Vec<f64>> {
        let input_layer = self.layers.first_mut()?;
        for (neuron, input) in input_layer.neurons.iter_mut().zip(inputs) {
            neuron.value = *input;
        }

        for index in 1..self.layers.len() {
            let (previous, current) = self.layers.split_at_mut(index);
            let previous = &previous[index - 1];
            for neuron in &mut current[0].neurons {
                let sum: f64 = previous
                    .neurons
                    .iter()
                    .zip(&neuron.weights)
                    .map(|(input, weight)| input.value * weight)
                    .sum();
                neuron.value = self.activation.activate(sum);
            }
        }

        self.layers
            .last()
            .map(|layer| layer.neurons.iter().map(Neuron::value).collect())
    }

    /// Returns the network's layers, input layer first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the number of neurons in each layer.
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::len).collect()
    }

    /// Iterates over all weights, layer by layer
    /// and neuron by neuron.
    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.layers
            .iter()
            .flat_map(|layer| &layer.neurons)
            .flat_map(|neuron| neuron.weights.iter().copied())
    }

    /// Mutably iterates over all weights, in the
    /// same order as [`weights`](Network::weights).
    pub fn weights_mut(&mut self) -> impl Iterator<Item = &mut f64> + '_ {
        self.layers
            .iter_mut()
            .flat_map(|layer| &mut layer.neurons)
            .flat_map(|neuron| neuron.weights.iter_mut())
    }

    /// Returns the total number of weights in the network.
    pub fn weight_count(&self) -> usize {
        self.layers
            .iter()
            .flat_map(|layer| &layer.neurons)
            .map(|neuron| neuron.weights.len())
            .sum()
    }

    /// Returns the network's activation function.
    pub fn activation(&self) -> &SharedActivation {
        &self.activation
    }

    /// Returns whether both networks use the very same
    /// activation handle.
    pub fn shares_activation_with(&self, other: &Network) -> bool {
        Arc::ptr_eq(&self.activation, &other.activation)
    }
}

impl PartialEq for Network {
    fn eq(&self, other: &Self) -> bool {
        self.layers == other.layers
    }
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network {:?}", self.layer_sizes())?;
        for (index, layer) in self.layers.iter().enumerate().skip(1) {
            for neuron in layer.neurons() {
                writeln!(f, "\t{} {:.6?}", index, neuron.weights())?;
            }
        }
        Ok(())
    }
}
