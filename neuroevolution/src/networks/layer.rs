use crate::rng::RandomSource;

/// A single perceptron unit.
///
/// Holds one weight per neuron of the previous layer
/// (none for input neurons), and the value computed
/// during the latest evaluation.
#[derive(Clone, Debug, Default)]
pub struct Neuron {
    pub(super) value: f64,
    pub(super) weights: Vec<f64>,
}

impl Neuron {
    /// Creates a neuron with `input_count` random clamped weights.
    pub(super) fn populate(input_count: usize, random: &mut dyn RandomSource) -> Neuron {
        Neuron::with_weights((0..input_count).map(|_| random.random_clamped()).collect())
    }

    pub(super) fn with_weights(weights: Vec<f64>) -> Neuron {
        Neuron {
            value: 0.0,
            weights,
        }
    }

    /// Returns the value computed during the latest evaluation.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the neuron's input weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

// Values are evaluation scratch, and don't take part in equality.
impl PartialEq for Neuron {
    fn eq(&self, other: &Self) -> bool {
        self.weights == other.weights
    }
}

/// An ordered set of neurons sharing the same inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layer {
    pub(super) neurons: Vec<Neuron>,
}

impl Layer {
    /// Creates a layer of `neuron_count` neurons, each with
    /// `input_count` random clamped weights.
    pub(super) fn populate(
        neuron_count: usize,
        input_count: usize,
        random: &mut dyn RandomSource,
    ) -> Layer {
        Layer {
            neurons: (0..neuron_count)
                .map(|_| Neuron::populate(input_count, &mut *random))
                .collect(),
        }
    }

    /// Returns the layer's neurons.
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Returns the number of neurons in the layer.
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }
}
