use serde::{Deserialize, Serialize};

use std::sync::Arc;

/// A function applied to each non-input neuron's
/// weighted input sum.
///
/// Implemented for every `Fn(f64) -> f64`, so closures
/// can be injected directly.
///
/// # Examples
/// ```
/// use neuroevolution::{Activation, ActivationType};
///
/// let step = |sum: f64| if sum > 0.0 { 1.0 } else { 0.0 };
/// assert_eq!(step.activate(0.3), 1.0);
/// assert_eq!(ActivationType::Sigmoid.activate(0.0), 0.5);
/// ```
pub trait Activation {
    fn activate(&self, sum: f64) -> f64;
}

/// Activation handle shared by a network and all its clones.
pub type SharedActivation = Arc<dyn Activation + Send + Sync>;

impl<F> Activation for F
where
    F: Fn(f64) -> f64,
{
    fn activate(&self, sum: f64) -> f64 {
        self(sum)
    }
}

/// Built-in activation functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ActivationType {
    // 1 / (1 + exp(-x))
    #[default]
    Sigmoid,
    // x
    Identity,
    // max(x, 0)
    ReLU,
    // exp(-x²)
    Gaussian,
    // sin(πx)
    Sinusoidal,
    // tanh(x)
    Tanh,
}

impl Activation for ActivationType {
    fn activate(&self, sum: f64) -> f64 {
        match self {
            ActivationType::Sigmoid => 1.0 / (1.0 + (-sum).exp()),
            ActivationType::Identity => sum,
            ActivationType::ReLU => sum.max(0.0),
            ActivationType::Gaussian => (-sum.powi(2)).exp(),
            ActivationType::Sinusoidal => (sum * std::f64::consts::PI).sin(),
            ActivationType::Tanh => sum.tanh(),
        }
    }
}

impl ActivationType {
    /// Returns the function as a handle usable by networks.
    pub fn shared(self) -> SharedActivation {
        Arc::new(self)
    }
}
