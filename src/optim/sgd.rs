use serde::{Deserialize, Serialize};

use crate::layers::dense::Layer;

/// How the end-of-batch step updates biases.
///
/// - `Reference`:   `bias = (bias - η/n) * gradientBias`. Multiplicative, so
///   not a descent step. Default.
/// - `Subtractive`: `bias -= (η/n) * gradientBias`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasUpdate {
    #[default]
    Reference,
    Subtractive,
}

/// Plain stochastic gradient descent. No momentum, no adaptive rates.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
    pub bias_update: BiasUpdate,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate, bias_update: BiasUpdate::Reference }
    }

    pub fn with_bias_update(mut self, bias_update: BiasUpdate) -> Sgd {
        self.bias_update = bias_update;
        self
    }

    /// Applies the gradients a layer accumulated over a batch of `batch_size` samples.
    pub fn step(&self, layer: &mut Layer, batch_size: usize) {
        layer.apply_update(batch_size, self.learning_rate, self.bias_update);
    }
}
