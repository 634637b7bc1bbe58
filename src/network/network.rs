use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::activation::sigmoid::sigmoid_prime_vec;
use crate::data::sample::Sample;
use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::loss::mse::MseLoss;
use crate::math::{matrix::Matrix, vector};
use crate::network::topology::Topology;
use crate::optim::sgd::Sgd;
use crate::train::{self, EpochStats, TrainConfig};

pub const INPUT: usize = 0;
pub const HIDDEN: usize = 1;
pub const OUTPUT: usize = 2;

/// Input → hidden → output. Adjacent layers are adjacent indices in `layers`.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Builds a network with weights and biases drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(topology: Topology, rng: &mut R) -> Result<Network> {
        topology.validate()?;
        debug!(?topology, "initialising network");

        Ok(Network {
            layers: vec![
                Layer::input(topology.input_size),
                Layer::dense(topology.hidden_size, topology.input_size, rng),
                Layer::dense(topology.output_size, topology.hidden_size, rng),
            ],
        })
    }

    /// Same as [`Network::new`] with a freshly seeded random source.
    pub fn random(topology: Topology) -> Result<Network> {
        Network::new(topology, &mut StdRng::from_entropy())
    }

    /// Builds a network from explicit parameters. The input size is the
    /// column count of `hidden_weights`.
    pub fn from_parameters(
        hidden_weights: Matrix,
        hidden_bias: Vec<f64>,
        output_weights: Matrix,
        output_bias: Vec<f64>,
    ) -> Result<Network> {
        if output_weights.cols != hidden_weights.rows {
            return Err(NetworkError::mismatch(
                "output weight columns vs hidden units",
                hidden_weights.rows,
                output_weights.cols,
            ));
        }
        let hidden = Layer::from_parameters(hidden_weights, hidden_bias)?;
        let output = Layer::from_parameters(output_weights, output_bias)?;

        Ok(Network {
            layers: vec![Layer::input(hidden.input_size()), hidden, output],
        })
    }

    pub fn topology(&self) -> Topology {
        Topology::new(
            self.layers[INPUT].size(),
            self.layers[HIDDEN].size(),
            self.layers[OUTPUT].size(),
        )
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Runs `input` through all three layers and returns the output activations.
    ///
    /// Every layer's activation cache is overwritten as a side effect.
    ///
    /// # Panics
    /// Panics if `input.len()` is not the input layer's size.
    pub fn feed_forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.activate(&current);
        }
        current
    }

    /// Accumulates the squared-error gradients of one sample into the hidden
    /// and output layers.
    pub fn backprop(&mut self, x: &[f64], y: &[f64]) {
        let output = self.feed_forward(x);

        let delta_out = vector::hadamard(
            &MseLoss::derivative(&output, y),
            &sigmoid_prime_vec(cached_pre_activation(&self.layers[OUTPUT])),
        );
        let hidden_activation = self.layers[HIDDEN].activation().to_vec();
        self.layers[OUTPUT].accumulate_weight_gradient(&delta_out, &hidden_activation);
        self.layers[OUTPUT].accumulate_bias_gradient(&delta_out);

        // σ'(z_hidden) is applied to each output unit's contribution before summing.
        let hidden_prime = sigmoid_prime_vec(cached_pre_activation(&self.layers[HIDDEN]));
        let mut delta_hidden = vec![0.0; self.layers[HIDDEN].size()];
        if let Some(output_weights) = self.layers[OUTPUT].weights() {
            for (j, &d) in delta_out.iter().enumerate() {
                let contribution = vector::hadamard(&vector::scale(output_weights.row(j), d), &hidden_prime);
                vector::add_assign(&mut delta_hidden, &contribution);
            }
        }

        self.layers[HIDDEN].accumulate_bias_gradient(&delta_hidden);
        self.layers[HIDDEN].accumulate_weight_gradient(&delta_hidden, x);
    }

    /// One gradient step from the summed gradients of `batch`.
    /// An empty batch leaves the network untouched.
    pub fn update_mini_batch(&mut self, batch: &[Sample], sgd: &Sgd) {
        if batch.is_empty() {
            return;
        }

        self.layers[HIDDEN].reset_gradients();
        self.layers[OUTPUT].reset_gradients();

        for sample in batch {
            self.backprop(&sample.input, &sample.target);
        }

        sgd.step(&mut self.layers[HIDDEN], batch.len());
        sgd.step(&mut self.layers[OUTPUT], batch.len());
    }

    /// Stochastic gradient descent over `training_data`; see [`train::train`].
    pub fn train<R: Rng + ?Sized>(
        &mut self,
        training_data: &mut [Sample],
        config: &TrainConfig,
        test_data: Option<&[Sample]>,
        rng: &mut R,
    ) -> Result<Vec<EpochStats>> {
        train::train(self, training_data, config, test_data, rng)
    }

    /// Fraction of `test_data` whose predicted class equals its label.
    /// Returns `0.0` for an empty set.
    pub fn evaluate(&mut self, test_data: &[Sample]) -> f64 {
        if test_data.is_empty() {
            return 0.0;
        }
        let correct = test_data
            .iter()
            .filter(|sample| vector::argmax(&self.feed_forward(&sample.input)) == Some(sample.label()))
            .count();
        correct as f64 / test_data.len() as f64
    }

    /// Mean squared-error cost over `data`. Returns `0.0` for an empty set.
    pub fn mean_squared_error(&mut self, data: &[Sample]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let total: f64 = data
            .iter()
            .map(|sample| MseLoss::loss(&self.feed_forward(&sample.input), &sample.target))
            .sum();
        total / data.len() as f64
    }

    /// Checks that `sample` fits this network's input and output widths.
    pub fn check_sample(&self, sample: &Sample) -> Result<()> {
        let topology = self.topology();
        if sample.input.len() != topology.input_size {
            return Err(NetworkError::mismatch("sample input", topology.input_size, sample.input.len()));
        }
        if sample.target.len() != topology.output_size {
            return Err(NetworkError::mismatch("sample target", topology.output_size, sample.target.len()));
        }
        Ok(())
    }
}

fn cached_pre_activation(layer: &Layer) -> &[f64] {
    layer
        .pre_activation()
        .expect("weighted layer has a pre-activation after feed_forward")
}
