use rand::Rng;

use crate::activation::sigmoid::sigmoid_vec;
use crate::error::{NetworkError, Result};
use crate::math::{matrix::Matrix, vector};
use crate::optim::sgd::BiasUpdate;

/// Trainable state of a weighted layer plus its per-mini-batch accumulators.
#[derive(Debug, Clone)]
struct Parameters {
    weights: Matrix,
    bias: Vec<f64>,
    grad_weights: Matrix,
    grad_bias: Vec<f64>,
}

/// One layer of the network.
///
/// The input layer carries no parameters and passes its input through.
/// Every other layer computes `σ(W·x + b)`.
#[derive(Debug, Clone)]
pub struct Layer {
    size: usize,
    input_size: usize,
    params: Option<Parameters>,
    pre_activation: Option<Vec<f64>>,
    activation: Vec<f64>,
}

impl Layer {
    /// Parameterless pass-through layer of `size` units.
    pub fn input(size: usize) -> Layer {
        Layer {
            size,
            input_size: size,
            params: None,
            pre_activation: None,
            activation: Vec::new(),
        }
    }

    /// Sigmoid layer with weights and biases drawn uniformly from `[-1, 1)`.
    pub fn dense<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        let weights = Matrix::random(size, input_size, rng);
        let bias = (0..size).map(|_| rng.gen::<f64>() * 2.0 - 1.0).collect();
        Layer::with_parameters(weights, bias)
    }

    /// Sigmoid layer with explicit parameters. `weights` must be
    /// `bias.len() × input_size`.
    pub fn from_parameters(weights: Matrix, bias: Vec<f64>) -> Result<Layer> {
        if weights.rows != bias.len() {
            return Err(NetworkError::mismatch("weight rows vs bias length", bias.len(), weights.rows));
        }
        if weights.rows == 0 || weights.cols == 0 {
            return Err(NetworkError::InvalidTopology(format!(
                "weighted layer must be non-empty, got {}×{}",
                weights.rows, weights.cols
            )));
        }
        Ok(Layer::with_parameters(weights, bias))
    }

    fn with_parameters(weights: Matrix, bias: Vec<f64>) -> Layer {
        let (size, input_size) = weights.shape();
        Layer {
            size,
            input_size,
            params: Some(Parameters {
                grad_weights: Matrix::zeros(size, input_size),
                grad_bias: vec![0.0; size],
                weights,
                bias,
            }),
            pre_activation: None,
            activation: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn weights(&self) -> Option<&Matrix> {
        self.params.as_ref().map(|p| &p.weights)
    }

    pub fn bias(&self) -> Option<&[f64]> {
        self.params.as_ref().map(|p| p.bias.as_slice())
    }

    pub fn gradient_weights(&self) -> Option<&Matrix> {
        self.params.as_ref().map(|p| &p.grad_weights)
    }

    pub fn gradient_bias(&self) -> Option<&[f64]> {
        self.params.as_ref().map(|p| p.grad_bias.as_slice())
    }

    /// `W·x + b` from the most recent forward pass. `None` for the input layer.
    pub fn pre_activation(&self) -> Option<&[f64]> {
        self.pre_activation.as_deref()
    }

    /// Output of the most recent forward pass.
    pub fn activation(&self) -> &[f64] {
        &self.activation
    }

    /// Forward pass; caches `z` and `σ(z)` for backprop and returns `σ(z)`.
    ///
    /// # Panics
    /// Panics if `input.len()` differs from the layer's input dimension.
    pub fn activate(&mut self, input: &[f64]) -> Vec<f64> {
        assert_eq!(
            input.len(),
            self.input_size,
            "Layer::activate: expected input of length {}, got {}",
            self.input_size,
            input.len()
        );
        self.activation = input.to_vec();

        if let Some(p) = &self.params {
            let z = vector::add(&p.weights.mul_vec(input), &p.bias);
            self.activation = sigmoid_vec(&z);
            self.pre_activation = Some(z);
        }

        self.activation.clone()
    }

    pub fn reset_gradients(&mut self) {
        if let Some(p) = &mut self.params {
            p.grad_weights.fill(0.0);
            p.grad_bias.iter_mut().for_each(|g| *g = 0.0);
        }
    }

    /// `gradientWeights += delta ⊗ previous_activation`.
    ///
    /// # Panics
    /// Panics on the input layer, or if `delta` / `previous_activation` do not
    /// match the weight matrix's rows / columns.
    pub fn accumulate_weight_gradient(&mut self, delta: &[f64], previous_activation: &[f64]) {
        self.params_mut().grad_weights.add_outer(delta, previous_activation);
    }

    /// `gradientBias += delta`.
    ///
    /// # Panics
    /// Panics on the input layer, or if `delta.len()` differs from the layer size.
    pub fn accumulate_bias_gradient(&mut self, delta: &[f64]) {
        vector::add_assign(&mut self.params_mut().grad_bias, delta);
    }

    /// End-of-batch parameter step. Weights always take a plain
    /// gradient-descent step averaged over `batch_size`; the bias rule is
    /// selected by `bias_update`.
    pub fn apply_update(&mut self, batch_size: usize, learning_rate: f64, bias_update: BiasUpdate) {
        let Some(p) = &mut self.params else {
            return;
        };
        let rate = learning_rate / batch_size as f64;

        p.weights.sub_scaled(&p.grad_weights, rate);

        match bias_update {
            // Multiplies by the gradient instead of subtracting it.
            BiasUpdate::Reference => {
                for (b, g) in p.bias.iter_mut().zip(&p.grad_bias) {
                    *b = (*b - rate) * g;
                }
            }
            BiasUpdate::Subtractive => {
                for (b, g) in p.bias.iter_mut().zip(&p.grad_bias) {
                    *b -= rate * g;
                }
            }
        }
    }

    fn params_mut(&mut self) -> &mut Parameters {
        self.params
            .as_mut()
            .expect("the input layer has no weights or gradients")
    }
}
