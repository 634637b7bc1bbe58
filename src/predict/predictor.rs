use crate::math::vector;
use crate::network::network::Network;

use super::PredictError;

/// The class a network picked for one input, with the scores behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: usize,
    pub scores: Vec<f64>,
}

/// Runs one pixel vector through `network` and picks the highest-scoring class.
///
/// Fails with `PredictError::NoScore` if every output is NaN.
pub fn predict(network: &mut Network, pixels: &[f64]) -> Result<Prediction, PredictError> {
    let expected = network.topology().input_size;
    if pixels.len() != expected {
        return Err(PredictError::DimensionMismatch { expected, got: pixels.len() });
    }

    let scores = network.feed_forward(pixels);
    let label = vector::argmax(&scores).ok_or(PredictError::NoScore)?;
    Ok(Prediction { label, scores })
}
