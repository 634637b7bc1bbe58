use crate::math::vector;

/// Squared-error cost for one sample.
pub struct MseLoss;

impl MseLoss {
    /// Scalar cost: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let diff = vector::sub(predicted, expected);
        vector::dot(&diff, &diff) / predicted.len() as f64
    }

    /// Gradient with respect to the output activation: predicted - expected
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        vector::sub(predicted, expected)
    }
}
