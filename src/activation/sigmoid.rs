/// Logistic function `1 / (1 + e^-z)`.
///
/// Strictly inside `(0, 1)` only while f64 can represent the result:
/// `sigmoid(40.0)` rounds to `1.0` and `sigmoid(-800.0)` to `0.0`.
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Derivative of the logistic function, expressed through its value.
pub fn sigmoid_prime(z: f64) -> f64 {
    let s = sigmoid(z);
    s * (1.0 - s)
}

pub fn sigmoid_vec(z: &[f64]) -> Vec<f64> {
    z.iter().map(|&x| sigmoid(x)).collect()
}

pub fn sigmoid_prime_vec(z: &[f64]) -> Vec<f64> {
    z.iter().map(|&x| sigmoid_prime(x)).collect()
}
