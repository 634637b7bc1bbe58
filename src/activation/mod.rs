pub mod sigmoid;

pub use sigmoid::{sigmoid, sigmoid_prime, sigmoid_prime_vec, sigmoid_vec};
