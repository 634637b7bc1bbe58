pub mod error;
pub mod logging;
pub mod math;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod optim;
pub mod network;
pub mod train;
pub mod data;
pub mod predict;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::Matrix;
pub use activation::sigmoid::{sigmoid, sigmoid_prime};
pub use layers::dense::Layer;
pub use network::{Network, Topology};
pub use optim::sgd::{BiasUpdate, Sgd};
pub use train::{seeded_rng, EpochStats, Hyperparameters, TrainConfig};
pub use data::{Dataset, DatasetError, Sample};
pub use predict::{predict, Prediction, PredictError};
