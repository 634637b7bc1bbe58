pub mod epoch_stats;
pub mod loop_fn;
pub mod train_config;

pub use epoch_stats::EpochStats;
pub use loop_fn::{mini_batches, seeded_rng, train};
pub use train_config::{Hyperparameters, TrainConfig};
