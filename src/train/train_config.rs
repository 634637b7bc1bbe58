use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::optim::sgd::{BiasUpdate, Sgd};
use crate::train::epoch_stats::EpochStats;

/// The serializable part of a training run.
///
/// Fields:
/// - `epochs`:          full passes over the training data
/// - `mini_batch_size`: samples per gradient step; the last batch of an
///                       epoch may be shorter
/// - `learning_rate`:   η
/// - `seed`:            fixes initialisation and shuffling when set
/// - `bias_update`:     bias step rule, see [`BiasUpdate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    pub epochs: usize,
    pub mini_batch_size: usize,
    pub learning_rate: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub bias_update: BiasUpdate,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Hyperparameters {
            epochs: 30,
            mini_batch_size: 10,
            learning_rate: 3.0,
            seed: None,
            bias_update: BiasUpdate::Reference,
        }
    }
}

impl Hyperparameters {
    pub fn validate(&self) -> Result<()> {
        if self.mini_batch_size == 0 {
            return Err(NetworkError::InvalidHyperparameter(
                "mini_batch_size must be at least 1".to_owned(),
            ));
        }
        if !self.learning_rate.is_finite() {
            return Err(NetworkError::InvalidHyperparameter(format!(
                "learning_rate must be finite, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    pub fn optimizer(&self) -> Sgd {
        Sgd::new(self.learning_rate).with_bias_update(self.bias_update)
    }

    /// Serializes the hyperparameters to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes hyperparameters from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<Hyperparameters> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// Configuration for a `train` run.
///
/// # Fields
/// - `hyper`:       the serializable hyperparameters
/// - `progress_tx`: optional channel sender; one `EpochStats` is sent per
///                   completed epoch. If the receiver is dropped the loop
///                   stops after that epoch.
/// - `stop_flag`:   optional atomic flag; when set from another thread the
///                   loop stops at the next epoch boundary.
#[derive(Debug, Default)]
pub struct TrainConfig {
    pub hyper: Hyperparameters,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize, mini_batch_size: usize, learning_rate: f64) -> Self {
        TrainConfig::from_hyperparameters(Hyperparameters {
            epochs,
            mini_batch_size,
            learning_rate,
            ..Hyperparameters::default()
        })
    }

    pub fn from_hyperparameters(hyper: Hyperparameters) -> Self {
        TrainConfig { hyper, progress_tx: None, stop_flag: None }
    }

    pub fn with_bias_update(mut self, bias_update: BiasUpdate) -> Self {
        self.hyper.bias_update = bias_update;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("digit-sgd-hyper-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let hyper = Hyperparameters {
            epochs: 3,
            mini_batch_size: 7,
            learning_rate: 0.25,
            seed: Some(42),
            bias_update: BiasUpdate::Subtractive,
        };
        hyper.save_json(path).unwrap();
        assert_eq!(Hyperparameters::load_json(path).unwrap(), hyper);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let hyper: Hyperparameters =
            serde_json::from_str(r#"{"epochs": 2, "mini_batch_size": 4, "learning_rate": 1.5}"#).unwrap();
        assert_eq!(hyper.seed, None);
        assert_eq!(hyper.bias_update, BiasUpdate::Reference);
    }

    #[test]
    fn validate_rejects_unusable_values() {
        let zero_batch = Hyperparameters { mini_batch_size: 0, ..Hyperparameters::default() };
        assert!(matches!(zero_batch.validate(), Err(NetworkError::InvalidHyperparameter(_))));
        let nan_rate = Hyperparameters { learning_rate: f64::NAN, ..Hyperparameters::default() };
        assert!(nan_rate.validate().is_err());
        assert!(Hyperparameters::default().validate().is_ok());
    }
}
