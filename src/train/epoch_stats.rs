use serde::{Deserialize, Serialize};

/// Per-epoch training statistics.
///
/// `train` returns one value per completed epoch and, when a progress channel
/// is configured in `TrainConfig`, also sends each one as soon as the epoch
/// finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean squared-error cost over the training set after this epoch's updates.
    pub train_loss: f64,
    /// Fraction of test samples classified correctly, if test data was given.
    pub test_accuracy: Option<f64>,
    /// Wall-clock duration of the epoch, evaluation included.
    pub elapsed_ms: u64,
}
