use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument, warn};

use crate::data::sample::Sample;
use crate::error::Result;
use crate::math::vector;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// A deterministic source for `Some(seed)`, a fresh one otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Consecutive, non-overlapping batches of `size`; the last may be shorter.
///
/// # Panics
/// Panics if `size == 0`.
pub fn mini_batches(data: &[Sample], size: usize) -> std::slice::Chunks<'_, Sample> {
    data.chunks(size)
}

/// Trains `network` with mini-batch SGD for `config.hyper.epochs` epochs.
///
/// Each epoch shuffles `training_data` in place, walks it in mini-batches of
/// `config.hyper.mini_batch_size` and applies one update per batch. When
/// `test_data` is given, its accuracy is measured and logged after every
/// epoch.
///
/// Returns the statistics of every completed epoch.
///
/// # Errors
/// Fails before touching any weight if the hyperparameters are unusable or
/// any sample's widths disagree with the network's topology.
///
/// # Early termination
/// The loop stops at an epoch boundary if:
/// - `config.stop_flag` is set, **or**
/// - the `progress_tx` receiver has been dropped.
#[instrument(skip_all, fields(samples = training_data.len(), epochs = config.hyper.epochs))]
pub fn train<R: Rng + ?Sized>(
    network: &mut Network,
    training_data: &mut [Sample],
    config: &TrainConfig,
    test_data: Option<&[Sample]>,
    rng: &mut R,
) -> Result<Vec<EpochStats>> {
    let hyper = &config.hyper;
    hyper.validate()?;
    for sample in training_data.iter().chain(test_data.unwrap_or(&[])) {
        network.check_sample(sample)?;
    }

    let optimizer = hyper.optimizer();
    let mut history = Vec::with_capacity(hyper.epochs);

    for epoch in 1..=hyper.epochs {
        if stop_requested(config) {
            warn!(epoch, "stop requested, ending training");
            break;
        }

        let t_start = Instant::now();

        vector::shuffle(training_data, rng);
        for batch in mini_batches(training_data, hyper.mini_batch_size) {
            network.update_mini_batch(batch, &optimizer);
        }

        let train_loss = network.mean_squared_error(training_data);
        let test_accuracy = test_data.map(|data| network.evaluate(data));

        let stats = EpochStats {
            epoch,
            total_epochs: hyper.epochs,
            train_loss,
            test_accuracy,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        match test_accuracy {
            Some(accuracy) => info!(epoch, train_loss, accuracy, "epoch complete"),
            None => info!(epoch, train_loss, "epoch complete"),
        }

        history.push(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            if tx.send(stats).is_err() {
                warn!(epoch, "progress receiver dropped, ending training");
                break;
            }
        }
    }

    Ok(history)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map_or(false, |flag| flag.load(Ordering::Relaxed))
}
