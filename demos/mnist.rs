//! MNIST digit classification with digit-sgd.
//!
//! Architecture: 784 → 30 (sigmoid) → 10 (sigmoid)
//! Cost:         squared error
//! Optimizer:    mini-batch SGD, η = 3.0, batch size 10, 30 epochs
//!
//! Run with:
//!   cargo run --example mnist --release [-- path/to/hyperparameters.json]
//!
//! Data files must be present at demos/mnist_data/ (uncompressed IDX).

use std::env;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use digit_sgd::{
    logging, predict, seeded_rng, Dataset, EpochStats, Hyperparameters, Network, TrainConfig,
    Topology,
};

const DATA_DIR: &str = "demos/mnist_data";
const N_CLASSES: usize = 10;
const VALIDATION_SPLIT: usize = 50_000;

fn load(images: &str, labels: &str) -> Result<Dataset> {
    let image_path = format!("{}/{}", DATA_DIR, images);
    let label_path = format!("{}/{}", DATA_DIR, labels);
    Dataset::open(&image_path, &label_path)
        .with_context(|| format!("failed to load {} / {}", image_path, label_path))
}

fn main() -> Result<()> {
    logging::init_logging()?;

    let hyper = match env::args().nth(1) {
        Some(path) => Hyperparameters::load_json(&path)
            .with_context(|| format!("failed to read hyperparameters from {}", path))?,
        None => Hyperparameters::default(),
    };

    // Both streams are read in full before any training starts.
    let mut train_set = load("train-images-idx3-ubyte", "train-labels-idx1-ubyte")?;
    let test_set = load("t10k-images-idx3-ubyte", "t10k-labels-idx1-ubyte")?;
    let validation_set = train_set.split_off(VALIDATION_SPLIT.min(train_set.count()));

    let scale = 1.0 / 255.0;
    let mut train_samples = train_set.to_samples(N_CLASSES, scale)?;
    let validation_samples = validation_set.to_samples(N_CLASSES, scale)?;
    let test_samples = test_set.to_samples(N_CLASSES, scale)?;

    let mut rng = seeded_rng(hyper.seed);
    let topology = Topology {
        input_size: train_set.rows() * train_set.cols(),
        ..Topology::default()
    };
    let mut network = Network::new(topology, &mut rng)?;

    println!(
        "Training {:?} on {} samples ({} held out for validation)",
        topology,
        train_samples.len(),
        validation_samples.len()
    );

    // Progress is printed from a separate thread as epochs complete.
    let (tx, rx) = mpsc::channel::<EpochStats>();
    let reporter = thread::spawn(move || {
        for stats in rx {
            println!(
                "Epoch {:>3}/{}: loss {:.5}  validation {:>6.2}%  ({} ms)",
                stats.epoch,
                stats.total_epochs,
                stats.train_loss,
                stats.test_accuracy.unwrap_or(0.0) * 100.0,
                stats.elapsed_ms
            );
        }
    });

    let config = TrainConfig::from_hyperparameters(hyper).with_progress(tx);
    network.train(&mut train_samples, &config, Some(&validation_samples), &mut rng)?;
    drop(config);
    let _ = reporter.join();

    let accuracy = network.evaluate(&test_samples);
    println!("Test accuracy: {:.2}%", accuracy * 100.0);

    println!("\nSample predictions (first 10 test images):");
    println!("{:>12}  {:>12}", "True Label", "Predicted");
    for sample in test_samples.iter().take(10) {
        let prediction = predict(&mut network, &sample.input)?;
        println!("{:>12}  {:>12}", sample.label(), prediction.label);
    }
    Ok(())
}
