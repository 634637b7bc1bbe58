//! IDX bytes → dataset → training → prediction on a synthetic two-class set.

use digit_sgd::data::idx::{IMAGE_MAGIC, LABEL_MAGIC};
use digit_sgd::predict::bitmap_to_pixels;
use digit_sgd::{predict, seeded_rng, BiasUpdate, Dataset, Network, TrainConfig, Topology};

const SIDE: usize = 4;

/// Class 0 lights the left half, class 1 the right half.
fn stroke(label: u8, jitter: u8) -> Vec<u8> {
    (0..SIDE * SIDE)
        .map(|i| {
            let left = i % SIDE < SIDE / 2;
            if left == (label == 0) { 255 - jitter } else { jitter }
        })
        .collect()
}

fn streams(n: usize) -> (Vec<u8>, Vec<u8>) {
    let mut images = Vec::new();
    for word in [IMAGE_MAGIC, n as u32, SIDE as u32, SIDE as u32] {
        images.extend_from_slice(&word.to_be_bytes());
    }
    let mut labels = Vec::new();
    labels.extend_from_slice(&LABEL_MAGIC.to_be_bytes());
    labels.extend_from_slice(&(n as u32).to_be_bytes());

    for i in 0..n {
        let label = (i % 2) as u8;
        images.extend(stroke(label, (i * 7 % 40) as u8));
        labels.push(label);
    }
    (images, labels)
}

#[test]
fn trains_on_decoded_streams_and_predicts_a_drawing() {
    let (image_bytes, label_bytes) = streams(60);
    let mut dataset = Dataset::from_idx_bytes(&image_bytes, &label_bytes).unwrap();
    let held_out = dataset.split_off(48);
    assert_eq!((dataset.count(), held_out.count()), (48, 12));

    let scale = 1.0 / 255.0;
    let mut train = dataset.to_samples(2, scale).unwrap();
    let test = held_out.to_samples(2, scale).unwrap();

    let mut rng = seeded_rng(Some(5));
    let mut net = Network::new(Topology::new(SIDE * SIDE, 8, 2), &mut rng).unwrap();
    let config = TrainConfig::new(60, 4, 3.0).with_bias_update(BiasUpdate::Subtractive);
    let history = net.train(&mut train, &config, Some(&test), &mut rng).unwrap();

    let final_accuracy = history.last().and_then(|s| s.test_accuracy).unwrap();
    assert!(final_accuracy >= 0.9, "accuracy only {}", final_accuracy);
    assert!(history.last().unwrap().train_loss < history[0].train_loss);

    // Dark ink on a white canvas, right half.
    let canvas: Vec<u8> = stroke(1, 0).into_iter().map(|p| 255 - p).collect();
    let pixels: Vec<f64> = bitmap_to_pixels(canvas, SIDE as u32, SIDE as u32, SIDE as u32, SIDE as u32, true)
        .unwrap()
        .into_iter()
        .map(|p| p * scale)
        .collect();
    assert_eq!(predict(&mut net, &pixels).unwrap().label, 1);
}

#[test]
fn raw_samples_keep_byte_range() {
    let (image_bytes, label_bytes) = streams(2);
    let dataset = Dataset::from_idx_bytes(&image_bytes, &label_bytes).unwrap();
    let (pixels, label) = dataset.get_sample(1).unwrap();
    assert_eq!(label, 1);
    assert_eq!(pixels.len(), SIDE * SIDE);
    assert!(pixels.iter().all(|&p| (0.0..=255.0).contains(&p)));
    assert!(dataset.get_sample(2).is_err());
}
