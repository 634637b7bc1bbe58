use digit_sgd::{seeded_rng, BiasUpdate, Network, Sample, TrainConfig, Topology};

fn xor() -> Vec<Sample> {
    vec![
        Sample::new(vec![0.0, 0.0], vec![0.0]),
        Sample::new(vec![0.0, 1.0], vec![1.0]),
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
    ]
}

fn window_means(losses: &[f64], width: usize) -> Vec<f64> {
    losses
        .chunks(width)
        .map(|w| w.iter().sum::<f64>() / w.len() as f64)
        .collect()
}

#[test]
fn squared_error_falls_across_epochs() {
    let mut rng = seeded_rng(Some(2024));
    let mut net = Network::new(Topology::new(2, 2, 1), &mut rng).unwrap();
    let mut data = xor();

    let initial = net.mean_squared_error(&data);
    // One batch holds the whole set, so every epoch is a full gradient step.
    let config = TrainConfig::new(400, 4, 0.5).with_bias_update(BiasUpdate::Subtractive);
    let history = net.train(&mut data, &config, None, &mut rng).unwrap();
    assert_eq!(history.len(), 400);

    let losses: Vec<f64> = history.iter().map(|s| s.train_loss).collect();
    let means = window_means(&losses, 25);
    for pair in means.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-9, "window mean rose: {:?}", pair);
    }
    assert!(losses[losses.len() - 1] < initial);
    assert!(means[means.len() - 1] < means[0]);
}

#[test]
fn default_bias_rule_error_falls_across_epochs() {
    for seed in [1, 7, 2024, 42] {
        let mut rng = seeded_rng(Some(seed));
        let mut net = Network::new(Topology::new(2, 2, 1), &mut rng).unwrap();
        let mut data = xor();

        let initial = net.mean_squared_error(&data);
        let history = net.train(&mut data, &TrainConfig::new(400, 4, 0.5), None, &mut rng).unwrap();

        let losses: Vec<f64> = history.iter().map(|s| s.train_loss).collect();
        let means = window_means(&losses, 25);
        for pair in means.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-9, "seed {}: window mean rose: {:?}", seed, pair);
        }
        assert!(losses[losses.len() - 1] <= initial + 1e-9, "seed {}", seed);
        assert!(means[means.len() - 1] <= means[0] + 1e-9, "seed {}", seed);
    }
}

#[test]
fn reference_bias_rule_keeps_parameters_finite() {
    let mut rng = seeded_rng(Some(7));
    let mut net = Network::new(Topology::new(2, 2, 1), &mut rng).unwrap();
    let mut data = xor();

    let history = net.train(&mut data, &TrainConfig::new(200, 2, 0.5), None, &mut rng).unwrap();

    assert!(history.iter().all(|s| s.train_loss.is_finite()));
    for layer in &net.layers()[1..] {
        assert!(layer.bias().unwrap().iter().all(|b| b.is_finite()));
        assert!(layer.weights().unwrap().data.iter().flatten().all(|w| w.is_finite()));
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = || {
        let mut rng = seeded_rng(Some(99));
        let mut net = Network::new(Topology::new(2, 2, 1), &mut rng).unwrap();
        let mut data = xor();
        net.train(&mut data, &TrainConfig::new(20, 3, 1.0), None, &mut rng).unwrap()
    };
    let a: Vec<f64> = run().iter().map(|s| s.train_loss).collect();
    let b: Vec<f64> = run().iter().map(|s| s.train_loss).collect();
    assert_eq!(a, b);
}
