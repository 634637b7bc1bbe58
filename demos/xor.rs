use digit_sgd::{logging, predict, seeded_rng, BiasUpdate, Network, Sample, TrainConfig, Topology};

fn main() -> anyhow::Result<()> {
    logging::init_logging()?;

    let mut rng = seeded_rng(Some(1));
    let mut network = Network::new(Topology::new(2, 2, 1), &mut rng)?;

    let mut samples = vec![
        Sample::new(vec![0.0, 0.0], vec![0.0]),
        Sample::new(vec![0.0, 1.0], vec![1.0]),
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
    ];

    let config = TrainConfig::new(5000, 4, 2.0).with_bias_update(BiasUpdate::Subtractive);
    let history = network.train(&mut samples, &config, None, &mut rng)?;

    for stats in history.iter().step_by(1000) {
        println!("Epoch {}: loss = {:.6}", stats.epoch, stats.train_loss);
    }

    for sample in &samples {
        let prediction = predict(&mut network, &sample.input)?;
        println!("Input: {:?} -> Output: {:.4}", sample.input, prediction.scores[0]);
    }
    Ok(())
}
