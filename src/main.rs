use std::{env, fs, process};

use anyhow::{Context, bail};
use log::info;
use ndarray::Array1;

use deep_net::{
    DeepNet,
    config::TrainConfig,
    dataset::DatasetProvider,
    training::{StopReason, Trainer},
};

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} train <config.json>");
    eprintln!("       {program} predict <model.json> <vector.json>");
    process::exit(1);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("deep-net");

    match args.get(1).map(String::as_str) {
        Some("train") if args.len() == 3 => train(&args[2]),
        Some("predict") if args.len() == 4 => predict(&args[2], &args[3]),
        _ => usage(program),
    }
}

fn train(config_path: &str) -> anyhow::Result<()> {
    let config = TrainConfig::from_path(config_path)?;
    let dataset = config.build_dataset()?;
    let mut net = config.build_net()?;

    info!(
        layers:? = config.layers,
        samples = dataset.len(),
        threshold = config.threshold;
        "training started"
    );

    let (inputs, targets) = dataset.samples();
    let mut trainer = Trainer::new(config.threshold)?;
    let report = trainer.train(&mut net, &inputs, &targets, config.max_iterations)?;

    let last = report.last_error().unwrap_or(f64::NAN);
    match report.stop {
        StopReason::Converged => println!("converged after {} iterations", report.iterations),
        StopReason::Diverged => {
            println!("last error: {last}");
            bail!(
                "training diverged at iteration {}, {} was left untouched",
                report.iterations,
                config.model_path.display()
            );
        }
        StopReason::MaxIterations => println!("ran {} iterations", report.iterations),
    }
    println!("last error: {last}");

    net.save(&config.model_path)
        .with_context(|| format!("saving model to {}", config.model_path.display()))?;

    for x in dataset.held_out() {
        let y = net.predict(x.view())?;
        println!("{x} -> {y}");
    }

    Ok(())
}

fn predict(model_path: &str, vector_path: &str) -> anyhow::Result<()> {
    let net = DeepNet::load(model_path)?;

    let content = fs::read_to_string(vector_path)
        .with_context(|| format!("cannot read '{vector_path}'"))?;
    let input: Vec<f64> = serde_json::from_str(&content)
        .with_context(|| format!("'{vector_path}' is not a JSON array of numbers"))?;

    if input.len() != net.input_size() {
        bail!(
            "the model expects {} inputs, got {}",
            net.input_size(),
            input.len()
        );
    }

    let output = net.predict(Array1::from(input).view())?;
    println!("{output}");

    Ok(())
}
