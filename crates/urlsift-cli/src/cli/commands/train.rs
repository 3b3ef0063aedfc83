//! `urlsift train` – fit, evaluate and save a model bundle.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use urlsift_core::config::UrlsiftConfig;
use urlsift_core::{dataset, trainer};

/// Command-line values that take precedence over config.toml.
#[derive(Debug, Default)]
pub struct TrainOverrides {
    pub out: Option<PathBuf>,
    pub seed: Option<u64>,
    pub test_fraction: Option<f64>,
}

pub fn run_train(cfg: &UrlsiftConfig, dataset_path: &Path, overrides: TrainOverrides) -> Result<()> {
    let mut training = cfg.training();
    if let Some(seed) = overrides.seed {
        training.seed = seed;
    }
    if let Some(f) = overrides.test_fraction {
        training.test_fraction = f;
    }

    let samples = dataset::load_csv(dataset_path)
        .with_context(|| format!("load dataset {}", dataset_path.display()))?;
    let outcome = trainer::train(&samples, &training).context("training failed")?;

    println!(
        "Trained on {} rows, evaluated on {} held-out rows.",
        outcome.n_train, outcome.n_test
    );
    print!("{}", outcome.report);

    let out = match overrides.out {
        Some(p) => p,
        None => cfg.bundle_path()?,
    };
    outcome
        .bundle
        .save(&out)
        .with_context(|| format!("save bundle {}", out.display()))?;
    println!("Saved model bundle to {}", out.display());
    Ok(())
}
