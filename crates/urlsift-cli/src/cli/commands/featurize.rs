//! `urlsift featurize` – export the feature matrix of a dataset as CSV.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use urlsift_core::dataset;

pub fn run_featurize(dataset_path: &Path, out: Option<&Path>) -> Result<()> {
    let samples = dataset::load_csv(dataset_path)
        .with_context(|| format!("load dataset {}", dataset_path.display()))?;

    match out {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
            dataset::write_feature_csv(BufWriter::new(file), &samples)?;
            tracing::info!(rows = samples.len(), "wrote feature matrix to {}", path.display());
            eprintln!("Wrote {} rows to {}", samples.len(), path.display());
        }
        None => dataset::write_feature_csv(io::stdout().lock(), &samples)?,
    }
    Ok(())
}
