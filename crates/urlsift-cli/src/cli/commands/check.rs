//! `urlsift check` – classify one URL with a trained bundle.

use anyhow::{Context, Result};
use std::path::Path;
use urlsift_core::config::UrlsiftConfig;
use urlsift_core::Detector;

pub fn run_check(cfg: &UrlsiftConfig, url: &str, bundle: Option<&Path>, json: bool) -> Result<()> {
    let path = match bundle {
        Some(p) => p.to_path_buf(),
        None => cfg.bundle_path()?,
    };
    let detector = Detector::load(&path, cfg.decision_threshold)
        .with_context(|| format!("load bundle {}", path.display()))?;

    let url = url.trim();
    let verdict = detector.check(url)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
        return Ok(());
    }

    if verdict.is_phishing() {
        println!("PHISHING    {}", verdict.url);
    } else {
        println!("LEGITIMATE  {}", verdict.url);
    }
    println!(
        "prob_legit = {:.4}, prob_phish = {:.4}",
        verdict.prob_legit, verdict.prob_phish
    );
    for (name, value) in verdict.features.iter() {
        println!("  {:<28} {}", name, value);
    }
    Ok(())
}
