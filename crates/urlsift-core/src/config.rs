use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::FitParams;

/// Training parameters (optional `[training]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Share of each class held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the stratified split.
    pub seed: u64,
    /// Gradient-descent passes over the training set.
    pub epochs: usize,
    pub learning_rate: f64,
    /// L2 penalty on model weights.
    pub l2: f64,
    /// Weight classes inversely to their frequency.
    pub balanced_class_weight: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            epochs: 500,
            learning_rate: 0.1,
            l2: 1e-4,
            balanced_class_weight: true,
        }
    }
}

impl TrainingConfig {
    pub fn fit_params(&self) -> FitParams {
        FitParams {
            epochs: self.epochs,
            learning_rate: self.learning_rate,
            l2: self.l2,
            balanced_class_weight: self.balanced_class_weight,
        }
    }
}

/// Global configuration loaded from `~/.config/urlsift/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlsiftConfig {
    /// Phishing probability at or above which a URL is reported as phishing.
    pub decision_threshold: f64,
    /// Model bundle used by `check`; if missing, `~/.local/share/urlsift/model_bundle.json`.
    #[serde(default)]
    pub bundle_path: Option<PathBuf>,
    /// Optional training parameters; if missing, built-in defaults are used.
    #[serde(default)]
    pub training: Option<TrainingConfig>,
}

impl Default for UrlsiftConfig {
    fn default() -> Self {
        Self {
            decision_threshold: 0.5,
            bundle_path: None,
            training: None,
        }
    }
}

impl UrlsiftConfig {
    pub fn training(&self) -> TrainingConfig {
        self.training.clone().unwrap_or_default()
    }

    pub fn bundle_path(&self) -> Result<PathBuf> {
        match &self.bundle_path {
            Some(p) => Ok(p.clone()),
            None => default_bundle_path(),
        }
    }

    /// Reject values that would make training or scoring meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.decision_threshold > 0.0 && self.decision_threshold < 1.0) {
            bail!(
                "decision_threshold must be in (0, 1), got {}",
                self.decision_threshold
            );
        }
        let t = self.training();
        if !(t.test_fraction > 0.0 && t.test_fraction < 1.0) {
            bail!("training.test_fraction must be in (0, 1), got {}", t.test_fraction);
        }
        if t.epochs == 0 {
            bail!("training.epochs must be at least 1");
        }
        if !(t.learning_rate > 0.0 && t.learning_rate.is_finite()) {
            bail!("training.learning_rate must be positive, got {}", t.learning_rate);
        }
        if !(t.l2 >= 0.0 && t.l2.is_finite()) {
            bail!("training.l2 must be non-negative, got {}", t.l2);
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlsift")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

pub fn default_bundle_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlsift")?;
    Ok(xdg_dirs
        .get_data_home()
        .join("urlsift")
        .join("model_bundle.json"))
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UrlsiftConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UrlsiftConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<UrlsiftConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: UrlsiftConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
