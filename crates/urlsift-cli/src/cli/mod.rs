//! CLI for urlsift.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use urlsift_core::config::{self, UrlsiftConfig};

use commands::{run_check, run_extract, run_featurize, run_schema, run_train, TrainOverrides};

/// Top-level CLI for urlsift.
#[derive(Debug, Parser)]
#[command(name = "urlsift")]
#[command(about = "urlsift: URL feature extraction and phishing classification", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/urlsift/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the feature vector of a URL in schema order.
    Extract {
        /// URL (any string; malformed input is accepted).
        url: String,
        /// Print as a JSON object instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the feature schema (version, fingerprint, ordered columns).
    Schema {
        #[arg(long)]
        json: bool,
    },

    /// Write the feature matrix of a url,label CSV dataset.
    Featurize {
        /// CSV with `url` and `label` columns.
        dataset: PathBuf,
        /// Output CSV (default: stdout).
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Train a classifier on a url,label CSV dataset and save the model bundle.
    Train {
        /// CSV with `url` and `label` columns.
        dataset: PathBuf,
        /// Where to write the bundle (default: configured bundle path).
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
        /// Override the split seed from config.
        #[arg(long, value_name = "N")]
        seed: Option<u64>,
        /// Override the held-out fraction from config.
        #[arg(long, value_name = "F")]
        test_fraction: Option<f64>,
    },

    /// Classify a URL with a trained bundle.
    Check {
        url: String,
        /// Bundle to load (default: configured bundle path).
        #[arg(long, value_name = "PATH")]
        bundle: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<&Path>) -> Result<UrlsiftConfig> {
    let cfg = match path {
        Some(p) => config::load_from(p)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let config_path = cli.config.as_deref();

        match cli.command {
            CliCommand::Extract { url, json } => run_extract(&url, json)?,
            CliCommand::Schema { json } => run_schema(json)?,
            CliCommand::Featurize { dataset, out } => run_featurize(&dataset, out.as_deref())?,
            CliCommand::Train {
                dataset,
                out,
                seed,
                test_fraction,
            } => {
                let cfg = load_config(config_path)?;
                let overrides = TrainOverrides {
                    out,
                    seed,
                    test_fraction,
                };
                run_train(&cfg, &dataset, overrides)?;
            }
            CliCommand::Check { url, bundle, json } => {
                let cfg = load_config(config_path)?;
                run_check(&cfg, &url, bundle.as_deref(), json)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
