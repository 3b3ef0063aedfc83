//! Classifiers that score feature rows.
//!
//! Rows handed to a model must already be laid out in the column order the
//! model was trained with; the bundle carries that order.

mod logistic;

pub use logistic::{FitParams, LogisticRegression};

use crate::dataset::Label;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("cannot fit on an empty training set")]
    EmptyTrainingSet,
    #[error("{rows} rows but {labels} labels")]
    LabelCount { rows: usize, labels: usize },
    #[error("model expects {expected} features, got {found}")]
    FeatureCount { expected: usize, found: usize },
    #[error("corrupt model: {0}")]
    Corrupt(String),
}

/// Scores a single row.
pub trait Classifier {
    fn n_features(&self) -> usize;

    /// Probability that the row is phishing.
    fn phishing_probability(&self, row: &[f64]) -> Result<f64, ModelError>;

    /// `[prob_legit, prob_phish]`.
    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ModelError> {
        let p = self.phishing_probability(row)?;
        Ok([1.0 - p, p])
    }

    fn predict(&self, row: &[f64], threshold: f64) -> Result<Label, ModelError> {
        let p = self.phishing_probability(row)?;
        Ok(if p >= threshold {
            Label::Phishing
        } else {
            Label::Legitimate
        })
    }
}

/// Persisted model, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    LogisticRegression(LogisticRegression),
}

impl Model {
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            Model::LogisticRegression(m) => m.validate(),
        }
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        LogisticRegression::n_features(self)
    }

    fn phishing_probability(&self, row: &[f64]) -> Result<f64, ModelError> {
        self.probability(row)
    }
}

impl Classifier for Model {
    fn n_features(&self) -> usize {
        match self {
            Model::LogisticRegression(m) => Classifier::n_features(m),
        }
    }

    fn phishing_probability(&self, row: &[f64]) -> Result<f64, ModelError> {
        match self {
            Model::LogisticRegression(m) => m.phishing_probability(row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_model() -> Model {
        Model::LogisticRegression(LogisticRegression {
            weights: vec![2.0],
            bias: 0.0,
            means: vec![0.0],
            scales: vec![1.0],
        })
    }

    #[test]
    fn proba_pair_sums_to_one() {
        let m = fixed_model();
        let [legit, phish] = m.predict_proba(&[1.0]).unwrap();
        assert!((legit + phish - 1.0).abs() < 1e-12);
        assert!(phish > 0.5);
    }

    #[test]
    fn threshold_controls_prediction() {
        let m = fixed_model();
        assert_eq!(m.predict(&[0.0], 0.5).unwrap(), Label::Phishing);
        assert_eq!(m.predict(&[0.0], 0.6).unwrap(), Label::Legitimate);
        assert_eq!(m.predict(&[-3.0], 0.5).unwrap(), Label::Legitimate);
    }

    #[test]
    fn serde_is_tagged() {
        let json = serde_json::to_value(fixed_model()).unwrap();
        assert_eq!(json["kind"], "logistic_regression");
        let back: Model = serde_json::from_value(json).unwrap();
        assert_eq!(back, fixed_model());
    }
}
