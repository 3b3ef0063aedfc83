//! Single-URL scoring against a loaded bundle.

use crate::bundle::{BundleError, ModelBundle};
use crate::dataset::Label;
use crate::features::{extract, FeatureVector, UnknownFeature};
use crate::model::{Classifier, ModelError};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error(transparent)]
    Column(#[from] UnknownFeature),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Outcome for one URL.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub url: String,
    pub features: FeatureVector,
    /// Serialized as the class index: 0 legitimate, 1 phishing.
    #[serde(serialize_with = "label_as_index")]
    pub prediction: Label,
    pub prob_legit: f64,
    pub prob_phish: f64,
}

impl Verdict {
    pub fn is_phishing(&self) -> bool {
        self.prediction == Label::Phishing
    }
}

fn label_as_index<S: serde::Serializer>(label: &Label, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(label.as_u8())
}

/// A verified bundle ready to score URLs.
#[derive(Debug, Clone)]
pub struct Detector {
    bundle: ModelBundle,
    threshold: f64,
}

impl Detector {
    /// Wrap a bundle after verifying it against this extractor.
    pub fn new(bundle: ModelBundle, threshold: f64) -> Result<Self, BundleError> {
        bundle.verify()?;
        Ok(Self { bundle, threshold })
    }

    pub fn load(path: &Path, threshold: f64) -> Result<Self, BundleError> {
        let bundle = ModelBundle::load(path)?;
        Ok(Self { bundle, threshold })
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    /// Score `url`. The row is laid out by the bundle's stored columns, not by
    /// the extractor's own order.
    pub fn check(&self, url: &str) -> Result<Verdict, ScoreError> {
        let features = extract(url);
        let row = features.to_row(&self.bundle.schema.columns)?;
        let [prob_legit, prob_phish] = self.bundle.model.predict_proba(&row)?;
        let prediction = if prob_phish >= self.threshold {
            Label::Phishing
        } else {
            Label::Legitimate
        };
        tracing::debug!(url, prob_phish, %prediction, "scored url");
        Ok(Verdict {
            url: url.to_string(),
            features,
            prediction,
            prob_legit,
            prob_phish,
        })
    }
}
