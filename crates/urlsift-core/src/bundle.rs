//! Persisted model bundle: the trained classifier plus the schema it expects.
//!
//! Stored as JSON. Loading verifies the schema before anything can be scored,
//! so a bundle trained against a different feature schema is refused rather
//! than silently producing meaningless probabilities.

use crate::metrics::EvaluationReport;
use crate::model::{Classifier, Model, ModelError};
use crate::schema::{SchemaDescriptor, SchemaError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Version of the bundle file layout (independent of the feature schema version).
pub const BUNDLE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub format_version: u32,
    pub schema: SchemaDescriptor,
    pub model: Model,
    #[serde(default)]
    pub trained_at_unix: u64,
    /// Held-out evaluation at training time, if one was run.
    #[serde(default)]
    pub evaluation: Option<EvaluationReport>,
}

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("bundle io: {0}")]
    Io(#[from] io::Error),
    #[error("bundle json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported bundle format version {0}")]
    UnsupportedFormat(u32),
    #[error("bundle schema rejected: {0}")]
    Schema(#[from] SchemaError),
    #[error("bundle model rejected: {0}")]
    Model(#[from] ModelError),
}

impl ModelBundle {
    /// Bundle a freshly trained model with the current schema.
    pub fn new(model: Model, evaluation: Option<EvaluationReport>) -> Self {
        let trained_at_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            format_version: BUNDLE_FORMAT_VERSION,
            schema: SchemaDescriptor::current(),
            model,
            trained_at_unix,
            evaluation,
        }
    }

    /// Check format, schema and model shape agree with this build.
    pub fn verify(&self) -> Result<(), BundleError> {
        if self.format_version != BUNDLE_FORMAT_VERSION {
            return Err(BundleError::UnsupportedFormat(self.format_version));
        }
        self.schema.verify()?;
        self.model.validate()?;
        let n = self.model.n_features();
        if n != self.schema.columns.len() {
            return Err(ModelError::FeatureCount {
                expected: self.schema.columns.len(),
                found: n,
            }
            .into());
        }
        Ok(())
    }

    pub fn to_writer<W: io::Write>(&self, writer: W) -> Result<(), BundleError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Parse and verify.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, BundleError> {
        let bundle: ModelBundle = serde_json::from_reader(reader)?;
        bundle.verify()?;
        Ok(bundle)
    }

    /// Write to `path`, creating parent directories. Written to a sibling temp
    /// file first and renamed so a crash never leaves a truncated bundle.
    pub fn save(&self, path: &Path) -> Result<(), BundleError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        {
            let file = fs::File::create(&tmp)?;
            let mut writer = io::BufWriter::new(file);
            self.to_writer(&mut writer)?;
            io::Write::flush(&mut writer)?;
        }
        fs::rename(&tmp, path)?;
        tracing::info!(
            path = %path.display(),
            fingerprint = %self.schema.fingerprint,
            "saved model bundle"
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, BundleError> {
        let file = fs::File::open(path)?;
        let bundle = Self::from_reader(io::BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            schema_version = bundle.schema.version,
            "loaded model bundle"
        );
        Ok(bundle)
    }
}
