//! Versioned description of the feature schema, as persisted inside model bundles.
//!
//! A bundle trained against one schema must never score vectors built by another.
//! `SCHEMA_VERSION` is bumped whenever a feature's meaning, name or position changes;
//! the fingerprint guards the stored column list itself.

use crate::features::{Feature, FEATURE_COLUMNS, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Version of the feature semantics produced by [`crate::features::extract`].
pub const SCHEMA_VERSION: u32 = 1;

/// Schema as stored in a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub version: u32,
    pub columns: Vec<String>,
    /// Lowercase hex SHA-256 of `columns` joined by `\n`.
    pub fingerprint: String,
}

/// Why a stored schema cannot be used with this extractor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("schema fingerprint mismatch: stored {stored}, computed {computed}")]
    FingerprintMismatch { stored: String, computed: String },
    #[error("schema version {found} is not supported (extractor is version {expected})")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("schema has {found} columns, expected {expected}")]
    ColumnCount { expected: usize, found: usize },
    #[error("schema column '{0}' is not produced by this extractor")]
    UnknownColumn(String),
    #[error("schema column '{0}' appears more than once")]
    DuplicateColumn(String),
}

/// Fingerprint of an ordered column list.
pub fn fingerprint<S: AsRef<str>>(columns: &[S]) -> String {
    let mut hasher = Sha256::new();
    for (i, c) in columns.iter().enumerate() {
        if i > 0 {
            hasher.update(b"\n");
        }
        hasher.update(c.as_ref().as_bytes());
    }
    hex::encode(hasher.finalize())
}

impl SchemaDescriptor {
    /// Descriptor of the schema this build extracts.
    pub fn current() -> Self {
        let columns: Vec<String> = FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect();
        let fingerprint = fingerprint(&columns);
        Self {
            version: SCHEMA_VERSION,
            columns,
            fingerprint,
        }
    }

    /// Check that vectors from this extractor can be laid out by this descriptor.
    ///
    /// Column order may differ from [`FEATURE_COLUMNS`]: rows are always built by
    /// walking `columns`, so only names, count and version must agree.
    pub fn verify(&self) -> Result<(), SchemaError> {
        let computed = fingerprint(&self.columns);
        if computed != self.fingerprint {
            return Err(SchemaError::FingerprintMismatch {
                stored: self.fingerprint.clone(),
                computed,
            });
        }
        if self.version != SCHEMA_VERSION {
            return Err(SchemaError::VersionMismatch {
                expected: SCHEMA_VERSION,
                found: self.version,
            });
        }
        if self.columns.len() != FEATURE_COUNT {
            return Err(SchemaError::ColumnCount {
                expected: FEATURE_COUNT,
                found: self.columns.len(),
            });
        }
        let mut seen = HashSet::with_capacity(FEATURE_COUNT);
        for column in &self.columns {
            if Feature::from_name(column).is_none() {
                return Err(SchemaError::UnknownColumn(column.clone()));
            }
            if !seen.insert(column.as_str()) {
                return Err(SchemaError::DuplicateColumn(column.clone()));
            }
        }
        Ok(())
    }

    pub fn is_current(&self) -> bool {
        *self == Self::current()
    }
}
