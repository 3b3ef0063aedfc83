//! URL feature extraction for phishing-site classification.
//!
//! [`features::extract`] maps any string to ten integer signals in the order
//! published as [`features::FEATURE_COLUMNS`]. The trainer and the detector
//! both build numeric rows from that list, and bundles carry a versioned
//! [`schema::SchemaDescriptor`] so a model is never fed vectors from a
//! different schema.

pub mod config;
pub mod logging;

pub mod bundle;
pub mod dataset;
pub mod features;
pub mod inference;
pub mod metrics;
pub mod model;
pub mod schema;
pub mod split;
pub mod trainer;

pub use features::{extract, Feature, FeatureVector, FEATURE_COLUMNS};
pub use inference::{Detector, Verdict};
pub use schema::{SchemaDescriptor, SCHEMA_VERSION};
