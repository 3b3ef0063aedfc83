//! URL feature extraction.
//!
//! Maps any string to a fixed, ordered vector of ten non-negative integers.
//! The order is published as [`FEATURE_COLUMNS`] and is the contract shared by
//! training and scoring: build numeric rows by walking an explicit column list
//! (see [`FeatureVector::to_row`]), never by iterating a map.
//!
//! Extraction is total. Malformed input degrades host-dependent features to 0.

mod host;
mod lexical;
mod normalize;

pub use host::{
    has_dash, has_https_scheme, has_https_token_in_domain, has_port, is_shortened,
    is_shortener_host, subdomain_count, ParsedFeatures,
};
pub use lexical::{has_at, has_ip, num_dots, url_length};
pub use normalize::{parse_tolerant, ParsedUrl};

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Number of features in the schema.
pub const FEATURE_COUNT: usize = 10;

/// The published schema: feature names in vector order.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "url_length",
    "num_dots",
    "has_at",
    "has_https_scheme",
    "has_https_token_in_domain",
    "is_shortened",
    "has_ip",
    "has_dash",
    "has_port",
    "subdomain_count",
];

/// One column of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    UrlLength,
    NumDots,
    HasAt,
    HasHttpsScheme,
    HasHttpsTokenInDomain,
    IsShortened,
    HasIp,
    HasDash,
    HasPort,
    SubdomainCount,
}

impl Feature {
    /// All features in schema order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::UrlLength,
        Feature::NumDots,
        Feature::HasAt,
        Feature::HasHttpsScheme,
        Feature::HasHttpsTokenInDomain,
        Feature::IsShortened,
        Feature::HasIp,
        Feature::HasDash,
        Feature::HasPort,
        Feature::SubdomainCount,
    ];

    pub const fn name(self) -> &'static str {
        FEATURE_COLUMNS[self.index()]
    }

    /// Position in the schema.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        FEATURE_COLUMNS
            .iter()
            .position(|c| *c == name)
            .map(|i| Feature::ALL[i])
    }

    fn compute(self, raw: &str, parsed: &ParsedFeatures<'_>) -> u64 {
        match self {
            Feature::UrlLength => url_length(raw),
            Feature::NumDots => num_dots(raw),
            Feature::HasAt => has_at(raw),
            Feature::HasHttpsScheme => parsed.has_https_scheme(),
            Feature::HasHttpsTokenInDomain => parsed.has_https_token_in_domain(),
            Feature::IsShortened => parsed.is_shortened(),
            Feature::HasIp => has_ip(raw),
            Feature::HasDash => parsed.has_dash(),
            Feature::HasPort => parsed.has_port(),
            Feature::SubdomainCount => parsed.subdomain_count(),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A column name the extractor does not produce.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feature column: {0}")]
pub struct UnknownFeature(pub String);

/// Feature values for one URL, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureVector {
    values: [u64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn values(&self) -> &[u64; FEATURE_COUNT] {
        &self.values
    }

    pub fn get(&self, feature: Feature) -> u64 {
        self.values[feature.index()]
    }

    pub fn get_by_name(&self, name: &str) -> Option<u64> {
        Feature::from_name(name).map(|f| self.get(f))
    }

    /// `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        FEATURE_COLUMNS.iter().copied().zip(self.values.iter().copied())
    }

    /// Numeric row ordered by `columns` (e.g. the column list stored in a model bundle).
    pub fn to_row<S: AsRef<str>>(&self, columns: &[S]) -> Result<Vec<f64>, UnknownFeature> {
        columns
            .iter()
            .map(|c| {
                let name = c.as_ref();
                self.get_by_name(name)
                    .map(|v| v as f64)
                    .ok_or_else(|| UnknownFeature(name.to_string()))
            })
            .collect()
    }
}

/// Serialized as an object whose keys follow schema order.
impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// Extract all features from `url`. Parses once and shares the result.
///
/// # Examples
///
/// - `extract("")` → all zeros
/// - `extract("https://bit.ly/xyz")` → `has_https_scheme = 1`, `is_shortened = 1`
pub fn extract(url: &str) -> FeatureVector {
    let parsed = ParsedFeatures::new(url);
    let mut values = [0u64; FEATURE_COUNT];
    for feature in Feature::ALL {
        values[feature.index()] = feature.compute(url, &parsed);
    }
    FeatureVector { values }
}
