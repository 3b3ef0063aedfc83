//! Labelled URL datasets and feature matrices.
//!
//! Input is CSV with at least `url` and `label` columns (0 = legitimate,
//! 1 = phishing); other columns are ignored. Matrices are always laid out by an
//! explicit column list.

use crate::features::{extract, FeatureVector, UnknownFeature, FEATURE_COLUMNS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::Path;

/// Class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Legitimate,
    Phishing,
}

impl Label {
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Legitimate => 0,
            Label::Phishing => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Label> {
        match v {
            0 => Some(Label::Legitimate),
            1 => Some(Label::Phishing),
            _ => None,
        }
    }

    /// Accepts `0`/`1` (also `0.0`/`1.0`, as written by some exporters).
    pub fn parse(s: &str) -> Option<Label> {
        match s.trim() {
            "0" | "0.0" => Some(Label::Legitimate),
            "1" | "1.0" => Some(Label::Phishing),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Legitimate => f.write_str("legitimate"),
            Label::Phishing => f.write_str("phishing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledUrl {
    pub url: String,
    pub label: Label,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset must contain 'url' and 'label' columns")]
    MissingColumns,
    #[error("row {row}: invalid label {value:?} (expected 0 or 1)")]
    InvalidLabel { row: usize, value: String },
    #[error("row {row}: missing field")]
    MissingField { row: usize },
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// Read a labelled dataset from CSV.
pub fn read_csv<R: io::Read>(reader: R) -> Result<Vec<LabeledUrl>, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let url_idx = headers.iter().position(|h| h.trim() == "url");
    let label_idx = headers.iter().position(|h| h.trim() == "label");
    let (Some(url_idx), Some(label_idx)) = (url_idx, label_idx) else {
        return Err(DatasetError::MissingColumns);
    };

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let (Some(url), Some(raw_label)) = (record.get(url_idx), record.get(label_idx)) else {
            return Err(DatasetError::MissingField { row });
        };
        let label = Label::parse(raw_label).ok_or_else(|| DatasetError::InvalidLabel {
            row,
            value: raw_label.to_string(),
        })?;
        rows.push(LabeledUrl {
            url: url.to_string(),
            label,
        });
    }

    tracing::debug!(rows = rows.len(), "read labelled dataset");
    Ok(rows)
}

pub fn load_csv(path: &Path) -> Result<Vec<LabeledUrl>, DatasetError> {
    let file = std::fs::File::open(path)?;
    read_csv(io::BufReader::new(file))
}

/// Dense row-major matrix whose columns follow `columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    data: Vec<f64>,
    rows: usize,
}

impl FeatureMatrix {
    /// Build from feature vectors, laying each row out by `columns`.
    pub fn from_vectors<S: AsRef<str>>(
        vectors: &[FeatureVector],
        columns: &[S],
    ) -> Result<Self, UnknownFeature> {
        let mut data = Vec::with_capacity(vectors.len() * columns.len());
        for v in vectors {
            data.extend(v.to_row(columns)?);
        }
        Ok(Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            data,
            rows: vectors.len(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let w = self.n_cols();
        &self.data[i * w..(i + 1) * w]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Rows at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> FeatureMatrix {
        let mut data = Vec::with_capacity(indices.len() * self.n_cols());
        for &i in indices {
            data.extend_from_slice(self.row(i));
        }
        FeatureMatrix {
            columns: self.columns.clone(),
            data,
            rows: indices.len(),
        }
    }
}

/// Extract every URL and build a matrix in published schema order, plus labels.
pub fn featurize(samples: &[LabeledUrl]) -> (FeatureMatrix, Vec<Label>) {
    let mut data = Vec::with_capacity(samples.len() * FEATURE_COLUMNS.len());
    for sample in samples {
        data.extend(extract(&sample.url).values().iter().map(|&v| v as f64));
    }
    let matrix = FeatureMatrix {
        columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        data,
        rows: samples.len(),
    };
    let labels = samples.iter().map(|s| s.label).collect();
    (matrix, labels)
}

/// Write `FEATURE_COLUMNS` + `label` as CSV, one row per sample.
pub fn write_feature_csv<W: io::Write>(
    writer: W,
    samples: &[LabeledUrl],
) -> Result<(), DatasetError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header: Vec<&str> = FEATURE_COLUMNS.to_vec();
    header.push("label");
    wtr.write_record(&header)?;

    for sample in samples {
        let v = extract(&sample.url);
        let mut record: Vec<String> = v.values().iter().map(|x| x.to_string()).collect();
        record.push(sample.label.as_u8().to_string());
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_url_and_label_ignoring_extra_columns() {
        let csv = "id,url,label,source\n1,https://bit.ly/x,1,feed\n2,https://example.com,0,alexa\n";
        let rows = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url, "https://bit.ly/x");
        assert_eq!(rows[0].label, Label::Phishing);
        assert_eq!(rows[1].label, Label::Legitimate);
    }

    #[test]
    fn quoted_urls_with_commas() {
        let csv = "url,label\n\"http://a.com/?x=1,2\",0\n";
        let rows = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].url, "http://a.com/?x=1,2");
    }

    #[test]
    fn missing_label_column() {
        let csv = "url,class\nhttp://a.com,1\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumns));
        assert_eq!(
            err.to_string(),
            "dataset must contain 'url' and 'label' columns"
        );
    }

    #[test]
    fn invalid_label_names_row() {
        let csv = "url,label\nhttp://a.com,0\nhttp://b.com,yes\n";
        match read_csv(csv.as_bytes()).unwrap_err() {
            DatasetError::InvalidLabel { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "yes");
            }
            other => panic!("expected InvalidLabel, got {other:?}"),
        }
    }

    #[test]
    fn label_parsing() {
        assert_eq!(Label::parse("1.0"), Some(Label::Phishing));
        assert_eq!(Label::parse(" 0 "), Some(Label::Legitimate));
        assert_eq!(Label::parse("2"), None);
        assert_eq!(Label::from_u8(1), Some(Label::Phishing));
        assert_eq!(Label::Phishing.as_u8(), 1);
    }

    #[test]
    fn featurize_uses_schema_order() {
        let samples = vec![LabeledUrl {
            url: "https://bit.ly/xyz".into(),
            label: Label::Phishing,
        }];
        let (m, labels) = featurize(&samples);
        assert_eq!(m.columns(), FEATURE_COLUMNS);
        assert_eq!(m.n_rows(), 1);
        assert_eq!(m.row(0)[0], 18.0);
        assert_eq!(m.row(0)[5], 1.0);
        assert_eq!(labels, vec![Label::Phishing]);
    }

    #[test]
    fn matrix_select_and_rows() {
        let vectors = vec![extract("a"), extract("b.c"), extract("d.e.f")];
        let m = FeatureMatrix::from_vectors(&vectors, &["num_dots"]).unwrap();
        assert_eq!(m.rows().map(|r| r[0]).collect::<Vec<_>>(), vec![0.0, 1.0, 2.0]);
        let s = m.select(&[2, 0]);
        assert_eq!(s.n_rows(), 2);
        assert_eq!(s.row(0), &[2.0]);
        assert_eq!(s.row(1), &[0.0]);
    }

    #[test]
    fn feature_csv_has_schema_header() {
        let samples = vec![LabeledUrl {
            url: "http://example.com".into(),
            label: Label::Legitimate,
        }];
        let mut out = Vec::new();
        write_feature_csv(&mut out, &samples).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "url_length,num_dots,has_at,has_https_scheme,has_https_token_in_domain,\
             is_shortened,has_ip,has_dash,has_port,subdomain_count,label"
        );
        assert_eq!(lines.next().unwrap(), "18,1,0,0,0,0,0,0,0,0,0");
    }
}
