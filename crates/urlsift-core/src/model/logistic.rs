//! Binary logistic regression on standardized inputs, fit by full-batch gradient descent.

use crate::dataset::{FeatureMatrix, Label};
use serde::{Deserialize, Serialize};

use super::ModelError;

/// Hyper-parameters for [`LogisticRegression::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct FitParams {
    pub epochs: usize,
    pub learning_rate: f64,
    /// L2 penalty on weights (not on the bias).
    pub l2: f64,
    /// Weight each class by `n / (2 * n_class)` so rare classes count equally.
    pub balanced_class_weight: bool,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            epochs: 500,
            learning_rate: 0.1,
            l2: 1e-4,
            balanced_class_weight: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    pub bias: f64,
    /// Per-column mean used for standardization.
    pub means: Vec<f64>,
    /// Per-column standard deviation (1.0 for constant columns).
    pub scales: Vec<f64>,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl LogisticRegression {
    pub fn fit(x: &FeatureMatrix, y: &[Label], params: &FitParams) -> Result<Self, ModelError> {
        let n = x.n_rows();
        let d = x.n_cols();
        if n == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }
        if y.len() != n {
            return Err(ModelError::LabelCount {
                rows: n,
                labels: y.len(),
            });
        }

        let (means, scales) = column_stats(x);
        let z: Vec<Vec<f64>> = x
            .rows()
            .map(|row| standardize(row, &means, &scales))
            .collect();
        let targets: Vec<f64> = y.iter().map(|l| f64::from(l.as_u8())).collect();
        let sample_weights = class_weights(y, params.balanced_class_weight);
        let total_weight: f64 = sample_weights.iter().sum();

        let mut weights = vec![0.0; d];
        let mut bias = 0.0;
        let mut grad_w = vec![0.0; d];

        for epoch in 0..params.epochs {
            grad_w.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_b = 0.0;
            let mut loss = 0.0;

            for ((row, &t), &sw) in z.iter().zip(&targets).zip(&sample_weights) {
                let p = sigmoid(dot(&weights, row) + bias);
                let err = sw * (p - t);
                for (g, v) in grad_w.iter_mut().zip(row) {
                    *g += err * v;
                }
                grad_b += err;
                let p = p.clamp(1e-12, 1.0 - 1e-12);
                loss -= sw * (t * p.ln() + (1.0 - t) * (1.0 - p).ln());
            }

            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= params.learning_rate * (g / total_weight + params.l2 * *w);
            }
            bias -= params.learning_rate * grad_b / total_weight;

            if epoch % 100 == 0 {
                tracing::trace!(epoch, loss = loss / total_weight, "logistic regression epoch");
            }
        }

        Ok(Self {
            weights,
            bias,
            means,
            scales,
        })
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Probability of [`Label::Phishing`] for a raw (unstandardized) row.
    pub fn probability(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.n_features() {
            return Err(ModelError::FeatureCount {
                expected: self.n_features(),
                found: row.len(),
            });
        }
        let z = standardize(row, &self.means, &self.scales);
        Ok(sigmoid(dot(&self.weights, &z) + self.bias))
    }

    /// Structural check for deserialized models.
    pub fn validate(&self) -> Result<(), ModelError> {
        let d = self.weights.len();
        if self.means.len() != d || self.scales.len() != d {
            return Err(ModelError::Corrupt(format!(
                "{} weights, {} means, {} scales",
                d,
                self.means.len(),
                self.scales.len()
            )));
        }
        let finite = self
            .weights
            .iter()
            .chain(&self.means)
            .chain(&self.scales)
            .chain(std::iter::once(&self.bias))
            .all(|v| v.is_finite());
        if !finite {
            return Err(ModelError::Corrupt("non-finite parameter".to_string()));
        }
        if self.scales.iter().any(|s| *s <= 0.0) {
            return Err(ModelError::Corrupt("non-positive scale".to_string()));
        }
        Ok(())
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn standardize(row: &[f64], means: &[f64], scales: &[f64]) -> Vec<f64> {
    row.iter()
        .zip(means)
        .zip(scales)
        .map(|((v, m), s)| (v - m) / s)
        .collect()
}

fn column_stats(x: &FeatureMatrix) -> (Vec<f64>, Vec<f64>) {
    let n = x.n_rows() as f64;
    let d = x.n_cols();
    let mut means = vec![0.0; d];
    for row in x.rows() {
        for (m, v) in means.iter_mut().zip(row) {
            *m += v;
        }
    }
    means.iter_mut().for_each(|m| *m /= n);

    let mut vars = vec![0.0; d];
    for row in x.rows() {
        for ((var, v), m) in vars.iter_mut().zip(row).zip(&means) {
            *var += (v - m).powi(2);
        }
    }
    let scales = vars
        .into_iter()
        .map(|v| {
            let s = (v / n).sqrt();
            if s > 1e-12 {
                s
            } else {
                1.0
            }
        })
        .collect();
    (means, scales)
}

fn class_weights(y: &[Label], balanced: bool) -> Vec<f64> {
    if !balanced {
        return vec![1.0; y.len()];
    }
    let n = y.len() as f64;
    let phish = y.iter().filter(|l| **l == Label::Phishing).count() as f64;
    let legit = n - phish;
    let weight = |count: f64| if count > 0.0 { n / (2.0 * count) } else { 0.0 };
    let (w_legit, w_phish) = (weight(legit), weight(phish));
    y.iter()
        .map(|l| match l {
            Label::Legitimate => w_legit,
            Label::Phishing => w_phish,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract;

    fn toy() -> (FeatureMatrix, Vec<Label>) {
        let urls = [
            ("https://example.com", Label::Legitimate),
            ("https://docs.rs/serde", Label::Legitimate),
            ("https://github.com/rust-lang", Label::Legitimate),
            ("https://wikipedia.org/wiki/Rust", Label::Legitimate),
            ("http://192.168.10.4/login@secure", Label::Phishing),
            ("http://10.0.0.7:8080/verify@account", Label::Phishing),
            ("http://172.16.0.9/paypal@update", Label::Phishing),
            ("http://10.1.1.1:81/bank@signin", Label::Phishing),
        ];
        let vectors: Vec<_> = urls.iter().map(|(u, _)| extract(u)).collect();
        let x = FeatureMatrix::from_vectors(&vectors, &crate::features::FEATURE_COLUMNS).unwrap();
        (x, urls.iter().map(|(_, l)| *l).collect())
    }

    #[test]
    fn separates_toy_set() {
        let (x, y) = toy();
        let model = LogisticRegression::fit(&x, &y, &FitParams::default()).unwrap();
        for (row, label) in x.rows().zip(&y) {
            let p = model.probability(row).unwrap();
            match label {
                Label::Phishing => assert!(p > 0.5, "expected phishing, p = {p}"),
                Label::Legitimate => assert!(p < 0.5, "expected legitimate, p = {p}"),
            }
        }
        assert!(model.validate().is_ok());
    }

    #[test]
    fn constant_columns_get_unit_scale() {
        let (x, y) = toy();
        let model = LogisticRegression::fit(&x, &y, &FitParams::default()).unwrap();
        // is_shortened is 0 for every toy URL.
        assert_eq!(model.scales[5], 1.0);
        assert_eq!(model.means[5], 0.0);
    }

    #[test]
    fn balanced_weights() {
        let y = vec![Label::Legitimate, Label::Legitimate, Label::Legitimate, Label::Phishing];
        let w = class_weights(&y, true);
        assert!((w[0] - 4.0 / 6.0).abs() < 1e-12);
        assert!((w[3] - 2.0).abs() < 1e-12);
        assert_eq!(class_weights(&y, false), vec![1.0; 4]);
    }

    #[test]
    fn sigmoid_is_stable() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn rejects_wrong_row_width() {
        let (x, y) = toy();
        let model = LogisticRegression::fit(&x, &y, &FitParams::default()).unwrap();
        assert!(matches!(
            model.probability(&[1.0, 2.0]),
            Err(ModelError::FeatureCount { expected: 10, found: 2 })
        ));
    }

    #[test]
    fn empty_training_set() {
        let x = FeatureMatrix::from_vectors(&[], &["url_length"]).unwrap();
        assert!(matches!(
            LogisticRegression::fit(&x, &[], &FitParams::default()),
            Err(ModelError::EmptyTrainingSet)
        ));
    }

    #[test]
    fn validate_catches_shape_mismatch() {
        let m = LogisticRegression {
            weights: vec![0.1, 0.2],
            bias: 0.0,
            means: vec![0.0],
            scales: vec![1.0, 1.0],
        };
        assert!(matches!(m.validate(), Err(ModelError::Corrupt(_))));
    }
}
