//! Held-out evaluation: accuracy, confusion matrix and per-class report.

use crate::dataset::Label;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `[[tn, fp], [fn, tp]]`, rows are true labels, columns predicted (phishing = positive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix(pub [[usize; 2]; 2]);

impl ConfusionMatrix {
    pub fn from_labels(truth: &[Label], predicted: &[Label]) -> Self {
        let mut m = [[0usize; 2]; 2];
        for (t, p) in truth.iter().zip(predicted) {
            m[t.as_u8() as usize][p.as_u8() as usize] += 1;
        }
        Self(m)
    }

    pub fn total(&self) -> usize {
        self.0.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        self.0[0][0] + self.0[1][1]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub legitimate: ClassScores,
    pub phishing: ClassScores,
    pub macro_avg: ClassScores,
    pub weighted_avg: ClassScores,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn scores_for(cm: &ConfusionMatrix, class: usize) -> ClassScores {
    let m = &cm.0;
    let other = 1 - class;
    let tp = m[class][class];
    let predicted = tp + m[other][class];
    let support = m[class][0] + m[class][1];
    let precision = ratio(tp, predicted);
    let recall = ratio(tp, support);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    ClassScores {
        precision,
        recall,
        f1,
        support,
    }
}

impl EvaluationReport {
    pub fn from_labels(truth: &[Label], predicted: &[Label]) -> Self {
        let confusion = ConfusionMatrix::from_labels(truth, predicted);
        let legitimate = scores_for(&confusion, 0);
        let phishing = scores_for(&confusion, 1);
        let total = legitimate.support + phishing.support;

        let macro_avg = ClassScores {
            precision: (legitimate.precision + phishing.precision) / 2.0,
            recall: (legitimate.recall + phishing.recall) / 2.0,
            f1: (legitimate.f1 + phishing.f1) / 2.0,
            support: total,
        };
        let weigh = |a: f64, b: f64| {
            if total == 0 {
                0.0
            } else {
                (a * legitimate.support as f64 + b * phishing.support as f64) / total as f64
            }
        };
        let weighted_avg = ClassScores {
            precision: weigh(legitimate.precision, phishing.precision),
            recall: weigh(legitimate.recall, phishing.recall),
            f1: weigh(legitimate.f1, phishing.f1),
            support: total,
        };

        Self {
            accuracy: ratio(confusion.correct(), confusion.total()),
            confusion,
            legitimate,
            phishing,
            macro_avg,
            weighted_avg,
        }
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.confusion.0;
        writeln!(f, "Accuracy: {:.4}", self.accuracy)?;
        writeln!(f, "Confusion Matrix:")?;
        writeln!(f, "[[{} {}]", m[0][0], m[0][1])?;
        writeln!(f, " [{} {}]]", m[1][0], m[1][1])?;
        writeln!(f, "Classification Report:")?;
        writeln!(
            f,
            "{:>14} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for (name, s) in [
            ("legitimate", &self.legitimate),
            ("phishing", &self.phishing),
            ("macro avg", &self.macro_avg),
            ("weighted avg", &self.weighted_avg),
        ] {
            writeln!(
                f,
                "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, s.precision, s.recall, s.f1, s.support
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Label::{Legitimate as L, Phishing as P};

    #[test]
    fn confusion_layout() {
        let truth = [L, L, L, P, P];
        let pred = [L, P, L, P, L];
        let cm = ConfusionMatrix::from_labels(&truth, &pred);
        assert_eq!(cm.0, [[2, 1], [1, 1]]);
        assert_eq!(cm.total(), 5);
        assert_eq!(cm.correct(), 3);
    }

    #[test]
    fn per_class_scores() {
        let truth = [L, L, L, P, P];
        let pred = [L, P, L, P, L];
        let r = EvaluationReport::from_labels(&truth, &pred);
        assert!((r.accuracy - 0.6).abs() < 1e-12);
        assert!((r.phishing.precision - 0.5).abs() < 1e-12);
        assert!((r.phishing.recall - 0.5).abs() < 1e-12);
        assert!((r.legitimate.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((r.legitimate.recall - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(r.legitimate.support, 3);
        assert_eq!(r.weighted_avg.support, 5);
        let expected_weighted = (2.0 / 3.0 * 3.0 + 0.5 * 2.0) / 5.0;
        assert!((r.weighted_avg.recall - expected_weighted).abs() < 1e-12);
    }

    #[test]
    fn no_predictions_for_class_is_zero_not_nan() {
        let r = EvaluationReport::from_labels(&[L, P], &[L, L]);
        assert_eq!(r.phishing.precision, 0.0);
        assert_eq!(r.phishing.f1, 0.0);
        assert!(r.macro_avg.precision.is_finite());
    }

    #[test]
    fn empty_is_zero() {
        let r = EvaluationReport::from_labels(&[], &[]);
        assert_eq!(r.accuracy, 0.0);
        assert_eq!(r.weighted_avg.f1, 0.0);
    }

    #[test]
    fn display_mentions_sections() {
        let r = EvaluationReport::from_labels(&[L, P], &[L, P]);
        let text = r.to_string();
        assert!(text.contains("Accuracy: 1.0000"));
        assert!(text.contains("[[1 0]"));
        assert!(text.contains("weighted avg"));
    }
}
