//! Seeded, label-stratified train/test split.

use crate::dataset::Label;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("test fraction must be in (0, 1), got {0}")]
    InvalidFraction(String),
    #[error("class '{label}' has {count} sample(s); stratified split needs at least 2")]
    TooFewSamples { label: Label, count: usize },
}

/// Row indices of the two partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split indices so each class keeps its proportion in both partitions.
///
/// Per class, `round(n * test_fraction)` rows go to test, clamped so that each
/// side keeps at least one row. Both partitions come back sorted.
pub fn stratified_split(
    labels: &[Label],
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit, SplitError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(SplitError::InvalidFraction(test_fraction.to_string()));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in [Label::Legitimate, Label::Phishing] {
        let mut idx: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == class)
            .map(|(i, _)| i)
            .collect();
        if idx.len() < 2 {
            return Err(SplitError::TooFewSamples {
                label: class,
                count: idx.len(),
            });
        }

        idx.shuffle(&mut rng);
        let n_test = ((idx.len() as f64 * test_fraction).round() as usize).clamp(1, idx.len() - 1);
        test.extend_from_slice(&idx[..n_test]);
        train.extend_from_slice(&idx[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok(TrainTestSplit { train, test })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(legit: usize, phish: usize) -> Vec<Label> {
        let mut v = vec![Label::Legitimate; legit];
        v.extend(std::iter::repeat(Label::Phishing).take(phish));
        v
    }

    #[test]
    fn keeps_class_proportions() {
        let y = labels(80, 20);
        let s = stratified_split(&y, 0.2, 42).unwrap();
        assert_eq!(s.test.len(), 20);
        assert_eq!(s.train.len(), 80);
        let test_phish = s.test.iter().filter(|&&i| y[i] == Label::Phishing).count();
        assert_eq!(test_phish, 4);
    }

    #[test]
    fn partitions_are_disjoint_and_complete() {
        let y = labels(13, 7);
        let s = stratified_split(&y, 0.3, 7).unwrap();
        let mut all: Vec<usize> = s.train.iter().chain(s.test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_split() {
        let y = labels(50, 50);
        assert_eq!(
            stratified_split(&y, 0.2, 1).unwrap(),
            stratified_split(&y, 0.2, 1).unwrap()
        );
    }

    #[test]
    fn tiny_classes_keep_one_each_side() {
        let y = labels(2, 2);
        let s = stratified_split(&y, 0.1, 0).unwrap();
        assert_eq!(s.test.len(), 2);
        assert_eq!(s.train.len(), 2);
    }

    #[test]
    fn rejects_single_sample_class() {
        let y = labels(10, 1);
        assert_eq!(
            stratified_split(&y, 0.2, 0),
            Err(SplitError::TooFewSamples {
                label: Label::Phishing,
                count: 1
            })
        );
    }

    #[test]
    fn rejects_bad_fraction() {
        let y = labels(10, 10);
        assert!(stratified_split(&y, 0.0, 0).is_err());
        assert!(stratified_split(&y, 1.0, 0).is_err());
        assert!(stratified_split(&y, f64::NAN, 0).is_err());
    }
}
