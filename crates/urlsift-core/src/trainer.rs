//! Training pipeline: featurize, stratified split, fit, evaluate, bundle.

use crate::bundle::ModelBundle;
use crate::config::TrainingConfig;
use crate::dataset::{featurize, Label, LabeledUrl};
use crate::metrics::EvaluationReport;
use crate::model::{Classifier, LogisticRegression, Model, ModelError};
use crate::split::{stratified_split, SplitError};

#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error("dataset is empty")]
    EmptyDataset,
    #[error(transparent)]
    Split(#[from] SplitError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A trained bundle and its held-out evaluation.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub bundle: ModelBundle,
    pub report: EvaluationReport,
    pub n_train: usize,
    pub n_test: usize,
}

/// Train a classifier on `samples` and evaluate it on a stratified hold-out.
///
/// The feature matrix is laid out by the published schema, and the same
/// schema is stored in the returned bundle.
pub fn train(samples: &[LabeledUrl], cfg: &TrainingConfig) -> Result<TrainOutcome, TrainError> {
    if samples.is_empty() {
        return Err(TrainError::EmptyDataset);
    }

    let (x, y) = featurize(samples);
    let split = stratified_split(&y, cfg.test_fraction, cfg.seed)?;
    tracing::info!(
        rows = samples.len(),
        train = split.train.len(),
        test = split.test.len(),
        "split dataset"
    );

    let x_train = x.select(&split.train);
    let y_train: Vec<Label> = split.train.iter().map(|&i| y[i]).collect();
    let model = LogisticRegression::fit(&x_train, &y_train, &cfg.fit_params())?;
    let model = Model::LogisticRegression(model);

    let x_test = x.select(&split.test);
    let y_test: Vec<Label> = split.test.iter().map(|&i| y[i]).collect();
    let predicted = x_test
        .rows()
        .map(|row| model.predict(row, 0.5))
        .collect::<Result<Vec<_>, _>>()?;

    let report = EvaluationReport::from_labels(&y_test, &predicted);
    tracing::info!(accuracy = report.accuracy, "evaluated on held-out split");

    Ok(TrainOutcome {
        bundle: ModelBundle::new(model, Some(report.clone())),
        report,
        n_train: split.train.len(),
        n_test: split.test.len(),
    })
}
