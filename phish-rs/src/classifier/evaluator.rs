//! Held-out evaluation
//!
//! Trains on one partition, predicts every record of the other and reports
//! accuracy, precision and recall.

use tracing::{info, warn};

use super::estimator::train;
use super::predictor::predict;
use super::types::{EvaluationPolicy, EvaluationReport, Model};
use crate::dataset::Dataset;
use crate::error::Result;

/// Train on `train_data` and evaluate on `test_data`, aborting on the first
/// record that cannot be scored
pub fn evaluate(
    features: &[String],
    train_data: &Dataset,
    test_data: &Dataset,
) -> Result<EvaluationReport> {
    evaluate_with_policy(features, train_data, test_data, EvaluationPolicy::Abort)
}

/// Train on `train_data` and evaluate on `test_data` under `policy`
pub fn evaluate_with_policy(
    features: &[String],
    train_data: &Dataset,
    test_data: &Dataset,
    policy: EvaluationPolicy,
) -> Result<EvaluationReport> {
    let model = train(features, train_data)?;
    evaluate_model(&model, features, test_data, policy)
}

/// Evaluate an already trained model
pub fn evaluate_model(
    model: &Model,
    features: &[String],
    test_data: &Dataset,
    policy: EvaluationPolicy,
) -> Result<EvaluationReport> {
    let mut report = EvaluationReport {
        total: test_data.len(),
        ..EvaluationReport::default()
    };

    for record in test_data.records() {
        let predicted = match predict(record.features(), features, model) {
            Ok(predicted) => predicted,
            Err(e) if policy == EvaluationPolicy::SkipUnscorable => {
                warn!("Skipping record {:?}: {}", record.id, e);
                report.skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };
        let actual = record.label().is_phishing();

        report.scored += 1;
        if actual {
            report.actual_phish += 1;
        }
        if predicted {
            report.predicted_phish += 1;
        }
        match (actual, predicted) {
            (true, true) => report.correctly_phish += 1,
            (false, false) => report.correctly_not_phish += 1,
            _ => {}
        }
    }

    report.accuracy = ratio(
        report.correctly_phish + report.correctly_not_phish,
        report.scored,
    );
    report.precision = ratio(report.correctly_phish, report.predicted_phish);
    report.recall = ratio(report.correctly_phish, report.actual_phish);

    if report.precision.is_none() {
        warn!("No phishing predictions; precision is undefined");
    }
    if report.recall.is_none() {
        warn!("No phishing records in the test set; recall is undefined");
    }

    info!(
        "Evaluated {} records ({} skipped): accuracy {}, precision {}, recall {}",
        report.scored,
        report.skipped,
        format_metric(report.accuracy),
        format_metric(report.precision),
        format_metric(report.recall)
    );

    Ok(report)
}

/// `None` when the denominator is zero
fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

/// Render a metric, `n/a` when undefined
pub fn format_metric(metric: Option<f64>) -> String {
    match metric {
        Some(value) => format!("{:.4}", value),
        None => "n/a".to_string(),
    }
}
