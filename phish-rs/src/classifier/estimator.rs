//! Conditional probability estimation
//!
//! Builds the naive Bayes model from a training partition: Laplace-smoothed
//! `P(value | label)` for every value a selected feature takes, and the raw
//! phishing prior.

use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

use super::types::{Model, ProbabilityTable, ValueProbabilities, PRIOR_KEY};
use crate::dataset::{value_key, Dataset, FeatureValue};
use crate::error::{PhishError, Result};

/// Distinct values of `feature` in the dataset
pub fn support(dataset: &Dataset, feature: &str) -> BTreeSet<FeatureValue> {
    dataset
        .records()
        .iter()
        .filter_map(|r| r.get(feature))
        .collect()
}

/// Train a model on `features` of `dataset`
pub fn train(features: &[String], dataset: &Dataset) -> Result<Model> {
    for feature in features {
        if feature == PRIOR_KEY {
            return Err(PhishError::Schema(format!(
                "feature name '{}' is reserved",
                PRIOR_KEY
            )));
        }
        if !dataset.has_feature(feature) {
            return Err(PhishError::Schema(format!(
                "dataset has no feature '{}'",
                feature
            )));
        }
    }

    let (legitimate, phishing) = dataset.class_counts();
    if phishing == 0 {
        return Err(PhishError::EmptyClass("phishing"));
    }
    if legitimate == 0 {
        return Err(PhishError::EmptyClass("legitimate"));
    }

    let mut table = ProbabilityTable::new();
    for feature in features {
        // (legitimate, phishing) co-occurrence counts per value
        let mut counts: BTreeMap<FeatureValue, [usize; 2]> = support(dataset, feature)
            .into_iter()
            .map(|v| (v, [0, 0]))
            .collect();

        for record in dataset.records() {
            let Some(value) = record.get(feature) else {
                continue;
            };
            if let Some(entry) = counts.get_mut(&value) {
                entry[record.label().index()] += 1;
            }
        }

        let values: ValueProbabilities = counts
            .into_iter()
            .map(|(value, [legit_count, phish_count])| {
                (
                    value_key(value),
                    [
                        smoothed(legit_count, legitimate),
                        smoothed(phish_count, phishing),
                    ],
                )
            })
            .collect();

        table.insert(feature.clone(), values);
    }

    let p_y = phishing as f64 / dataset.len() as f64;
    let model = Model::new(table, p_y)?;

    info!(
        "Trained model on {} rows: {} features, {} table entries, prior {:.4}",
        dataset.len(),
        features.len(),
        model.table().values().map(|v| v.len()).sum::<usize>(),
        p_y
    );

    Ok(model)
}

/// `(count + 1) / (class_total + 2)`
fn smoothed(count: usize, class_total: usize) -> f64 {
    (count as f64 + 1.0) / (class_total as f64 + 2.0)
}
