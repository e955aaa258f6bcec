//! Log-domain naive Bayes prediction

use super::types::{LogScores, Model};
use crate::dataset::{FeatureVector, Label};
use crate::error::{PhishError, Result};

/// Log scores of a record over the given features
pub fn score(values: &FeatureVector, features: &[String], model: &Model) -> Result<LogScores> {
    let p_y = model.prior();
    let mut scores = LogScores {
        legitimate: (1.0 - p_y).ln(),
        phishing: p_y.ln(),
    };

    for feature in features {
        let value = *values
            .get(feature)
            .ok_or_else(|| PhishError::MissingFeature(feature.clone()))?;

        scores.legitimate += model.probability(feature, value, Label::Legitimate)?.ln();
        scores.phishing += model.probability(feature, value, Label::Phishing)?.ln();
    }

    Ok(scores)
}

/// Classify a record over the given features; `true` means phishing
pub fn predict(values: &FeatureVector, features: &[String], model: &Model) -> Result<bool> {
    Ok(score(values, features, model)?.is_phishing())
}

/// Score a site over exactly the model's feature set.
///
/// `values` must name every model feature and nothing else.
pub fn classify(model: &Model, values: &FeatureVector) -> Result<bool> {
    Ok(score_site(model, values)?.is_phishing())
}

/// Log scores of a site over exactly the model's feature set
pub fn score_site(model: &Model, values: &FeatureVector) -> Result<LogScores> {
    if let Some(extra) = values.keys().find(|k| !model.has_feature(k)) {
        return Err(PhishError::UnknownFeature(extra.clone()));
    }

    let features: Vec<String> = model.features().map(str::to_string).collect();
    score(values, &features, model)
}
