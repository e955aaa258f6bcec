//! Classifier types and data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dataset::{value_key, FeatureValue, Label};
use crate::error::{PhishError, Result};

/// Reserved model key holding the prior
pub const PRIOR_KEY: &str = "p_y";

/// Per-value probabilities `[P(v | legitimate), P(v | phishing)]`
pub type ValueProbabilities = BTreeMap<String, [f64; 2]>;

/// Feature name to per-value conditional probabilities
pub type ProbabilityTable = BTreeMap<String, ValueProbabilities>;

/// Trained naive Bayes model
///
/// Immutable once built. Serializes as a flat JSON object: one key per
/// feature plus `p_y` for the prior (see `persistence`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "super::persistence::ModelRepr", into = "super::persistence::ModelRepr")]
pub struct Model {
    table: ProbabilityTable,
    p_y: f64,
}

impl Model {
    /// Build a model, checking every probability and key
    pub fn new(table: ProbabilityTable, p_y: f64) -> Result<Self> {
        let model = Self { table, p_y };
        model.validate()?;
        Ok(model)
    }

    pub fn table(&self) -> &ProbabilityTable {
        &self.table
    }

    /// Prior probability of the phishing class
    pub fn prior(&self) -> f64 {
        self.p_y
    }

    /// Feature names the model was trained on, sorted
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.table.contains_key(feature)
    }

    /// Conditional probability of `value` for `feature` given `label`
    pub fn probability(&self, feature: &str, value: FeatureValue, label: Label) -> Result<f64> {
        let entry = self
            .table
            .get(feature)
            .ok_or_else(|| PhishError::UnknownFeature(feature.to_string()))?;
        let key = value_key(value);
        entry
            .get(&key)
            .map(|pair| pair[label.index()])
            .ok_or_else(|| PhishError::UnseenValue {
                feature: feature.to_string(),
                value: key,
            })
    }

    /// Values observed for `feature` during training
    pub fn support(&self, feature: &str) -> Option<Vec<FeatureValue>> {
        self.table.get(feature).map(|values| {
            // Keys are validated canonical integers
            values.keys().filter_map(|k| k.parse().ok()).collect()
        })
    }

    fn validate(&self) -> Result<()> {
        if !is_probability(self.p_y) {
            return Err(PhishError::ModelFormat(format!(
                "prior must lie in (0, 1), got {}",
                self.p_y
            )));
        }

        for (feature, values) in &self.table {
            if feature == PRIOR_KEY {
                return Err(PhishError::ModelFormat(format!(
                    "'{}' is reserved for the prior",
                    PRIOR_KEY
                )));
            }

            for (key, pair) in values {
                let canonical = key.parse::<FeatureValue>().ok().map(value_key);
                if canonical.as_deref() != Some(key.as_str()) {
                    return Err(PhishError::ModelFormat(format!(
                        "feature '{}' has non-integer value key '{}'",
                        feature, key
                    )));
                }

                if !pair.iter().all(|p| is_probability(*p)) {
                    return Err(PhishError::ModelFormat(format!(
                        "feature '{}' value {} has probabilities outside (0, 1): {:?}",
                        feature, key, pair
                    )));
                }
            }
        }

        Ok(())
    }
}

fn is_probability(p: f64) -> bool {
    p.is_finite() && p > 0.0 && p < 1.0
}

/// Likelihood ratio of one feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpact {
    pub feature: String,
    /// P(phishing | value >= threshold), smoothed
    pub p_high: f64,
    /// P(phishing | value < threshold), smoothed
    pub p_low: f64,
    pub ratio: f64,
}

/// Features ordered by ascending ratio
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ranking {
    pub entries: Vec<FeatureImpact>,
}

impl Ranking {
    /// Feature names in ranking order
    pub fn selected_features(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.feature.clone()).collect()
    }

    /// Highest-ratio feature
    pub fn top(&self) -> Option<&FeatureImpact> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Naive Bayes log scores of one record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogScores {
    pub legitimate: f64,
    pub phishing: f64,
}

impl LogScores {
    /// Ties go to legitimate
    pub fn is_phishing(&self) -> bool {
        self.phishing > self.legitimate
    }
}

/// What the evaluator does with a record it cannot score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvaluationPolicy {
    /// Stop at the first prediction error
    #[default]
    Abort,
    /// Count the record as skipped and continue
    SkipUnscorable,
}

/// Evaluation tallies and metrics
///
/// Metrics whose denominator is zero are `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EvaluationReport {
    pub total: usize,
    pub scored: usize,
    pub skipped: usize,
    pub actual_phish: usize,
    pub predicted_phish: usize,
    pub correctly_phish: usize,
    pub correctly_not_phish: usize,
    pub accuracy: Option<f64>,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str, [f64; 2])]) -> ProbabilityTable {
        let mut table = ProbabilityTable::new();
        for (feature, value, probs) in pairs {
            table
                .entry(feature.to_string())
                .or_default()
                .insert(value.to_string(), *probs);
        }
        table
    }

    #[test]
    fn test_model_lookup() {
        let model = Model::new(table(&[("a", "-1", [0.25, 0.75]), ("a", "1", [0.5, 0.5])]), 0.4)
            .unwrap();

        assert_eq!(model.probability("a", -1, Label::Phishing).unwrap(), 0.75);
        assert_eq!(model.probability("a", -1, Label::Legitimate).unwrap(), 0.25);
        assert_eq!(model.support("a"), Some(vec![-1, 1]));
        assert_eq!(model.features().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_model_lookup_errors() {
        let model = Model::new(table(&[("a", "1", [0.5, 0.5])]), 0.4).unwrap();

        assert!(matches!(
            model.probability("a", 0, Label::Phishing),
            Err(PhishError::UnseenValue { feature, value }) if feature == "a" && value == "0"
        ));
        assert!(matches!(
            model.probability("b", 1, Label::Phishing),
            Err(PhishError::UnknownFeature(_))
        ));
    }

    #[test]
    fn test_model_rejects_invalid() {
        assert!(Model::new(table(&[("a", "1", [0.0, 0.5])]), 0.4).is_err());
        assert!(Model::new(table(&[("a", "1", [0.5, 1.0])]), 0.4).is_err());
        assert!(Model::new(table(&[("a", "one", [0.5, 0.5])]), 0.4).is_err());
        assert!(Model::new(table(&[("a", "+1", [0.5, 0.5])]), 0.4).is_err());
        assert!(Model::new(table(&[("p_y", "1", [0.5, 0.5])]), 0.4).is_err());
        assert!(Model::new(table(&[("a", "1", [0.5, 0.5])]), 1.0).is_err());
        assert!(Model::new(table(&[("a", "1", [0.5, f64::NAN])]), 0.5).is_err());
    }

    #[test]
    fn test_log_scores_tie_is_legitimate() {
        let tie = LogScores {
            legitimate: -1.5,
            phishing: -1.5,
        };
        assert!(!tie.is_phishing());
    }
}
