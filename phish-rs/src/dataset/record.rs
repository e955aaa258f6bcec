//! Records and datasets

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{PhishError, Result};

/// A discrete feature code, typically -1, 0 or 1
pub type FeatureValue = i64;

/// Feature name to value mapping for a single website
pub type FeatureVector = BTreeMap<String, FeatureValue>;

/// Canonical string form of a feature value, used as the probability table key.
///
/// Plain base-10, `-` for negatives, no sign or padding otherwise.
pub fn value_key(value: FeatureValue) -> String {
    value.to_string()
}

/// Binary class label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Coded -1
    Legitimate,
    /// Coded 1
    Phishing,
}

impl Label {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            -1 => Ok(Label::Legitimate),
            1 => Ok(Label::Phishing),
            other => Err(PhishError::Schema(format!(
                "label must be -1 or 1, got {}",
                other
            ))),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Label::Legitimate => -1,
            Label::Phishing => 1,
        }
    }

    pub fn is_phishing(self) -> bool {
        self == Label::Phishing
    }

    /// Position of this label's probability in a table entry
    pub(crate) fn index(self) -> usize {
        match self {
            Label::Legitimate => 0,
            Label::Phishing => 1,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Legitimate => write!(f, "legitimate"),
            Label::Phishing => write!(f, "phishing"),
        }
    }
}

/// One labelled row of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Option<i64>,
    values: FeatureVector,
    label: Label,
}

impl Record {
    pub fn new(id: Option<i64>, values: FeatureVector, label: Label) -> Self {
        Self { id, values, label }
    }

    pub fn get(&self, feature: &str) -> Option<FeatureValue> {
        self.values.get(feature).copied()
    }

    /// Feature values without the label
    pub fn features(&self) -> &FeatureVector {
        &self.values
    }

    pub fn label(&self) -> Label {
        self.label
    }
}

/// Ordered, labelled rows sharing one set of candidate features
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset, checking that every record carries every feature
    pub fn new(features: Vec<String>, records: Vec<Record>) -> Result<Self> {
        for (i, record) in records.iter().enumerate() {
            if let Some(missing) = features.iter().find(|f| record.get(f).is_none()) {
                return Err(PhishError::Schema(format!(
                    "record {} has no value for '{}'",
                    i, missing
                )));
            }
        }
        Ok(Self { features, records })
    }

    /// Candidate feature names in column order
    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Number of rows per class, as (legitimate, phishing)
    pub fn class_counts(&self) -> (usize, usize) {
        let phishing = self
            .records
            .iter()
            .filter(|r| r.label().is_phishing())
            .count();
        (self.records.len() - phishing, phishing)
    }

    /// A dataset with the same features holding the given rows, in the given order
    pub(crate) fn subset(&self, indices: &[usize]) -> Self {
        Self {
            features: self.features.clone(),
            records: indices.iter().map(|&i| self.records[i].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(pairs: &[(&str, i64)]) -> FeatureVector {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_label_codes() {
        assert_eq!(Label::from_code(1).unwrap(), Label::Phishing);
        assert_eq!(Label::from_code(-1).unwrap(), Label::Legitimate);
        assert!(matches!(Label::from_code(0), Err(PhishError::Schema(_))));
        assert_eq!(Label::Phishing.code(), 1);
        assert_eq!(Label::Legitimate.to_string(), "legitimate");
    }

    #[test]
    fn test_value_key() {
        assert_eq!(value_key(-1), "-1");
        assert_eq!(value_key(0), "0");
        assert_eq!(value_key(1), "1");
    }

    #[test]
    fn test_dataset_rejects_incomplete_record() {
        let records = vec![Record::new(None, vector(&[("a", 1)]), Label::Phishing)];
        let result = Dataset::new(vec!["a".to_string(), "b".to_string()], records);
        assert!(matches!(result, Err(PhishError::Schema(_))));
    }

    #[test]
    fn test_class_counts() {
        let records = vec![
            Record::new(Some(1), vector(&[("a", 1)]), Label::Phishing),
            Record::new(Some(2), vector(&[("a", -1)]), Label::Legitimate),
            Record::new(Some(3), vector(&[("a", 0)]), Label::Phishing),
        ];
        let dataset = Dataset::new(vec!["a".to_string()], records).unwrap();
        assert_eq!(dataset.class_counts(), (1, 2));
        assert_eq!(dataset.len(), 3);
        assert!(dataset.has_feature("a"));
        assert!(!dataset.has_feature("Result"));
    }
}
