//! Feature impact ranking
//!
//! Scores each candidate feature by how much more likely a site is phishing
//! when the feature is at or above a threshold than when it is below it.

use tracing::debug;

use super::types::{FeatureImpact, Ranking};
use crate::dataset::{Dataset, FeatureValue};

/// Likelihood ratio of a single feature.
///
/// Both group probabilities use add-one smoothing, so an empty group yields
/// 1/2 rather than a division by zero.
pub fn feature_impact(dataset: &Dataset, feature: &str, threshold: FeatureValue) -> FeatureImpact {
    let mut high = (0usize, 0usize); // (rows, phishing rows)
    let mut low = (0usize, 0usize);

    for record in dataset.records() {
        let group = match record.get(feature) {
            Some(value) if value >= threshold => &mut high,
            Some(_) => &mut low,
            None => continue,
        };
        group.0 += 1;
        if record.label().is_phishing() {
            group.1 += 1;
        }
    }

    let p_high = (high.1 as f64 + 1.0) / (high.0 as f64 + 2.0);
    let p_low = (low.1 as f64 + 1.0) / (low.0 as f64 + 2.0);

    FeatureImpact {
        feature: feature.to_string(),
        p_high,
        p_low,
        ratio: p_high / p_low,
    }
}

/// Rank every candidate feature, ascending by ratio.
///
/// Equal ratios keep the dataset's column order.
pub fn rank_all(dataset: &Dataset, threshold: FeatureValue) -> Ranking {
    let mut entries: Vec<FeatureImpact> = dataset
        .features()
        .iter()
        .map(|feature| feature_impact(dataset, feature, threshold))
        .collect();

    entries.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));

    for entry in &entries {
        debug!(
            "Feature {} ratio {:.4} (p_high {:.4}, p_low {:.4})",
            entry.feature, entry.ratio, entry.p_high, entry.p_low
        );
    }

    Ranking { entries }
}

/// The `k` highest-ratio features, still in ascending order
pub fn rank(dataset: &Dataset, threshold: FeatureValue, k: usize) -> Ranking {
    let mut ranking = rank_all(dataset, threshold);
    let skip = ranking.entries.len().saturating_sub(k);
    ranking.entries.drain(..skip);
    ranking
}
