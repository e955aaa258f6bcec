//! Seeded train/test partitioning

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use super::record::Dataset;
use crate::error::{PhishError, Result};

/// Split a dataset into disjoint (train, test) partitions.
///
/// The test partition holds `ceil(len * test_fraction)` rows picked by a
/// shuffle seeded from `seed`, so the same seed always yields the same split.
pub fn train_test_split(
    dataset: &Dataset,
    test_fraction: f64,
    seed: u64,
) -> Result<(Dataset, Dataset)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(PhishError::Config(format!(
            "test fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    let mut indices: Vec<usize> = (0..dataset.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((dataset.len() as f64) * test_fraction).ceil() as usize;
    let (test_idx, train_idx) = indices.split_at(test_len.min(indices.len()));

    let train = dataset.subset(train_idx);
    let test = dataset.subset(test_idx);
    info!(
        "Split {} rows into {} train / {} test (seed {})",
        dataset.len(),
        train.len(),
        test.len(),
        seed
    );

    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::{FeatureVector, Label, Record};
    use std::collections::HashSet;

    fn dataset(n: usize) -> Dataset {
        let records = (0..n)
            .map(|i| {
                let mut values = FeatureVector::new();
                values.insert("a".to_string(), (i % 3) as i64 - 1);
                let label = if i % 2 == 0 { Label::Phishing } else { Label::Legitimate };
                Record::new(Some(i as i64), values, label)
            })
            .collect();
        Dataset::new(vec!["a".to_string()], records).unwrap()
    }

    fn ids(dataset: &Dataset) -> Vec<i64> {
        dataset.records().iter().filter_map(|r| r.id).collect()
    }

    #[test]
    fn test_sizes_and_disjoint() {
        let data = dataset(101);
        let (train, test) = train_test_split(&data, 0.2, 7).unwrap();

        assert_eq!(test.len(), 21);
        assert_eq!(train.len(), 80);

        let train_ids: HashSet<i64> = ids(&train).into_iter().collect();
        let test_ids: HashSet<i64> = ids(&test).into_iter().collect();
        assert!(train_ids.is_disjoint(&test_ids));
        assert_eq!(train_ids.len() + test_ids.len(), 101);
        assert_eq!(train.features(), data.features());
    }

    #[test]
    fn test_same_seed_same_split() {
        let data = dataset(50);
        let (train_a, test_a) = train_test_split(&data, 0.3, 42).unwrap();
        let (train_b, test_b) = train_test_split(&data, 0.3, 42).unwrap();

        assert_eq!(ids(&train_a), ids(&train_b));
        assert_eq!(ids(&test_a), ids(&test_b));
    }

    #[test]
    fn test_invalid_fraction() {
        let data = dataset(10);
        assert!(train_test_split(&data, 0.0, 1).is_err());
        assert!(train_test_split(&data, 1.5, 1).is_err());
    }

    #[test]
    fn test_empty_dataset() {
        let data = dataset(0);
        let (train, test) = train_test_split(&data, 0.25, 1).unwrap();
        assert!(train.is_empty());
        assert!(test.is_empty());
    }
}
