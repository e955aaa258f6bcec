//! Dataset module
//!
//! Typed records, the delimited-text loader and the seeded train/test split.

pub mod loader;
pub mod record;
pub mod split;

pub use loader::{load_dataset, parse_dataset};
pub use record::{value_key, Dataset, FeatureValue, FeatureVector, Label, Record};
pub use split::train_test_split;
