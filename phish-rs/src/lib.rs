//! phish-rs: naive Bayes phishing website classifier
//!
//! Classifies websites as phishing or legitimate from discrete (-1/0/1)
//! feature codes.
//!
//! # Pipeline
//!
//! - **Ranking**: score every feature by the likelihood ratio of phishing
//!   above and below a threshold, keep the top K
//! - **Training**: Laplace-smoothed `P(value | label)` tables plus the
//!   phishing prior
//! - **Prediction**: log-domain naive Bayes decision, ties are legitimate
//! - **Evaluation**: accuracy, precision and recall on a held-out split
//!
//! # Example
//!
//! ```no_run
//! use phish_rs::classifier::{classify, persistence, rank, train};
//! use phish_rs::config::Config;
//! use phish_rs::dataset::{load_dataset, train_test_split, FeatureVector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let dataset = load_dataset(&config.dataset.path, &config.dataset)?;
//!     let (train_data, _test_data) = train_test_split(&dataset, 0.2, 42)?;
//!
//!     let features = rank(&train_data, 0, 5).selected_features();
//!     let model = train(&features, &train_data)?;
//!     persistence::save(&model, "model.json")?;
//!
//!     let site: FeatureVector = features.iter().map(|f| (f.clone(), 1)).collect();
//!     println!("phishing: {}", classify(&model, &site)?);
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`classifier`]: ranking, training, prediction, persistence, evaluation
//! - [`config`]: Configuration management
//! - [`dataset`]: Records, loader and train/test split
//! - [`error`]: Error types and handling

pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;

// Re-export commonly used types
pub use classifier::Model;
pub use config::Config;
pub use error::{PhishError, Result};
