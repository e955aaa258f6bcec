//! Phishing classifier module
//!
//! Feature ranking, naive Bayes training and prediction, model persistence
//! and held-out evaluation.

pub mod estimator;
pub mod evaluator;
pub mod persistence;
pub mod predictor;
pub mod ranker;
pub mod types;

pub use estimator::train;
pub use evaluator::{evaluate, evaluate_model, evaluate_with_policy};
pub use predictor::{classify, predict, score, score_site};
pub use ranker::{rank, rank_all};
pub use types::*;
