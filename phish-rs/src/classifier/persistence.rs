//! Model persistence
//!
//! The artifact is a JSON object keyed by feature name, each mapping a
//! canonical value string to `[P(v | legitimate), P(v | phishing)]`, plus
//! the reserved `p_y` key for the prior:
//!
//! ```json
//! {
//!   "p_y": 0.5566,
//!   "SSLfinal_State": { "-1": [0.12, 0.61], "0": [0.05, 0.19], "1": [0.83, 0.2] }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use super::types::{Model, ProbabilityTable};
use crate::error::{PhishError, Result};

/// Wire form of a [`Model`]
#[derive(Serialize, Deserialize)]
pub(crate) struct ModelRepr {
    p_y: f64,
    #[serde(flatten)]
    table: ProbabilityTable,
}

impl TryFrom<ModelRepr> for Model {
    type Error = PhishError;

    fn try_from(repr: ModelRepr) -> Result<Self> {
        Model::new(repr.table, repr.p_y)
    }
}

impl From<Model> for ModelRepr {
    fn from(model: Model) -> Self {
        Self {
            p_y: model.prior(),
            table: model.table().clone(),
        }
    }
}

/// Encode a model as pretty-printed JSON
pub fn to_bytes(model: &Model) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(model)?)
}

/// Decode and validate a model
pub fn from_bytes(bytes: &[u8]) -> Result<Model> {
    serde_json::from_slice(bytes).map_err(|e| PhishError::ModelFormat(e.to_string()))
}

/// Write a model file
pub fn save<P: AsRef<Path>>(model: &Model, path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_bytes(model)?)?;
    info!("Saved model with {} features to {}", model.table().len(), path.display());
    Ok(())
}

/// Read a model file
pub fn load<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    let model = from_bytes(&std::fs::read(path)?)?;
    info!("Loaded model with {} features from {}", model.table().len(), path.display());
    Ok(model)
}
