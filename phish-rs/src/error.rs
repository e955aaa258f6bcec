use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Training data has no {0} rows")]
    EmptyClass(&'static str),

    #[error("Value {value} of feature '{feature}' was not seen during training")]
    UnseenValue { feature: String, value: String },

    #[error("Record has no value for feature '{0}'")]
    MissingFeature(String),

    #[error("Feature '{0}' is not part of the model")]
    UnknownFeature(String),

    #[error("Invalid model: {0}")]
    ModelFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PhishError>;
