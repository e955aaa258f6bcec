use crate::error::{PhishError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub ranking: RankingConfig,
    pub split: SplitConfig,
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: String,
    pub delimiter: String,
    /// Row identifier column, excluded from the candidate features
    pub id_column: Option<String>,
    pub label_column: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RankingConfig {
    pub threshold: i64,
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SplitConfig {
    pub test_fraction: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "pretty" or "json"
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "phishing.csv".to_string(),
            delimiter: ",".to_string(),
            id_column: Some("index".to_string()),
            label_column: "Result".to_string(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            threshold: 0,
            top_k: 5,
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "model.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl DatasetConfig {
    /// The delimiter as a single character
    pub fn delimiter_char(&self) -> Result<char> {
        let mut chars = self.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(PhishError::Config(format!(
                "delimiter must be a single character, got '{}'",
                self.delimiter
            ))),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PhishError::Config(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| PhishError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Layer an optional TOML file and `PHISH_` environment variables over the defaults.
    ///
    /// Nested keys use a double underscore, e.g. `PHISH_RANKING__TOP_K=7`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            let name = path.to_string_lossy();
            builder = builder
                .add_source(config::File::new(&name, config::FileFormat::Toml).required(true));
        }

        let config: Config = builder
            .add_source(
                config::Environment::with_prefix("PHISH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| PhishError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.dataset.delimiter_char()?;

        if !(self.split.test_fraction > 0.0 && self.split.test_fraction < 1.0) {
            return Err(PhishError::Config(format!(
                "split.test_fraction must be in (0, 1), got {}",
                self.split.test_fraction
            )));
        }

        if self.ranking.top_k == 0 {
            return Err(PhishError::Config("ranking.top_k must be at least 1".to_string()));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(PhishError::Config(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                other
            ))),
        }
    }
}
