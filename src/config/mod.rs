//! Configuration loading and management

use crate::core::error::{ConfigError, DealsResult};
use serde::{Deserialize, Serialize};

/// Connection settings for the MongoDB backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    /// Connection string (e.g., "mongodb://localhost:27017")
    pub uri: String,

    /// Database holding the deals collection
    pub database: String,

    /// Collection of deal records
    pub collection: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "deals".to_string(),
            collection: "deals".to_string(),
        }
    }
}

/// Complete configuration for the deals query service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealsConfig {
    pub mongodb: MongoConfig,

    /// Fields covered by the text index used for free-text search
    pub text_fields: Vec<String>,
}

impl Default for DealsConfig {
    fn default() -> Self {
        Self {
            mongodb: MongoConfig::default(),
            text_fields: vec!["name".to_string()],
        }
    }
}

impl DealsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> DealsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> DealsResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
