use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

use crate::config::AssistConfig;

#[derive(Debug, Error)]
pub enum GradingConfigError {
    #[error("Failed to read grading config at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid grading config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FeedbackOptions {
    /// Append the fixed learning insights to every outcome.
    #[serde(default = "default_include_learning_insights")]
    pub include_learning_insights: bool,
}

impl Default for FeedbackOptions {
    fn default() -> Self {
        Self {
            include_learning_insights: default_include_learning_insights(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct GradingConfig {
    #[serde(default)]
    pub assist: AssistConfig,

    #[serde(default)]
    pub feedback: FeedbackOptions,
}

impl GradingConfig {
    pub fn default_config() -> Self {
        GradingConfig {
            assist: AssistConfig::default(),
            feedback: FeedbackOptions::default(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, GradingConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, GradingConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| GradingConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Writes the configuration as pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), GradingConfigError> {
        let io_err = |source| GradingConfigError::Read {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_err)
    }
}

//Default Functions

fn default_include_learning_insights() -> bool {
    true
}
