// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::logger::LogLevel;
use crate::path::BracketRewrite;

use serde::{Deserialize, Serialize};

/// Error type for loading retriever options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// Severity name not recognized
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    YamlParseError(String),
    /// Options file could not be read
    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String },
}

impl From<serde_json::Error> for OptionsError {
    fn from(error: serde_json::Error) -> Self {
        OptionsError::JsonParseError(format!("{error}"))
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for OptionsError {
    fn from(error: serde_yaml::Error) -> Self {
        OptionsError::YamlParseError(format!("{error}"))
    }
}

/// Behaviour knobs for a [`crate::Retriever`].
///
/// ```json
/// { "brackets": "first_only", "level": "info" }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrieverOptions {
    /// How `[N]` groups in string paths are normalized.
    pub brackets: BracketRewrite,

    /// Severity used for diagnostic output.
    pub level: LogLevel,
}

impl RetrieverOptions {
    pub fn from_json_str(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, OptionsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_file(path: &str) -> Result<Self, OptionsError> {
        match std::fs::read_to_string(path) {
            Ok(c) => Self::from_json_str(&c),
            Err(e) => Err(OptionsError::Io {
                path: path.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
