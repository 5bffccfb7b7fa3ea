use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Represents a model identifier on the local server.
///
/// This can be one of the models the front-end offers by default or a custom
/// string for any other model that has been pulled locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Model {
    /// Known model versions.
    Known(KnownModel),

    /// Custom model identifier.
    Custom(String),
}

/// Known local model versions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownModel {
    /// DeepSeek-R1 1.5B, a small reasoning model that emits `<think>` blocks.
    #[serde(rename = "deepseek-r1:1.5b")]
    DeepseekR1_1_5B,

    /// Qwen 2.5 Coder 3B.
    #[serde(rename = "qwen2.5-coder:3b")]
    Qwen25Coder3B,

    /// DeepSeek Coder 1.3B.
    #[serde(rename = "deepseek-coder:1.3b")]
    DeepseekCoder1_3B,
}

impl Model {
    /// Returns the default model, a small reasoning model.
    pub fn default_model() -> Self {
        Model::Known(KnownModel::DeepseekR1_1_5B)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{known_model}"),
            Model::Custom(custom) => write!(f, "{custom}"),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnownModel::DeepseekR1_1_5B => write!(f, "deepseek-r1:1.5b"),
            KnownModel::Qwen25Coder3B => write!(f, "qwen2.5-coder:3b"),
            KnownModel::DeepseekCoder1_3B => write!(f, "deepseek-coder:1.3b"),
        }
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let model = match s {
            "deepseek-r1:1.5b" => Model::Known(KnownModel::DeepseekR1_1_5B),
            "qwen2.5-coder:3b" => Model::Known(KnownModel::Qwen25Coder3B),
            "deepseek-coder:1.3b" => Model::Known(KnownModel::DeepseekCoder1_3B),
            other => Model::Custom(other.to_string()),
        };
        Ok(model)
    }
}
