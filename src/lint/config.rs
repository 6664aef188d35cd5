//! Lint configuration

use serde::{Deserialize, Serialize};

/// Lint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LintConfig {
    /// Body checks configuration
    pub body: BodyConfig,
    /// Receive parameter checks configuration
    pub receive: ReceiveConfig,
    /// Target checks configuration
    pub target: TargetConfig,
}

/// Body checking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BodyConfig {
    pub enabled: bool,
    /// Report `SEND` blocks that carry no usable body
    pub require_body: bool,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            require_body: true,
        }
    }
}

/// Receive parameter limits, inclusive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReceiveConfig {
    pub enabled: bool,
    pub min_max_messages: u32,
    pub max_max_messages: u32,
    pub max_visibility_timeout: u32,
    pub max_wait_time: u32,
}

impl Default for ReceiveConfig {
    fn default() -> Self {
        // Service limits for a single ReceiveMessage call
        Self {
            enabled: true,
            min_max_messages: 1,
            max_max_messages: 10,
            max_visibility_timeout: 43_200,
            max_wait_time: 20,
        }
    }
}

/// Target checking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetConfig {
    pub enabled: bool,
    /// Accepted URL schemes, without `://`
    pub schemes: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            schemes: vec!["https".to_string(), "http".to_string()],
        }
    }
}
