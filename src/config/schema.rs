//! Configuration schema for camp
//!
//! Global configuration is stored at `~/.config/camp/config.toml`; a
//! workspace may override it with `.camp.toml` in its root.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// External tool locations
    pub tools: ToolsConfig,

    /// Wheel building settings
    pub wheel: WheelConfig,

    /// Requirement installation settings
    pub install: InstallConfig,
}

/// General application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Stop at the first failed step instead of continuing
    pub fail_fast: bool,
}

/// External tools used to build environments and wheels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Environment-isolation tool
    pub virtualenv: String,

    /// Host pip used to build wheels
    pub pip: String,

    /// Interpreter passed to `virtualenv --python`
    pub python: Option<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            virtualenv: "virtualenv".to_string(),
            pip: "pip".to_string(),
            python: None,
        }
    }
}

/// `pip wheel` settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Pass `--no-cache-dir` so every wheel is built fresh
    pub no_cache_dir: bool,

    /// Additional arguments appended to every `pip wheel`
    pub extra_args: Vec<String>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            no_cache_dir: true,
            extra_args: vec![],
        }
    }
}

/// `pip install` settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Additional arguments appended to every `pip install`
    pub extra_args: Vec<String>,
}
