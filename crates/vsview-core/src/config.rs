use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CHAIN_FILE, DEFAULT_PLUGIN_FILE, MIN_ZOOM, WHEEL_STEP_DIVISOR};
use crate::error::{Result, ViewerError};

/// Viewer settings. Every field has a default, so a partial TOML file is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Filter chain appended to the generated script header.
    pub chain_path: PathBuf,
    /// Decoder plugin loaded by the script header.
    pub plugin_path: PathBuf,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            chain_path: PathBuf::from(DEFAULT_CHAIN_FILE),
            plugin_path: PathBuf::from(DEFAULT_PLUGIN_FILE),
            engine: EngineConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Load a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ViewerError::Config(e.to_string()))?;
        config.view.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ViewerError::Config(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `vspipe` executable, looked up on `PATH` when relative.
    pub vspipe_path: PathBuf,
    /// Output node index the script registers with `set_output()`.
    pub output_index: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vspipe_path: PathBuf::from("vspipe"),
            output_index: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub min_zoom: f32,
    /// Wheel delta is divided by this before being added to the zoom.
    pub wheel_step_divisor: f32,
    /// Linear texture filtering when scaling; nearest otherwise.
    pub linear_filtering: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            wheel_step_divisor: WHEEL_STEP_DIVISOR,
            linear_filtering: true,
        }
    }
}

impl ViewConfig {
    fn validate(&self) -> Result<()> {
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(ViewerError::Config(format!(
                "min_zoom must be positive, got {}",
                self.min_zoom
            )));
        }
        if !(self.wheel_step_divisor.is_finite() && self.wheel_step_divisor > 0.0) {
            return Err(ViewerError::Config(format!(
                "wheel_step_divisor must be positive, got {}",
                self.wheel_step_divisor
            )));
        }
        Ok(())
    }
}
