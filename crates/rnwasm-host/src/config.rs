use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HostError, HostResult};

/// Host settings, read from a TOML file. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Exported function called to run the guest.
    pub entry_point: String,

    /// Module name the `rn_*` functions are imported from.
    pub import_module: String,

    /// Multiplier applied to every guest sleep. `0.0` skips sleeping.
    pub time_scale: f64,

    /// Instruction budget for the guest; unlimited when absent.
    pub fuel: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            entry_point: "ros_main".to_string(),
            import_module: "env".to_string(),
            time_scale: 1.0,
            fuel: None,
        }
    }
}

impl HostConfig {
    pub fn load(path: &Path) -> HostResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> HostResult<Self> {
        let config: HostConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> HostResult<()> {
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(HostError::InvalidConfig(format!(
                "time_scale must be a finite, non-negative number (got {})",
                self.time_scale
            )));
        }
        if self.entry_point.is_empty() {
            return Err(HostError::InvalidConfig("entry_point must not be empty".to_string()));
        }
        if self.import_module.is_empty() {
            return Err(HostError::InvalidConfig("import_module must not be empty".to_string()));
        }
        Ok(())
    }
}
