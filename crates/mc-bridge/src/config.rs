//! `bridge.toml` loading.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::version::{FixedProbe, VersionIdentifier, VersionProbe};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid version_override {raw:?}")]
    InvalidOverride { raw: String },
}

#[derive(Debug, Default, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub bridge: BridgeSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct BridgeSection {
    /// Skip host detection and resolve this identifier instead.
    #[serde(default)]
    pub version_override: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl BridgeConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// The probe the bridge should use: a [`FixedProbe`] when
    /// `version_override` is set, otherwise `fallback`.
    pub fn probe(
        &self,
        fallback: Box<dyn VersionProbe>,
    ) -> Result<Box<dyn VersionProbe>, ConfigError> {
        match &self.bridge.version_override {
            Some(raw) => {
                let version = VersionIdentifier::new(raw.as_str())
                    .map_err(|_| ConfigError::InvalidOverride { raw: raw.clone() })?;
                Ok(Box::new(FixedProbe(version)))
            }
            None => Ok(fallback),
        }
    }
}
