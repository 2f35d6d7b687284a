//! Detecting which host revision is running.

use std::env;

pub use mc_bridge_proto::VersionIdentifier;

use crate::error::BridgeError;

/// Environment variable read by [`EnvProbe::new`].
pub const VERSION_ENV: &str = "MC_BRIDGE_VERSION";

/// Reads the running host's revision. The facade calls this at most once.
pub trait VersionProbe: Send + Sync {
    fn detect(&self) -> Result<VersionIdentifier, BridgeError>;
}

impl<P: VersionProbe + ?Sized> VersionProbe for Box<P> {
    fn detect(&self) -> Result<VersionIdentifier, BridgeError> {
        (**self).detect()
    }
}

/// Extracts the native revision from the host's implementation package name,
/// e.g. `org.bukkit.craftbukkit.v1_18_R1` -> `v1_18_R1`.
pub struct HostProbe {
    signal: Box<dyn Fn() -> Option<String> + Send + Sync>,
}

impl HostProbe {
    pub fn new(signal: impl Fn() -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            signal: Box::new(signal),
        }
    }

    /// The `vMAJOR_MINOR_RREV` segment of a dotted package name.
    pub fn revision_of(package: &str) -> Option<&str> {
        package.split('.').find(|segment| is_revision(segment))
    }
}

fn is_revision(segment: &str) -> bool {
    let Some(rest) = segment.strip_prefix('v') else {
        return false;
    };
    let parts: Vec<&str> = rest.split('_').collect();
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match parts[..] {
        [major, minor, rev] => {
            digits(major) && digits(minor) && rev.strip_prefix('R').is_some_and(digits)
        }
        _ => false,
    }
}

impl VersionProbe for HostProbe {
    fn detect(&self) -> Result<VersionIdentifier, BridgeError> {
        let package = (self.signal)().ok_or_else(|| {
            BridgeError::EnvironmentUnreadable("host reported no implementation package".into())
        })?;
        let revision = Self::revision_of(&package).ok_or_else(|| {
            BridgeError::EnvironmentUnreadable(format!(
                "no native revision in package {package:?}"
            ))
        })?;
        VersionIdentifier::new(revision)
            .map_err(|e| BridgeError::EnvironmentUnreadable(e.to_string()))
    }
}

/// Always reports the same identifier. Backs the config override.
#[derive(Debug, Clone)]
pub struct FixedProbe(pub VersionIdentifier);

impl VersionProbe for FixedProbe {
    fn detect(&self) -> Result<VersionIdentifier, BridgeError> {
        Ok(self.0.clone())
    }
}

/// Reads the revision from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvProbe {
    var: String,
}

impl EnvProbe {
    pub fn new() -> Self {
        Self::with_var(VERSION_ENV)
    }

    pub fn with_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionProbe for EnvProbe {
    fn detect(&self) -> Result<VersionIdentifier, BridgeError> {
        let raw = env::var(&self.var)
            .map_err(|e| BridgeError::EnvironmentUnreadable(format!("{}: {e}", self.var)))?;
        VersionIdentifier::new(raw)
            .map_err(|e| BridgeError::EnvironmentUnreadable(format!("{}: {e}", self.var)))
    }
}
