//! Built-in version adapters.

pub mod v1_18_r1;

pub use v1_18_r1::V1_18R1;

use crate::registry::RegistryBuilder;

/// Adds every adapter compiled into this build.
pub(crate) fn register_builtin(builder: RegistryBuilder) -> RegistryBuilder {
    builder.register(v1_18_r1::VERSIONS, V1_18R1)
}
