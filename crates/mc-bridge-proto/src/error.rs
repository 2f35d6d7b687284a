//! Protocol-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("invalid version identifier: {0:?}")]
    InvalidVersion(String),
}
