// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VqError {
    /// A parameter was out of range. Raised before any work is done.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Codebook encoding/decoding or snapshot header failure.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<bincode::error::EncodeError> for VqError {
    fn from(e: bincode::error::EncodeError) -> Self {
        VqError::Snapshot(e.to_string())
    }
}

impl From<bincode::error::DecodeError> for VqError {
    fn from(e: bincode::error::DecodeError) -> Self {
        VqError::Snapshot(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VqError>;

/// Fails with `DimensionMismatch` unless `found == expected`.
pub(crate) fn ensure_dim(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(VqError::DimensionMismatch { expected, found });
    }
    Ok(())
}
