//! Crate-level error type.

use crate::audio::AudioError;
use crate::cli::UsageError;
use thiserror::Error;

/// Any failure that ends a volctrl invocation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
