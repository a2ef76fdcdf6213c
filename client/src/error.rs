//! Top-level error type for the sync and delivery tools.
//!
//! Each protocol has its own error enum; [`NexusError`] gathers them so the
//! binaries can report any failure and pick the matching exit code.

use std::io;
use thiserror::Error;

use crate::config::ConfigError;
use crate::delivery::DeliveryError;
use crate::exit;
use crate::streams::StreamError;
use crate::sync::SyncError;

/// Errors that end a run of either tool.
#[derive(Debug, Error)]
pub enum NexusError {
    /// Configuration could not be loaded or resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input or output file could not be opened.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// The sync protocol failed.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// The delivery protocol failed.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// Program output could not be written.
    #[error("failed to write output: {0}")]
    WriteFailed(#[from] io::Error),
}

impl NexusError {
    /// The process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Delivery(DeliveryError::UploadRejected { .. }) => exit::UPLOAD_REJECTED,
            _ => exit::FAILURE,
        }
    }
}

/// Result type for tool runs.
pub type Result<T> = std::result::Result<T, NexusError>;
