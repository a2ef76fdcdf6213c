//! Error types for coordinate construction and layout decoding.
//!
//! Each variant names the offending input so that callers can log and skip a
//! single path without aborting a whole scan.

use crate::gav::GavField;
use thiserror::Error;

/// Errors arising from constructing a [`crate::Gav`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GavError {
    /// A mandatory coordinate field was empty.
    #[error("GAV field {field} must not be empty")]
    EmptyField {
        /// The field that was empty.
        field: GavField,
    },
}

/// Errors arising from decoding a default-layout path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The path has fewer segments than `<group>/<artifact>/<version>/<file>`.
    #[error("path {path} is not in Maven default layout: expected at least 4 segments, found {segments}")]
    TooShallow {
        /// The rejected path.
        path: String,
        /// Number of non-empty segments found.
        segments: usize,
    },

    /// The file name has no extension to use as packaging.
    #[error("path {path} has no file extension to use as packaging")]
    MissingPackaging {
        /// The rejected path.
        path: String,
    },

    /// The decoded fields do not form a valid coordinate.
    #[error("path {path} does not decode to a valid GAV: {source}")]
    Gav {
        /// The rejected path.
        path: String,
        /// The underlying validation failure.
        #[source]
        source: GavError,
    },
}

/// Result type alias using [`LayoutError`].
pub type Result<T> = std::result::Result<T, LayoutError>;
