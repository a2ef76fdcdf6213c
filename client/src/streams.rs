//! Input and output redirection for `nexus-deliver`.
//!
//! `--in` and `--out` name files; when absent the tool reads stdin and
//! writes stdout. Streams are closed when the returned boxes are dropped.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use thiserror::Error;

/// Errors opening the delivery streams.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The input file could not be opened.
    #[error("failed to open input {path}: {source}")]
    OpenInput {
        /// Path of the input file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The output file could not be created.
    #[error("failed to create output {path}: {source}")]
    CreateOutput {
        /// Path of the output file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Open `path` for reading, or stdin when `None`.
///
/// # Errors
///
/// Returns [`StreamError::OpenInput`] if the file cannot be opened.
pub fn open_input(path: Option<&Utf8Path>) -> Result<Box<dyn Read>, StreamError> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|source| StreamError::OpenInput {
                path: path.to_owned(),
                source,
            })?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Create `path` for writing, or use stdout when `None`.
///
/// An existing file is truncated.
///
/// # Errors
///
/// Returns [`StreamError::CreateOutput`] if the file cannot be created.
pub fn open_output(path: Option<&Utf8Path>) -> Result<Box<dyn Write>, StreamError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| StreamError::CreateOutput {
                path: path.to_owned(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
