//! The existence/upload protocol.
//!
//! Each artifact is probed with `HEAD`. A `404` marks it absent and, when
//! upload mode is on, the local file is `PUT` to the same URL. Any status the
//! protocol does not expect aborts the whole run: artifacts after the failing
//! one are never contacted.

use camino::Utf8PathBuf;
use log::{debug, info};
use std::fs::File;
use std::io::{self, Write};
use thiserror::Error;

use crate::artifact::{Artifact, RemoteStatus};
use crate::transport::{Method, RepositoryTransport, TransportError, status};

/// Where artifacts are probed and uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEndpoint {
    /// URL scheme, usually `http`.
    pub scheme: String,
    /// Repository manager host.
    pub server: String,
    /// Repository manager port.
    pub port: u16,
    /// Path under which repositories are served.
    pub context_path: String,
    /// Repository name.
    pub repository: String,
}

impl RepositoryEndpoint {
    /// The repository URL without a trailing slash.
    ///
    /// # Examples
    ///
    /// ```
    /// use nexus_sync::sync::RepositoryEndpoint;
    ///
    /// let endpoint = RepositoryEndpoint {
    ///     scheme: "http".to_owned(),
    ///     server: "localhost".to_owned(),
    ///     port: 8081,
    ///     context_path: "/nexus/content/repositories".to_owned(),
    ///     repository: "releases".to_owned(),
    /// };
    /// assert_eq!(
    ///     endpoint.base_url(),
    ///     "http://localhost:8081/nexus/content/repositories/releases"
    /// );
    /// ```
    #[must_use]
    pub fn base_url(&self) -> String {
        let context = self.context_path.trim_matches('/');
        let mut url = format!("{}://{}:{}", self.scheme, self.server, self.port);
        for segment in [context, self.repository.trim_matches('/')] {
            if !segment.is_empty() {
                url.push('/');
                url.push_str(segment);
            }
        }
        url
    }

    /// The URL of `artifact`: the base URL followed by its relative filename.
    #[must_use]
    pub fn artifact_url(&self, artifact: &Artifact) -> String {
        format!(
            "{}/{}",
            self.base_url(),
            artifact.filename().as_str().trim_start_matches('/')
        )
    }
}

/// Settings for one synchronisation run.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Where to probe and upload.
    pub endpoint: RepositoryEndpoint,
    /// Upload artifacts the server does not have.
    pub upload: bool,
}

/// Errors that abort a synchronisation run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The server answered with a status the protocol does not accept.
    #[error("{method} {url} returned {actual}, expected {expected}")]
    UnexpectedStatus {
        /// The request method.
        method: Method,
        /// The URL that was requested.
        url: String,
        /// The acceptable statuses.
        expected: &'static str,
        /// The status the server returned.
        actual: u16,
    },

    /// The request could not be completed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The local file could not be opened for upload.
    #[error("failed to open {path} for upload: {source}")]
    OpenArtifact {
        /// Path to the local file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The summary line could not be written.
    #[error("failed to write sync output: {source}")]
    WriteFailed {
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Counts of outcomes across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Artifacts the server already had.
    pub present: usize,
    /// Artifacts missing on the server and left alone.
    pub absent: usize,
    /// Artifacts uploaded during the run.
    pub uploaded: usize,
}

impl SyncSummary {
    fn record(&mut self, status: RemoteStatus) {
        match status {
            RemoteStatus::Present => self.present += 1,
            RemoteStatus::Absent => self.absent += 1,
            RemoteStatus::Uploaded => self.uploaded += 1,
        }
    }

    /// Total number of artifacts processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.present + self.absent + self.uploaded
    }
}

/// Artifacts with their recorded outcomes, plus the totals.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// The processed artifacts in scan order.
    pub artifacts: Vec<Artifact>,
    /// Outcome counts.
    pub summary: SyncSummary,
}

/// Synchronise `artifacts` with the repository, one at a time.
///
/// After each artifact is processed its summary line is written to `out`.
///
/// # Errors
///
/// Returns the first [`SyncError`] encountered; nothing after it is
/// processed.
pub fn synchronise(
    artifacts: Vec<Artifact>,
    transport: &dyn RepositoryTransport,
    settings: &SyncSettings,
    out: &mut dyn Write,
) -> Result<SyncReport, SyncError> {
    let mut summary = SyncSummary::default();
    let mut processed = Vec::with_capacity(artifacts.len());

    for mut artifact in artifacts {
        let url = settings.endpoint.artifact_url(&artifact);
        let status = sync_one(&artifact, &url, transport, settings.upload)?;
        artifact.record_status(status);
        summary.record(status);
        writeln!(out, "{artifact}").map_err(|source| SyncError::WriteFailed { source })?;
        processed.push(artifact);
    }

    info!(
        "{} artifacts: {} present, {} absent, {} uploaded",
        summary.total(),
        summary.present,
        summary.absent,
        summary.uploaded
    );
    Ok(SyncReport {
        artifacts: processed,
        summary,
    })
}

fn sync_one(
    artifact: &Artifact,
    url: &str,
    transport: &dyn RepositoryTransport,
    upload: bool,
) -> Result<RemoteStatus, SyncError> {
    match transport.head(url)? {
        status::OK => Ok(RemoteStatus::Present),
        status::NOT_FOUND if upload => upload_artifact(artifact, url, transport),
        status::NOT_FOUND => Ok(RemoteStatus::Absent),
        actual => Err(SyncError::UnexpectedStatus {
            method: Method::Head,
            url: url.to_owned(),
            expected: "200 or 404",
            actual,
        }),
    }
}

fn upload_artifact(
    artifact: &Artifact,
    url: &str,
    transport: &dyn RepositoryTransport,
) -> Result<RemoteStatus, SyncError> {
    let path = artifact.local_path();
    let mut file = File::open(&path).map_err(|source| SyncError::OpenArtifact {
        path: path.clone(),
        source,
    })?;
    debug!("uploading {path} to {url}");
    match transport.put(url, &mut file)? {
        status::CREATED => Ok(RemoteStatus::Uploaded),
        actual => Err(SyncError::UnexpectedStatus {
            method: Method::Put,
            url: url.to_owned(),
            expected: "201",
            actual,
        }),
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
