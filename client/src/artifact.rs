//! Artifacts discovered in a local repository tree.

use camino::{Utf8Path, Utf8PathBuf};
use nexus_sync_common::Gav;
use std::fmt;

use crate::transport::status;

/// Outcome of synchronising one artifact with the repository manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    /// The server already has the artifact.
    Present,
    /// The server does not have the artifact and nothing was uploaded.
    Absent,
    /// The artifact was uploaded during this run.
    Uploaded,
}

impl RemoteStatus {
    /// The HTTP status code that produced this outcome.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Present => status::OK,
            Self::Absent => status::NOT_FOUND,
            Self::Uploaded => status::CREATED,
        }
    }
}

/// A local file paired with the coordinate decoded from its path.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use nexus_sync::artifact::{Artifact, RemoteStatus};
/// use nexus_sync_common::Gav;
///
/// let gav = Gav::new("com/acme", "widget", "1.0.0", "jar").expect("valid GAV");
/// let mut artifact = Artifact::new(
///     Utf8PathBuf::from("/srv/m2"),
///     Utf8PathBuf::from("com/acme/widget/1.0.0/widget-1.0.0.jar"),
///     gav,
/// );
/// artifact.record_status(RemoteStatus::Absent);
/// assert!(artifact.to_string().starts_with("404 "));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    root: Utf8PathBuf,
    filename: Utf8PathBuf,
    gav: Gav,
    status: Option<RemoteStatus>,
}

impl Artifact {
    /// Create an artifact that has not been synchronised yet.
    ///
    /// `filename` is relative to `root` and uses `/` separators.
    #[must_use]
    pub fn new(root: Utf8PathBuf, filename: Utf8PathBuf, gav: Gav) -> Self {
        Self {
            root,
            filename,
            gav,
            status: None,
        }
    }

    /// The directory the scanner walked.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path relative to the root.
    #[must_use]
    pub fn filename(&self) -> &Utf8Path {
        &self.filename
    }

    /// The decoded coordinate.
    #[must_use]
    pub fn gav(&self) -> &Gav {
        &self.gav
    }

    /// The recorded outcome, once synchronised.
    #[must_use]
    pub fn status(&self) -> Option<RemoteStatus> {
        self.status
    }

    /// Full path of the file on disk.
    #[must_use]
    pub fn local_path(&self) -> Utf8PathBuf {
        self.root.join(&self.filename)
    }

    /// Record the synchronisation outcome.
    pub fn record_status(&mut self, status: RemoteStatus) {
        self.status = Some(status);
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ", status.code())?,
            None => f.write_str("--- ")?,
        }
        write!(f, "{} {}", self.gav, self.filename)
    }
}
