//! Local tree scanner for discovering artifacts.
//!
//! Walks directories laid out in Maven's default repository convention and
//! decodes every `.jar` and `.pom` it finds into an [`Artifact`]. Hidden
//! entries below a root are pruned, and entries that cannot be read or
//! decoded are logged and skipped so that one bad file never stops a scan.

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use nexus_sync_common::{LayoutError, decode};
use std::path::Path;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::artifact::Artifact;

/// File extensions the scanner selects.
const CANDIDATE_EXTENSIONS: [&str; 2] = ["jar", "pom"];

/// Why a file below a root was not turned into an artifact.
#[derive(Debug, Error)]
enum SkipReason {
    #[error("path is not valid UTF-8")]
    NonUtf8,

    #[error("path is not below the scanned root")]
    OutsideRoot,

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Return true when `path` names a file the scanner should decode.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use nexus_sync::scanner::is_candidate;
///
/// assert!(is_candidate(Utf8Path::new("widget-1.0.0.jar")));
/// assert!(is_candidate(Utf8Path::new("widget-1.0.0.pom")));
/// assert!(!is_candidate(Utf8Path::new("widget-1.0.0.jar.sha1")));
/// ```
#[must_use]
pub fn is_candidate(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|extension| CANDIDATE_EXTENSIONS.contains(&extension))
}

/// Scan each root in turn and concatenate the artifacts found.
#[must_use]
pub fn scan_roots(roots: &[Utf8PathBuf]) -> Vec<Artifact> {
    roots.iter().flat_map(|root| scan_root(root)).collect()
}

/// Scan one root recursively.
///
/// The root itself is always walked, even when its own name starts with a
/// dot (as in `~/.m2/repository` or `.`). Walk errors are logged at `warn`
/// and the walk continues.
#[must_use]
pub fn scan_root(root: &Utf8Path) -> Vec<Artifact> {
    let mut artifacts = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry below {root}: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match artifact_for(root, entry.path()) {
            Ok(Some(artifact)) => artifacts.push(artifact),
            Ok(None) => {}
            Err(reason) => warn!("skipping {}: {reason}", entry.path().display()),
        }
    }
    artifacts
}

fn is_hidden(entry: &DirEntry) -> bool {
    let hidden = entry.file_name().to_string_lossy().starts_with('.');
    if hidden {
        debug!("pruning hidden entry {}", entry.path().display());
    }
    hidden
}

fn artifact_for(root: &Utf8Path, path: &Path) -> Result<Option<Artifact>, SkipReason> {
    let path = Utf8Path::from_path(path).ok_or(SkipReason::NonUtf8)?;
    if !is_candidate(path) {
        return Ok(None);
    }
    let relative = path
        .strip_prefix(root)
        .map_err(|_| SkipReason::OutsideRoot)?;
    let filename = Utf8PathBuf::from(relative.as_str().replace('\\', "/"));
    let gav = decode(&filename)?;
    debug!("{path} -> {gav}");
    Ok(Some(Artifact::new(root.to_owned(), filename, gav)))
}
