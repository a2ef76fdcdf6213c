//! Decoding of Maven default-layout paths into [`Gav`] coordinates.
//!
//! The layout is
//! `<group-path>/<artifact>/<version>/<artifact>-<version>[-<classifier>].<packaging>`.
//! [`decode`] keeps the group directories exactly as found (joined with `/`),
//! while [`decode_dotted`] joins them with `.` so that it inverts
//! [`Gav::default_layout`].

use crate::error::{LayoutError, Result};
use crate::gav::Gav;
use camino::Utf8Path;

/// Decode a path relative to a repository root into a coordinate.
///
/// The group is the raw directory path below the root, so
/// `com/acme/widget/1.0.0/widget-1.0.0.jar` yields the group `com/acme`.
/// Both `/` and `\` are accepted as separators.
///
/// # Errors
///
/// Returns [`LayoutError`] when the path has fewer than four segments, the
/// file name has no extension, or a decoded field is empty.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use nexus_sync_common::decode;
///
/// let gav = decode(Utf8Path::new("com/acme/widget/1.0.0/widget-1.0.0-sources.jar"))
///     .expect("default layout path");
/// assert_eq!(gav.group_id(), "com/acme");
/// assert_eq!(gav.classifier(), Some("sources"));
/// ```
pub fn decode(path: &Utf8Path) -> Result<Gav> {
    decode_with_group_separator(path, "/")
}

/// Decode a path like [`decode`], but join group directories with `.`.
///
/// # Errors
///
/// Returns the same errors as [`decode`].
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use nexus_sync_common::{Gav, decode_dotted};
///
/// let gav = Gav::new("com.acme", "widget", "1.0.0", "jar").expect("valid GAV");
/// let decoded = decode_dotted(Utf8Path::new(&gav.default_layout())).expect("decodes");
/// assert_eq!(decoded, gav);
/// ```
pub fn decode_dotted(path: &Utf8Path) -> Result<Gav> {
    decode_with_group_separator(path, ".")
}

fn decode_with_group_separator(path: &Utf8Path, group_separator: &str) -> Result<Gav> {
    let segments: Vec<&str> = path
        .as_str()
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect();

    let [group @ .., artifact, version, file_name] = segments.as_slice() else {
        return Err(too_shallow(path, segments.len()));
    };
    if group.is_empty() {
        return Err(too_shallow(path, segments.len()));
    }

    let Some((base_name, packaging)) = file_name.rsplit_once('.') else {
        return Err(LayoutError::MissingPackaging {
            path: path.to_string(),
        });
    };

    let gav = Gav::new(group.join(group_separator), *artifact, *version, packaging).map_err(
        |source| LayoutError::Gav {
            path: path.to_string(),
            source,
        },
    )?;

    Ok(match classifier_of(base_name, artifact, version) {
        Some(classifier) => gav.with_classifier(classifier),
        None => gav,
    })
}

fn too_shallow(path: &Utf8Path, segments: usize) -> LayoutError {
    LayoutError::TooShallow {
        path: path.to_string(),
        segments,
    }
}

/// Extract the classifier from a file name stripped of its packaging.
///
/// The name must start with `<artifact>-<version>-`; anything after that
/// prefix is the classifier. Names that do not match yield `None`.
fn classifier_of<'a>(base_name: &'a str, artifact: &str, version: &str) -> Option<&'a str> {
    base_name
        .strip_prefix(artifact)?
        .strip_prefix('-')?
        .strip_prefix(version)?
        .strip_prefix('-')
        .filter(|classifier| !classifier.is_empty())
}
