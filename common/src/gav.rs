//! The Maven coordinate (`GAV`) and its default-layout encoding.
//!
//! A [`Gav`] identifies one file in a Maven repository: group, artifact,
//! version, packaging (file extension) and an optional classifier. Values are
//! validated on construction and immutable afterwards.

use crate::error::GavError;
use std::fmt;

/// Classifier under which the repository manager publishes the quality report
/// for a delivered artifact.
pub const QA_REPORT_CLASSIFIER: &str = "qareport";

/// Path separator used by the Maven default layout and in repository URLs.
const SEPARATOR: &str = "/";

/// Names the coordinate fields for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GavField {
    /// The group identifier.
    GroupId,
    /// The artifact identifier.
    ArtifactId,
    /// The version.
    Version,
    /// The packaging (file extension).
    Packaging,
}

impl fmt::Display for GavField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GroupId => "groupId",
            Self::ArtifactId => "artifactId",
            Self::Version => "version",
            Self::Packaging => "packaging",
        };
        f.write_str(name)
    }
}

/// A Maven coordinate: group, artifact, version, packaging and an optional
/// classifier.
///
/// # Examples
///
/// ```
/// use nexus_sync_common::Gav;
///
/// let gav = Gav::new("com.acme", "widget", "1.0.0", "jar").expect("valid GAV");
/// assert_eq!(gav.default_layout(), "/com/acme/widget/1.0.0/widget-1.0.0.jar");
///
/// let sources = gav.with_classifier("sources");
/// assert_eq!(sources.file_name(), "widget-1.0.0-sources.jar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gav {
    group_id: String,
    artifact_id: String,
    version: String,
    packaging: String,
    classifier: Option<String>,
}

impl Gav {
    /// Create a coordinate without a classifier.
    ///
    /// # Errors
    ///
    /// Returns [`GavError::EmptyField`] if any of the four fields is empty.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        packaging: impl Into<String>,
    ) -> Result<Self, GavError> {
        let gav = Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            packaging: packaging.into(),
            classifier: None,
        };
        gav.validate()?;
        Ok(gav)
    }

    fn validate(&self) -> Result<(), GavError> {
        let fields = [
            (GavField::GroupId, &self.group_id),
            (GavField::ArtifactId, &self.artifact_id),
            (GavField::Version, &self.version),
            (GavField::Packaging, &self.packaging),
        ];
        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(GavError::EmptyField { field: *field }),
            None => Ok(()),
        }
    }

    /// Return a copy of this coordinate with the classifier replaced.
    ///
    /// An empty classifier clears it.
    #[must_use]
    pub fn with_classifier(&self, classifier: impl Into<String>) -> Self {
        let classifier = classifier.into();
        Self {
            classifier: (!classifier.is_empty()).then_some(classifier),
            ..self.clone()
        }
    }

    /// Return the coordinate of the quality report published for this one.
    #[must_use]
    pub fn qa_report(&self) -> Self {
        self.with_classifier(QA_REPORT_CLASSIFIER)
    }

    /// The group identifier, as supplied or decoded.
    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// The artifact identifier.
    #[must_use]
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// The version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The packaging, i.e. the file extension without its leading dot.
    #[must_use]
    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    /// The classifier, if any.
    #[must_use]
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// The file name in default layout:
    /// `<artifact>-<version>[-<classifier>].<packaging>`.
    #[must_use]
    pub fn file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}-{}-{classifier}.{}",
                self.artifact_id, self.version, self.packaging
            ),
            None => format!("{}-{}.{}", self.artifact_id, self.version, self.packaging),
        }
    }

    /// Encode this coordinate as a default-layout path.
    ///
    /// Every `.` in the group becomes a path separator and the result always
    /// starts with `/`, so it can be appended directly to a repository URL.
    #[must_use]
    pub fn default_layout(&self) -> String {
        let group = self.group_id.replace('.', SEPARATOR);
        [
            "",
            group.as_str(),
            self.artifact_id.as_str(),
            self.version.as_str(),
            self.file_name().as_str(),
        ]
        .join(SEPARATOR)
    }
}

impl fmt::Display for Gav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.packaging)
    }
}
