//! The delivery QA report: archive reading, rendering and the quality gate.
//!
//! The repository manager publishes the report as a zip archive holding an
//! XML document:
//!
//! ```xml
//! <delivery>
//!   <report>
//!     <returnValue>0</returnValue>
//!     <highestSeverity>WARN</highestSeverity>
//!     <notification id="1">
//!       <severity>WARN</severity>
//!       <message>missing checksum</message>
//!     </notification>
//!   </report>
//! </delivery>
//! ```

use log::{debug, trace, warn};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;
use std::io::{self, Cursor, Read, Write};
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

/// Name of the document's root element.
const ROOT_ELEMENT: &str = "delivery";

/// Severities that fail the quality gate.
const BLOCKING_SEVERITIES: [&str; 2] = ["ERROR", "FATAL"];

/// Root of the report document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Delivery {
    /// The report body.
    pub report: Report,
}

/// The outcome of the server's QA checks.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Report {
    /// Overall return value as reported by the server.
    #[serde(rename = "returnValue")]
    pub return_value: String,
    /// Highest severity among the notifications.
    #[serde(rename = "highestSeverity")]
    pub highest_severity: String,
    /// Individual findings in document order.
    #[serde(rename = "notification")]
    pub notifications: Vec<Notification>,
}

/// One finding of the QA checks.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Notification {
    /// Identifier, unique within a report.
    #[serde(rename = "@id")]
    pub id: i64,
    /// Severity such as `INFO`, `WARN`, `ERROR` or `FATAL`.
    pub severity: String,
    /// Human-readable message.
    pub message: String,
}

impl Notification {
    /// Return true when this notification fails the quality gate.
    ///
    /// The comparison is exact and case-sensitive.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        BLOCKING_SEVERITIES.contains(&self.severity.as_str())
    }
}

/// Errors parsing one delivery document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document is well formed but its root is not `<delivery>`.
    #[error("expected root element <delivery>, found <{found}>")]
    UnexpectedRoot {
        /// Local name of the root element actually present.
        found: String,
    },

    /// The document holds no element at all.
    #[error("document has no root element")]
    MissingRoot,

    /// The document is not well-formed XML.
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),

    /// The document does not match the report structure.
    #[error(transparent)]
    Deserialize(#[from] quick_xml::DeError),
}

/// Errors reading a report archive.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The archive is not a readable zip file.
    #[error("QA report is not a valid archive: {0}")]
    Archive(#[from] ZipError),

    /// An archive entry could not be read.
    #[error("failed to read QA report entry {name}: {source}")]
    ReadEntry {
        /// Name of the entry within the archive.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An archive entry is not a valid delivery document.
    #[error("invalid QA report entry {name}: {source}")]
    Xml {
        /// Name of the entry within the archive.
        name: String,
        /// The underlying parse error.
        #[source]
        source: DocumentError,
    },

    /// Notifications could not be written.
    #[error("failed to write QA report: {0}")]
    Write(#[source] io::Error),
}

/// Parse one delivery document.
///
/// The root element must be `<delivery>`; any other document, such as an
/// HTML page served in place of the report, is rejected. Text content is
/// trimmed of surrounding whitespace.
///
/// # Errors
///
/// Returns [`DocumentError`] if `xml` is malformed or not a delivery
/// document.
///
/// # Examples
///
/// ```
/// use nexus_sync::report::parse_delivery;
///
/// let delivery = parse_delivery(
///     r#"<delivery><report><notification id="7"><severity>INFO</severity>
///        <message>fine</message></notification></report></delivery>"#,
/// )
/// .expect("valid report");
/// assert_eq!(delivery.report.notifications[0].id, 7);
/// ```
pub fn parse_delivery(xml: &str) -> Result<Delivery, DocumentError> {
    let found = root_element(xml)?;
    if found != ROOT_ELEMENT {
        return Err(DocumentError::UnexpectedRoot { found });
    }
    Ok(quick_xml::de::from_str(xml)?)
}

/// Local name of the first element in `xml`.
fn root_element(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                return Ok(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
            }
            Event::Eof => return Err(DocumentError::MissingRoot),
            _ => {}
        }
    }
}

/// Read the report from a zip archive held in memory.
///
/// Every file entry is announced on `listing` as `Contents of <name>:` and
/// then parsed; when there are several, the last one wins. An archive
/// without file entries yields an empty report.
///
/// # Errors
///
/// Returns [`ReportError`] if the archive or any entry is unreadable or
/// malformed, or if `listing` fails.
pub fn read_report_archive(
    bytes: &[u8],
    listing: &mut dyn Write,
) -> Result<Report, ReportError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut delivery = None;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_owned();
        writeln!(listing, "Contents of {name}:").map_err(ReportError::Write)?;
        debug!("reading QA report entry {name}");
        let mut contents = String::new();
        entry
            .read_to_string(&mut contents)
            .map_err(|source| ReportError::ReadEntry {
                name: name.clone(),
                source,
            })?;
        trace!("{name}: {contents}");
        let parsed =
            parse_delivery(&contents).map_err(|source| ReportError::Xml { name, source })?;
        delivery = Some(parsed);
    }

    match delivery {
        Some(delivery) => Ok(delivery.report),
        None => {
            warn!("QA report archive has no entries");
            Ok(Report::default())
        }
    }
}

/// Write every notification as `<id> <severity> <message>`.
///
/// The id is zero-padded to two digits and the severity left-justified to
/// eight columns. Messages are printed as parsed, so whitespace around a
/// `<message>` body does not appear.
///
/// # Errors
///
/// Returns [`ReportError::Write`] if `out` fails.
pub fn render_notifications(report: &Report, out: &mut dyn Write) -> Result<(), ReportError> {
    for notification in &report.notifications {
        writeln!(
            out,
            "{:02} {:<8} {}",
            notification.id, notification.severity, notification.message
        )
        .map_err(ReportError::Write)?;
    }
    out.flush().map_err(ReportError::Write)
}

/// Result of applying the quality gate to a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    /// No blocking notification.
    Passed,
    /// The first blocking notification in document order.
    Failed(Notification),
}

impl GateVerdict {
    /// Return true when the gate passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Apply the quality gate: fail on the first `ERROR` or `FATAL`.
#[must_use]
pub fn quality_gate(report: &Report) -> GateVerdict {
    report
        .notifications
        .iter()
        .find(|notification| notification.is_blocking())
        .map_or(GateVerdict::Passed, |notification| {
            GateVerdict::Failed(notification.clone())
        })
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
