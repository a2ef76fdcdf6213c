//! The delivery protocol: upload one artifact, then fetch and judge its QA
//! report.

use log::{debug, info};
use nexus_sync_common::Gav;
use std::io::{Read, Write};
use thiserror::Error;

use crate::report::{self, GateVerdict, Report, ReportError};
use crate::transport::{RepositoryTransport, TransportError, status};

/// Settings for one delivery.
#[derive(Debug, Clone)]
pub struct DeliverySettings {
    /// Delivery store base URL; the default-layout path is appended to it.
    pub base_url: String,
    /// Coordinate of the delivered artifact.
    pub gav: Gav,
    /// Skip the upload and only fetch the report.
    pub dry_run: bool,
}

impl DeliverySettings {
    /// URL the artifact is uploaded to.
    ///
    /// # Examples
    ///
    /// ```
    /// use nexus_sync::delivery::DeliverySettings;
    /// use nexus_sync_common::Gav;
    ///
    /// let settings = DeliverySettings {
    ///     base_url: "http://store.test/APDS/".to_owned(),
    ///     gav: Gav::new("com.acme", "widget", "1.0.0", "zip").expect("valid GAV"),
    ///     dry_run: false,
    /// };
    /// assert_eq!(
    ///     settings.artifact_url(),
    ///     "http://store.test/APDS/com/acme/widget/1.0.0/widget-1.0.0.zip"
    /// );
    /// ```
    #[must_use]
    pub fn artifact_url(&self) -> String {
        self.url_for(&self.gav)
    }

    /// URL of the QA report published for the artifact.
    #[must_use]
    pub fn report_url(&self) -> String {
        self.url_for(&self.gav.qa_report())
    }

    fn url_for(&self, gav: &Gav) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), gav.default_layout())
    }
}

/// Errors that end a delivery.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The server did not accept the upload.
    #[error(
        "upload to {url} failed with status {status}; \
         remember to enable or disable the http_proxy and no_proxy environment variables"
    )]
    UploadRejected {
        /// The upload URL.
        url: String,
        /// The status the server returned.
        status: u16,
    },

    /// The QA report could not be fetched.
    #[error("cannot find QA report at {url}: status {status}")]
    ReportUnavailable {
        /// The report URL.
        url: String,
        /// The status the server returned.
        status: u16,
    },

    /// The request could not be completed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The report could not be read or written.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// A completed delivery: the report and the quality gate's verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// The parsed QA report.
    pub report: Report,
    /// The quality gate verdict.
    pub verdict: GateVerdict,
}

/// Deliver `input` and report the QA findings to `output`.
///
/// Each report archive entry is announced on `output` before it is parsed.
/// Every notification is written to `output` before the verdict is
/// computed, so a failing gate never truncates the listing.
///
/// # Errors
///
/// Returns [`DeliveryError`] when the upload is rejected, the report is
/// missing or malformed, or a request cannot be completed.
pub fn deliver(
    settings: &DeliverySettings,
    transport: &dyn RepositoryTransport,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<DeliveryOutcome, DeliveryError> {
    let url = settings.artifact_url();
    if settings.dry_run {
        info!("dry run: skipping upload to {url}");
    } else {
        info!("uploading {} to {url}", settings.gav);
        let status = transport.put(&url, input)?;
        if status != status::CREATED {
            return Err(DeliveryError::UploadRejected { url, status });
        }
    }

    let report_url = settings.report_url();
    info!("fetching QA report from {report_url}");
    let fetched = transport.get(&report_url)?;
    if fetched.status != status::OK {
        return Err(DeliveryError::ReportUnavailable {
            url: report_url,
            status: fetched.status,
        });
    }

    let report = report::read_report_archive(&fetched.body, output)?;
    debug!("QA report: {report:?}");
    report::render_notifications(&report, output)?;
    let verdict = report::quality_gate(&report);
    Ok(DeliveryOutcome { report, verdict })
}
