//! HTTP transport for talking to the repository manager.
//!
//! Provides a trait-based abstraction over the three requests the tools make
//! (`HEAD` to probe, `PUT` to upload, `GET` to fetch a report), enabling
//! dependency injection for testing. [`HttpTransport`] is the production
//! implementation built on a single reused `ureq` agent.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use std::fmt;
use std::io::Read;
use std::time::Duration;
use ureq::SendBody;
use ureq::tls::TlsConfig;

use crate::config::Credentials;

/// HTTP status codes the protocols distinguish.
pub mod status {
    /// The resource exists or was returned.
    pub const OK: u16 = 200;
    /// The upload created the resource.
    pub const CREATED: u16 = 201;
    /// The resource does not exist.
    pub const NOT_FOUND: u16 = 404;
}

/// The request methods issued by the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Existence probe.
    Head,
    /// Upload.
    Put,
    /// Download.
    Get,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Head => "HEAD",
            Self::Put => "PUT",
            Self::Get => "GET",
        })
    }
}

/// Status and fully-read body of a `GET` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBody {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Vec<u8>,
}

/// Errors arising below the HTTP status level: DNS, connection, TLS, or
/// reading the response body.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be completed.
    #[error("{method} {url} failed: {reason}")]
    Request {
        /// The request method.
        method: Method,
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The response body could not be read.
    #[error("failed to read response body from {url}: {reason}")]
    Body {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },
}

/// Trait for issuing repository requests.
///
/// Non-success statuses are returned as values; only transport-level
/// failures are errors. The protocols decide which statuses are acceptable.
pub trait RepositoryTransport {
    /// Probe `url` and return the response status.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request cannot be completed.
    fn head(&self, url: &str) -> Result<u16, TransportError>;

    /// Upload `body` to `url` and return the response status.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request cannot be completed.
    fn put(&self, url: &str, body: &mut dyn Read) -> Result<u16, TransportError>;

    /// Fetch `url`, reading the whole response body into memory.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request cannot be completed or the
    /// body cannot be read.
    fn get(&self, url: &str) -> Result<FetchedBody, TransportError>;
}

/// Settings for the HTTP agent.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Basic authentication credentials.
    pub credentials: Credentials,
    /// Overall per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Accept any server certificate.
    pub insecure_skip_verify: bool,
}

/// HTTP transport using a shared `ureq` agent.
///
/// # Examples
///
/// ```
/// use nexus_sync::transport::{HttpTransport, TransportOptions};
///
/// let transport = HttpTransport::new(&TransportOptions::default());
/// // Use transport.head("http://localhost:8081/...") in production
/// # let _ = transport;
/// ```
pub struct HttpTransport {
    agent: ureq::Agent,
    authorization: Option<String>,
}

impl HttpTransport {
    /// Build a transport from the given options.
    #[must_use]
    pub fn new(options: &TransportOptions) -> Self {
        let mut config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(options.timeout);
        if options.insecure_skip_verify {
            config = config.tls_config(TlsConfig::builder().disable_verification(true).build());
        }
        Self {
            agent: ureq::Agent::new_with_config(config.build()),
            authorization: options.credentials.basic_auth_header(),
        }
    }

    fn authorised<B>(&self, request: ureq::RequestBuilder<B>) -> ureq::RequestBuilder<B> {
        match &self.authorization {
            Some(value) => request.header("Authorization", value.as_str()),
            None => request,
        }
    }
}

impl RepositoryTransport for HttpTransport {
    fn head(&self, url: &str) -> Result<u16, TransportError> {
        let response = self
            .authorised(self.agent.head(url))
            .call()
            .map_err(|e| request_error(Method::Head, url, &e))?;
        let status = response.status().as_u16();
        debug!("HEAD {url} -> {status}");
        Ok(status)
    }

    fn put(&self, url: &str, body: &mut dyn Read) -> Result<u16, TransportError> {
        let response = self
            .authorised(self.agent.put(url))
            .send(SendBody::from_reader(body))
            .map_err(|e| request_error(Method::Put, url, &e))?;
        let status = response.status().as_u16();
        debug!("PUT {url} -> {status}");
        Ok(status)
    }

    fn get(&self, url: &str) -> Result<FetchedBody, TransportError> {
        let response = self
            .authorised(self.agent.get(url))
            .call()
            .map_err(|e| request_error(Method::Get, url, &e))?;
        let status = response.status().as_u16();
        debug!("GET {url} -> {status}");
        // Reports are small; ureq caps in-memory reads at 10 MiB.
        let body = response
            .into_body()
            .read_to_vec()
            .map_err(|e| TransportError::Body {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(FetchedBody { status, body })
    }
}

/// Build the value of a basic `Authorization` header.
pub(crate) fn basic_auth_value(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Map a ureq error to a [`TransportError`].
fn request_error(method: Method, url: &str, err: &ureq::Error) -> TransportError {
    TransportError::Request {
        method,
        url: url.to_owned(),
        reason: err.to_string(),
    }
}
