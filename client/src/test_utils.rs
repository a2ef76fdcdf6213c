//! Shared test utilities for the client crate.

use crate::transport::{FetchedBody, Method, RepositoryTransport, TransportError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{Cursor, Read, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// What a stubbed request returns.
#[derive(Debug)]
pub enum StubResponse {
    /// Answer with a bare status.
    Status(u16),
    /// Answer a `GET` with a status and body.
    Body(FetchedBody),
    /// Fail below the HTTP level with the given reason.
    Fail(&'static str),
}

/// Represents an expected request for testing.
#[derive(Debug)]
pub struct ExpectedCall {
    /// The request method.
    pub method: Method,
    /// The URL that must be requested.
    pub url: String,
    /// The response to return.
    pub response: StubResponse,
}

impl ExpectedCall {
    /// Expect a `HEAD` answered with `status`.
    pub fn head(url: impl Into<String>, status: u16) -> Self {
        Self {
            method: Method::Head,
            url: url.into(),
            response: StubResponse::Status(status),
        }
    }

    /// Expect a `PUT` answered with `status`.
    pub fn put(url: impl Into<String>, status: u16) -> Self {
        Self {
            method: Method::Put,
            url: url.into(),
            response: StubResponse::Status(status),
        }
    }

    /// Expect a `GET` answered with `status` and `body`.
    pub fn get(url: impl Into<String>, status: u16, body: Vec<u8>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            response: StubResponse::Body(FetchedBody { status, body }),
        }
    }

    /// Expect a request that fails with a transport error.
    pub fn failing(method: Method, url: impl Into<String>, reason: &'static str) -> Self {
        Self {
            method,
            url: url.into(),
            response: StubResponse::Fail(reason),
        }
    }
}

/// A body received by [`StubTransport::put`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    /// The upload URL.
    pub url: String,
    /// The bytes that were sent.
    pub body: Vec<u8>,
}

/// A stub implementation of `RepositoryTransport` for testing.
///
/// Requests must arrive in the order they were queued; uploaded bodies are
/// read in full and recorded.
#[derive(Debug)]
pub struct StubTransport {
    expected: RefCell<VecDeque<ExpectedCall>>,
    uploads: RefCell<Vec<RecordedUpload>>,
}

impl StubTransport {
    /// Creates a new `StubTransport` with the given expected calls.
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
            uploads: RefCell::new(Vec::new()),
        }
    }

    /// Returns the bodies uploaded so far.
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.borrow().clone()
    }

    /// Asserts that all expected requests have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not made.
    pub fn assert_finished(&self) {
        assert!(
            self.expected.borrow().is_empty(),
            "expected no further requests, {} remain",
            self.expected.borrow().len()
        );
    }

    fn next(&self, method: Method, url: &str) -> StubResponse {
        let call = self
            .expected
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {method} {url}"));
        assert_eq!(call.method, method, "method for {url}");
        assert_eq!(call.url, url);
        call.response
    }
}

fn failure(method: Method, url: &str, reason: &str) -> TransportError {
    TransportError::Request {
        method,
        url: url.to_owned(),
        reason: reason.to_owned(),
    }
}

impl RepositoryTransport for StubTransport {
    fn head(&self, url: &str) -> Result<u16, TransportError> {
        match self.next(Method::Head, url) {
            StubResponse::Status(status) => Ok(status),
            StubResponse::Body(fetched) => Ok(fetched.status),
            StubResponse::Fail(reason) => Err(failure(Method::Head, url, reason)),
        }
    }

    fn put(&self, url: &str, body: &mut dyn Read) -> Result<u16, TransportError> {
        let response = self.next(Method::Put, url);
        let mut bytes = Vec::new();
        body.read_to_end(&mut bytes)
            .expect("stub upload body should be readable");
        self.uploads.borrow_mut().push(RecordedUpload {
            url: url.to_owned(),
            body: bytes,
        });
        match response {
            StubResponse::Status(status) => Ok(status),
            StubResponse::Body(fetched) => Ok(fetched.status),
            StubResponse::Fail(reason) => Err(failure(Method::Put, url, reason)),
        }
    }

    fn get(&self, url: &str) -> Result<FetchedBody, TransportError> {
        match self.next(Method::Get, url) {
            StubResponse::Status(status) => Ok(FetchedBody {
                status,
                body: Vec::new(),
            }),
            StubResponse::Body(fetched) => Ok(fetched),
            StubResponse::Fail(reason) => Err(failure(Method::Get, url, reason)),
        }
    }
}

/// Builds an in-memory zip archive holding the given `(name, contents)`
/// entries, in order.
pub fn report_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start archive entry");
        writer
            .write_all(contents.as_bytes())
            .expect("write archive entry");
    }
    writer.finish().expect("finish archive").into_inner()
}
