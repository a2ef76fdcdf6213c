//! Nexus sync library.
//!
//! This crate provides the protocols behind two command-line tools. The
//! `nexus-sync` binary compares a local Maven repository with a Nexus
//! repository and uploads what is missing; the `nexus-deliver` binary uploads
//! a single artifact to a delivery store and enforces its QA report. Both can
//! be driven programmatically through a [`transport::RepositoryTransport`].
//!
//! # Modules
//!
//! - [`artifact`] - Local artifacts and their synchronisation outcome
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Layered configuration from flags, file and defaults
//! - [`delivery`] - Upload and QA report protocol
//! - [`error`] - Top-level error type
//! - [`exit`] - Process exit codes
//! - [`logging`] - Logger initialisation
//! - [`output`] - Diagnostic output helpers
//! - [`report`] - QA report parsing and the quality gate
//! - [`scanner`] - Local tree scanner for discovering artifacts
//! - [`streams`] - Input and output redirection
//! - [`sync`] - Existence and upload protocol
//! - [`transport`] - HTTP transport abstraction

pub mod artifact;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod error;
pub mod exit;
pub mod logging;
pub mod output;
pub mod report;
pub mod scanner;
pub mod streams;
pub mod sync;
pub mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
