//! Process exit codes.
//!
//! Library code returns errors and outcomes; only the binaries turn them
//! into a status with [`std::process::exit`].

/// Everything succeeded.
pub const SUCCESS: i32 = 0;
/// Invalid command line.
pub const USAGE: i32 = 1;
/// A fatal transport, parse or I/O error.
pub const FAILURE: i32 = 1;
/// The server rejected the delivery upload.
pub const UPLOAD_REJECTED: i32 = 2;
/// The QA report contains an `ERROR` or `FATAL` notification.
pub const QUALITY_GATE_FAILED: i32 = 3;

/// Exit code for a command-line parse result that clap reports as an error.
///
/// Help and version requests are reported through the same path and exit
/// successfully; everything else is a usage error.
#[must_use]
pub fn exit_code_for_parse_error(err: &clap::Error) -> i32 {
    if err.use_stderr() { USAGE } else { SUCCESS }
}
