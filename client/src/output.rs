//! Diagnostic output helpers shared by both binaries.

use std::fmt::Display;
use std::io::Write;

use crate::error::NexusError;
use crate::exit;
use crate::report::Notification;

/// Write `message` and a newline to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Report a run failure on `stderr` and return its exit code.
pub fn exit_code_for_error(err: &NexusError, stderr: &mut dyn Write) -> i32 {
    write_stderr_line(stderr, format!("error: {err}"));
    err.exit_code()
}

/// The diagnostic printed when the quality gate fails.
#[must_use]
pub fn gate_failure_message(notification: &Notification) -> String {
    format!(
        "QA report contains {} notification {:02}: {}",
        notification.severity, notification.id, notification.message
    )
}

/// Report a failed quality gate on `stderr` and return its exit code.
pub fn exit_code_for_gate_failure(notification: &Notification, stderr: &mut dyn Write) -> i32 {
    write_stderr_line(stderr, gate_failure_message(notification));
    exit::QUALITY_GATE_FAILED
}
