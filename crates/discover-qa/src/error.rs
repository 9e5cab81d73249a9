// Error types for discover-qa

use std::time::Duration;
use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the discovery app under test
#[derive(Debug, Error)]
pub enum Error {
    /// Browser driver error
    ///
    /// Element-not-found and driver-side timeouts surface here and propagate
    /// uncaught: they signal a real UI/selector mismatch or an application
    /// defect, never a condition the harness retries.
    #[error("browser driver error: {0}")]
    Driver(#[from] playwright_rs::Error),

    /// Harness-level bounded wait was not satisfied in time
    ///
    /// The primary mechanism by which broken rendering or navigation is
    /// detected.
    #[error("timed out after {timeout:?} waiting for {what}")]
    Timeout { what: String, timeout: Duration },

    /// I/O error while writing artifacts or logs
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A case with a pass disposition failed
    ///
    /// Carries the assertion message or error chain captured from the test
    /// body.
    #[error("case '{case}' failed: {reason}")]
    CaseFailed { case: String, reason: String },

    /// A case pinned to a known defect passed
    ///
    /// Either the defect was fixed or the pin no longer reproduces it; the
    /// case's disposition must be revisited.
    #[error("case '{case}' passed but is pinned to known defect: {defect}")]
    UnexpectedPass { case: String, defect: &'static str },
}
