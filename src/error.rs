//! Error types for release step operations.
//!
//! Errors fall into two tiers. [`ErrorSignal`] is the expected, user-facing
//! failure ("tag already exists") and is rendered tersely by the error
//! boundary. Every other variant is unexpected and is rendered with its full
//! diagnostic.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as _;
use std::fmt::{self, Write as _};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release step operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release step operations
///
/// Unexpected variants carry a [`Trace`] recorded by the `From` conversion,
/// so the trace points at the `?` that raised the error.
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Expected, user-facing failure
    #[error("{0}")]
    Signal(#[from] ErrorSignal),

    /// Git command errors
    #[error("Git error: {source}")]
    Git {
        /// Underlying git failure
        source: GitError,
        /// Where the failure was raised
        trace: Trace,
    },

    /// GitHub API errors
    #[error("GitHub error: {source}")]
    GitHub {
        /// Underlying API failure
        source: GitHubError,
        /// Where the failure was raised
        trace: Trace,
    },

    /// IO errors
    #[error("IO error: {source}")]
    Io {
        /// Underlying IO failure
        source: std::io::Error,
        /// Where the failure was raised
        trace: Trace,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        /// Underlying serde_json failure
        source: serde_json::Error,
        /// Where the failure was raised
        trace: Trace,
    },

    /// Generic errors from anyhow
    #[error("{source}")]
    Anyhow {
        /// Underlying error with its context chain
        source: anyhow::Error,
        /// Where the failure was raised
        trace: Trace,
    },
}

macro_rules! impl_traced_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ReleaseError {
                fn from(source: $ty) -> Self {
                    ReleaseError::$variant {
                        source,
                        trace: Trace::capture(),
                    }
                }
            }
        )*
    };
}

impl_traced_from! {
    GitError => Git,
    GitHubError => GitHub,
    std::io::Error => Io,
    serde_json::Error => Json,
    anyhow::Error => Anyhow,
}

/// Call stack recorded where an unexpected error was created
#[derive(Debug)]
pub struct Trace(Backtrace);

impl Trace {
    /// Record the current call stack, regardless of `RUST_BACKTRACE`
    pub fn capture() -> Self {
        Self(Backtrace::force_capture())
    }

    /// The recorded backtrace
    pub fn backtrace(&self) -> &Backtrace {
        &self.0
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The expected failure kind.
///
/// Raised by workflow code for known conditions the operator can act on.
/// The error boundary recognises it by variant, never by message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ErrorSignal {
    /// Human-readable message
    pub message: String,
}

impl ErrorSignal {
    /// Create a new signal with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Git command errors
#[derive(Error, Debug)]
pub enum GitError {
    /// The git binary could not be located
    #[error("git executable not found in PATH: {reason}")]
    NotInstalled {
        /// Reason reported by the lookup
        reason: String,
    },

    /// The git process could not be spawned
    #[error("Failed to run 'git {command}' in {}", .work_dir.display())]
    SpawnFailed {
        /// Command line passed to git
        command: String,
        /// Working directory
        work_dir: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// git exited with a non-zero status
    #[error("'git {command}' exited with status {status}: {stderr}")]
    CommandFailed {
        /// Command line passed to git
        command: String,
        /// Exit status code, -1 when killed by a signal
        status: i32,
        /// Trimmed stderr output
        stderr: String,
    },

    /// git output was not valid UTF-8
    #[error("'git {command}' produced non UTF-8 output")]
    InvalidOutput {
        /// Command line passed to git
        command: String,
    },
}

/// GitHub API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// No token was configured
    #[error("GitHub token not provided. Set GH_TOKEN or GITHUB_TOKEN, or pass --token")]
    MissingToken,

    /// Transport-level failure
    #[error("Request to {url} failed")]
    Request {
        /// Requested URL
        url: String,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with an error status
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        /// HTTP method
        method: &'static str,
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },
}

impl ReleaseError {
    /// Shorthand for an [`ErrorSignal`] wrapped in a `ReleaseError`
    pub fn signal(message: impl Into<String>) -> Self {
        ReleaseError::Signal(ErrorSignal::new(message))
    }

    /// The signal carried by this error, if it is the expected kind
    pub fn as_signal(&self) -> Option<&ErrorSignal> {
        match self {
            ReleaseError::Signal(signal) => Some(signal),
            _ => None,
        }
    }

    /// Where an unexpected error was created; `None` for signals
    pub fn trace(&self) -> Option<&Trace> {
        match self {
            ReleaseError::Signal(_) => None,
            ReleaseError::Git { trace, .. }
            | ReleaseError::GitHub { trace, .. }
            | ReleaseError::Io { trace, .. }
            | ReleaseError::Json { trace, .. }
            | ReleaseError::Anyhow { trace, .. } => Some(trace),
        }
    }

    /// Full diagnostic rendering: message, cause chain and stack trace.
    pub fn diagnostic(&self) -> String {
        let mut out = match self {
            ReleaseError::Anyhow { source, .. } => {
                // anyhow's Debug prints the context chain, plus its own
                // backtrace when RUST_BACKTRACE enabled one
                let rendered = format!("{source:?}");
                if source.backtrace().status() == BacktraceStatus::Captured {
                    return rendered;
                }
                rendered
            }
            _ => {
                let mut out = self.to_string();
                // The variant's message already embeds its direct source
                let mut cause = self.source().and_then(|s| s.source());
                if cause.is_some() {
                    out.push_str("\n\nCaused by:");
                }
                while let Some(err) = cause {
                    let _ = write!(out, "\n    {err}");
                    cause = err.source();
                }
                out
            }
        };

        if let Some(trace) = self.trace() {
            let _ = write!(out, "\n\nStack backtrace:\n{trace}");
        }
        out
    }
}
