//! Top-level error boundary.
//!
//! Every error that escapes a command ends here. The step sequencer is
//! stopped so the in-flight step renders as failed, the error is printed, and
//! the process exits with status 1.

use crate::cli::stderr_color;
use crate::error::ReleaseError;
use crate::status::{StatusDisplay, StepSequencer};
use std::io::Write;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

/// Exit code used for every handled error
pub const ERROR_EXIT_CODE: i32 = 1;

/// Terminal handler for errors reaching the top of the program
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorBoundary;

impl ErrorBoundary {
    /// Create the boundary
    pub fn new() -> Self {
        Self
    }

    /// Stop `status`, render `err` on `out` and return the exit code.
    ///
    /// An [`ErrorSignal`](crate::error::ErrorSignal) renders as a single
    /// `Error: <message>` line. Anything else renders its full diagnostic.
    pub fn handle<D, W>(&self, status: &mut StepSequencer<D>, err: &ReleaseError, out: &mut W) -> i32
    where
        D: StatusDisplay,
        W: WriteColor,
    {
        status.stop();

        match err.as_signal() {
            Some(signal) => {
                log::debug!("expected failure: {}", signal.message);
                let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
                let _ = write!(out, "\nError: {}", signal.message);
                let _ = out.reset();
                let _ = writeln!(out, "\n");
            }
            None => {
                log::debug!("unexpected failure: {}", err);
                let _ = writeln!(out, "\n{}", err.diagnostic());
            }
        }
        let _ = out.flush();

        ERROR_EXIT_CODE
    }

    /// Handle `err` against stderr and terminate the process.
    pub fn on_error<D: StatusDisplay>(&self, status: &mut StepSequencer<D>, err: ReleaseError) -> ! {
        let mut stderr = StandardStream::stderr(stderr_color());
        let code = self.handle(status, &err, &mut stderr);
        std::process::exit(code)
    }
}
