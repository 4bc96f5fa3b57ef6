//! Colored terminal rendering for step status

use super::{StatusDisplay, StepHandle, StepOutcome};
use crate::cli::stdout_color;
use std::io::Write;
use std::sync::{Arc, Mutex};
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

/// Renders steps as a linear transcript: `⋯ label` when a step starts,
/// then `✓ label` or `✗ label` once it resolves.
pub struct TerminalStatus<W: WriteColor> {
    out: Arc<Mutex<W>>,
}

impl TerminalStatus<StandardStream> {
    /// Render on stdout, colored when it is a terminal
    pub fn stdout() -> Self {
        Self::new(StandardStream::stdout(stdout_color()))
    }
}

impl<W: WriteColor> TerminalStatus<W> {
    /// Render on an arbitrary writer
    pub fn new(out: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    /// Inspect the underlying writer
    pub fn with_output<T>(&self, f: impl FnOnce(&W) -> T) -> T {
        let guard = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }
}

/// Handle for a step drawn by [`TerminalStatus`]
pub struct TerminalStep<W: WriteColor> {
    label: String,
    out: Arc<Mutex<W>>,
}

impl<W: WriteColor> StatusDisplay for TerminalStatus<W> {
    type Handle = TerminalStep<W>;

    fn begin(&self, label: &str) -> TerminalStep<W> {
        write_line(&self.out, "⋯", Color::Magenta, label);
        TerminalStep {
            label: label.to_string(),
            out: Arc::clone(&self.out),
        }
    }
}

impl<W: WriteColor> StepHandle for TerminalStep<W> {
    fn resolve(self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Success => write_line(&self.out, "✓", Color::Green, &self.label),
            StepOutcome::Failure => write_line(&self.out, "✗", Color::Red, &self.label),
        }
    }
}

fn write_line<W: WriteColor>(out: &Mutex<W>, glyph: &str, color: Color, label: &str) {
    let mut out = out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _ = out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(out, "{}", glyph);
    let _ = out.reset();
    let _ = writeln!(out, " {}", label);
    let _ = out.flush();
}
