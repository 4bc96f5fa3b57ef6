//! Colored terminal output for release operations
//!
//! Provides consistent, colored CLI output with proper formatting

use std::io::{self, IsTerminal, Write};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Color choice for stdout: colored only when it is a terminal
pub fn stdout_color() -> ColorChoice {
    color_for(std::io::stdout().is_terminal())
}

/// Color choice for stderr: colored only when it is a terminal
pub fn stderr_color() -> ColorChoice {
    color_for(std::io::stderr().is_terminal())
}

fn color_for(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    errwtr: BufferWriter,
    verbose: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.verbose)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(stdout_color()),
            errwtr: BufferWriter::stderr(stderr_color()),
            verbose,
        }
    }

    fn print_glyph(&self, glyph: &str, spec: &ColorSpec, message: &str) {
        let mut buffer = self.bufwtr.buffer();
        let _ = write_glyph(&mut buffer, glyph, spec, message);
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        self.print_glyph("ℹ", ColorSpec::new().set_fg(Some(Color::Cyan)), message);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.print_glyph(
            "✓",
            ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            message,
        );
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        self.print_glyph(
            "⚠",
            ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true),
            message,
        );
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        let mut buffer = self.errwtr.buffer();
        let _ = write_glyph(&mut buffer, "✗", &error_spec(), message);
        let _ = self.errwtr.print(&buffer);
    }

    /// Print a verbose message (only in verbose mode)
    pub fn verbose(&self, message: &str) {
        if !self.verbose {
            return;
        }
        self.print_glyph("→", ColorSpec::new().set_fg(Some(Color::Blue)), message);
    }

    /// Print an uppercased title underlined with dashes
    pub fn title(&self, title: &str) {
        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
        let _ = write!(&mut buffer, "{}", render_title(title));
        let _ = buffer.reset();
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) {
        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "    {}", message);
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print a plain message
    pub fn println(&self, message: &str) {
        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{}", message);
        let _ = self.bufwtr.print(&buffer);
    }
}

fn error_spec() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Red)).set_bold(true);
    spec
}

fn write_glyph<W: WriteColor>(out: &mut W, glyph: &str, spec: &ColorSpec, message: &str) -> io::Result<()> {
    out.set_color(spec)?;
    write!(out, "{}", glyph)?;
    out.reset()?;
    writeln!(out, " {}", message)
}

fn render_title(title: &str) -> String {
    let underline = "-".repeat(title.chars().count());
    format!("\n{}\n{}\n\n", title.to_uppercase(), underline)
}
