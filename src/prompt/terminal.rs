//! Operator backed by the controlling terminal

use super::{Operator, Question};
use crate::cli::stdout_color;
use crate::error::{ReleaseError, Result};
use std::io::{BufRead, IsTerminal, Write};
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

/// Reads answers from stdin, one line per question
#[derive(Debug, Default)]
pub struct TerminalOperator;

impl TerminalOperator {
    /// Create a terminal operator
    pub fn new() -> Self {
        Self
    }

    fn render(question: &Question) -> std::io::Result<()> {
        let mut out = StandardStream::stdout(stdout_color());
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(out, "?")?;
        out.reset()?;
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, " {}", question.message)?;
        out.reset()?;
        if let Some(default) = &question.default {
            out.set_color(ColorSpec::new().set_dimmed(true))?;
            write!(out, " ({})", default)?;
            out.reset()?;
        }
        write!(out, " ")?;
        out.flush()
    }
}

impl Operator for TerminalOperator {
    async fn ask(&self, question: &Question) -> Result<String> {
        Self::render(question)?;

        // stdin reads block; keep them off the runtime's worker
        let line = tokio::task::spawn_blocking(|| -> std::io::Result<String> {
            let mut line = String::new();
            // EOF leaves the line empty, which resolves to the default
            std::io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        })
        .await
        .map_err(|e| ReleaseError::from(anyhow::anyhow!("prompt task failed: {}", e)))??;

        // A terminal echoes the operator's Enter; piped input does not
        if !std::io::stdin().is_terminal() {
            let mut out = std::io::stdout();
            writeln!(out)?;
            out.flush()?;
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
