//! Colored terminal output.

use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes user-facing progress to stdout and errors to stderr.
///
/// Color is used only when the stream is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    ///
    /// `quiet` suppresses everything except errors; `verbose` enables
    /// [`OutputManager::verbose`] lines.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn choice(is_terminal: bool) -> ColorChoice {
        if is_terminal {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }
    }

    fn write_tagged(
        &self,
        mut w: impl WriteColor,
        tag: &str,
        color: Color,
        message: &str,
    ) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(w, "{tag}")?;
        w.reset()?;
        writeln!(w, " {message}")
    }

    fn stdout(&self) -> StandardStream {
        StandardStream::stdout(Self::choice(io::stdout().is_terminal()))
    }

    /// Plain informational line.
    pub fn info(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.stdout(), "{message}")
    }

    /// Progress line for a step that is starting.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_tagged(self.stdout(), "==>", Color::Cyan, message)
    }

    /// Success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_tagged(self.stdout(), "✓", Color::Green, message)
    }

    /// Warning line.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_tagged(self.stdout(), "warning:", Color::Yellow, message)
    }

    /// Error line, printed even in quiet mode.
    pub fn error(&self, message: &str) -> io::Result<()> {
        let stderr = StandardStream::stderr(Self::choice(io::stderr().is_terminal()));
        self.write_tagged(stderr, "error:", Color::Red, message)
    }

    /// Bold section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut w = self.stdout();
        w.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(w, "\n{title}")?;
        w.reset()
    }

    /// Indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.stdout(), "    {message}")
    }

    /// Detail line shown only with `--verbose`.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        writeln!(self.stdout(), "    {message}")
    }
}
