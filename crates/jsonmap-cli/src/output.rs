//! Output formatting and writing utilities
//!
//! Mapped documents go to the data writer (stdout by default); status
//! messages go to the message writer (stderr by default) so piping the
//! output of `jsonmap map` never mixes the two.

use crate::cli::DocumentFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

/// Serialize a document in the requested format
pub fn render<T: Serialize>(value: &T, format: DocumentFormat, pretty: bool) -> Result<String> {
    Ok(match (format, pretty) {
        (DocumentFormat::Json, true) => serde_json::to_string_pretty(value)?,
        (DocumentFormat::Json, false) => serde_json::to_string(value)?,
        (DocumentFormat::Yaml, _) => serde_yaml::to_string(value)?,
    })
}

/// Output writer that separates data from status messages
pub struct OutputWriter {
    use_color: bool,
    quiet: bool,
    data: Box<dyn Write>,
    messages: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer over stdout and stderr
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self::with_writers(use_color, quiet, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Create an output writer with custom writers
    pub fn with_writers(
        use_color: bool,
        quiet: bool,
        data: Box<dyn Write>,
        messages: Box<dyn Write>,
    ) -> Self {
        Self {
            use_color,
            quiet,
            data,
            messages,
        }
    }

    /// Write a document, newline-terminated
    pub fn data(&mut self, content: &str) -> Result<()> {
        if content.ends_with('\n') {
            write!(self.data, "{}", content)?;
        } else {
            writeln!(self.data, "{}", content)?;
        }
        self.data.flush()?;
        Ok(())
    }

    fn message(&mut self, content: &str) -> Result<()> {
        writeln!(self.messages, "{}", content)?;
        self.messages.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);
        if self.quiet {
            return Ok(());
        }
        if self.use_color {
            self.message(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.message(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.use_color {
            self.message(&message.green().to_string())
        } else {
            self.message(message)
        }
    }

    /// Write a warning message; shown even in quiet mode
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.use_color {
            self.message(&message.yellow().to_string())
        } else {
            self.message(&format!("WARNING: {}", message))
        }
    }
}
