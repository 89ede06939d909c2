//! Report emission for diff results.
//!
//! JSON is the one wire format every consumer of a [`DiffReport`] shares;
//! both producers (commit comparison and plan application) serialize
//! through this module so their output is byte-for-byte interchangeable.

use crate::diff::DiffReport;
use crate::error::Result;
use std::io::Write;

/// JSON report generator.
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a pretty-printing reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact single-line reporter.
    #[must_use]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }

    /// Set pretty printing.
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Render a report to a JSON string.
    pub fn render(&self, report: &DiffReport) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(rendered)
    }

    /// Write a report to any writer, with a trailing newline.
    pub fn write_to(&self, report: &DiffReport, mut writer: impl Write) -> Result<()> {
        let rendered = self.render(report)?;
        writer.write_all(rendered.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
