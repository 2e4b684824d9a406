//! Terminal rendering of validation results.
//!
//! The validator produces structured [`Diagnostic`]s; this module turns them
//! into text, optionally with ANSI highlighting. Keywords are magenta and
//! offending values cyan, with the verdict in green or red.

use console::Style;
use std::io::{self, Write};

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::feed::{ValidationReport, Verdict};

/// Renders diagnostics and verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    styled: bool,
}

impl Renderer {
    /// Create a renderer. With `styled` set, output carries ANSI colors.
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }

    /// Create a renderer without colors.
    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.styled {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn keyword(&self, text: &str) -> String {
        self.paint(text, Style::new().magenta())
    }

    fn value(&self, text: &str) -> String {
        self.paint(text, Style::new().cyan())
    }

    /// Render one diagnostic as `Line {n}: {message}`.
    pub fn diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let kind = &diagnostic.kind;
        let message = match kind {
            DiagnosticKind::InvalidFormat => {
                format!("invalid {} format", self.keyword(kind.subject()))
            }
            DiagnosticKind::InvalidPrefix { prefix } => format!(
                "invalid {} format ({})",
                self.keyword(kind.subject()),
                self.value(prefix)
            ),
            DiagnosticKind::InvalidCountry { country } => format!(
                "invalid {} ({})",
                self.keyword(kind.subject()),
                self.value(country)
            ),
            DiagnosticKind::NoSubdivisions { country } => {
                format!("no subdivisions found for country ({})", self.value(country))
            }
            DiagnosticKind::InvalidSubdivision {
                subdivision,
                country,
            } => format!(
                "invalid {} ({}) for country ({})",
                self.keyword(kind.subject()),
                self.value(subdivision),
                self.value(country)
            ),
        };

        format!("Line {}: {}", diagnostic.line_number, message)
    }

    /// Render the verdict header line.
    pub fn verdict(&self, verdict: Verdict) -> String {
        match verdict {
            Verdict::Valid => format!(
                "Congratulations! Your geofeed file is {}.",
                self.paint(verdict.as_str(), Style::new().green())
            ),
            Verdict::Invalid => format!(
                "Your geofeed file is {}:",
                self.paint(verdict.as_str(), Style::new().red())
            ),
        }
    }

    /// Render a one-line summary of the counters in a report.
    pub fn summary(&self, report: &ValidationReport) -> String {
        format!(
            "Checked {} records in {} lines ({} skipped), {} problems found",
            report.records_checked,
            report.lines_read,
            report.lines_skipped,
            report.diagnostics.len()
        )
    }

    /// Write the verdict followed by one `- ` item per diagnostic.
    pub fn write_report<W: Write>(&self, out: &mut W, report: &ValidationReport) -> io::Result<()> {
        writeln!(out, "{}", self.verdict(report.verdict()))?;
        for diagnostic in &report.diagnostics {
            writeln!(out, "- {}", self.diagnostic(diagnostic))?;
        }
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::plain()
    }
}
