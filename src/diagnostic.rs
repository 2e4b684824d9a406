//! Structured per-line findings.

use std::fmt;

/// The kind of defect found on a geofeed line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Fewer than five CSV fields
    InvalidFormat,
    /// First field is not valid CIDR notation
    InvalidPrefix { prefix: String },
    /// Country code is not an ISO 3166-1 alpha-2 code
    InvalidCountry { country: String },
    /// Country has no subdivisions in the reference data
    NoSubdivisions { country: String },
    /// Subdivision code is not valid for the country
    InvalidSubdivision {
        subdivision: String,
        country: String,
    },
}

impl DiagnosticKind {
    /// Short name of the field this diagnostic is about.
    pub fn subject(&self) -> &'static str {
        match self {
            DiagnosticKind::InvalidFormat => "geofeed",
            DiagnosticKind::InvalidPrefix { .. } => "prefix",
            DiagnosticKind::InvalidCountry { .. } => "country code",
            DiagnosticKind::NoSubdivisions { .. } => "subdivisions",
            DiagnosticKind::InvalidSubdivision { .. } => "subdivision code",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::InvalidFormat => write!(f, "invalid geofeed format"),
            DiagnosticKind::InvalidPrefix { prefix } => {
                write!(f, "invalid prefix format ({})", prefix)
            }
            DiagnosticKind::InvalidCountry { country } => {
                write!(f, "invalid country code ({})", country)
            }
            DiagnosticKind::NoSubdivisions { country } => {
                write!(f, "no subdivisions found for country ({})", country)
            }
            DiagnosticKind::InvalidSubdivision {
                subdivision,
                country,
            } => write!(
                f,
                "invalid subdivision code ({}) for country ({})",
                subdivision, country
            ),
        }
    }
}

/// A defect found on one line of a geofeed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// 1-based line number
    pub line_number: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(line_number: usize, kind: DiagnosticKind) -> Self {
        Self { line_number, kind }
    }

    /// Get the message without the line number.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line_number, self.kind)
    }
}
