//! Per-line classification.

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::reference::{CountrySet, SubdivisionIndex};

use super::record::GeofeedRecord;

/// Check whether a line is skipped without producing diagnostics.
///
/// Blank lines and lines whose first non-blank character is `#` are skipped.
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Classify one geofeed line.
///
/// Returns the diagnostics found on the line, in order. A line produces at
/// most two: a prefix diagnostic, followed by at most one about the country
/// or subdivision. Checks run in this order:
///
/// 1. Blank and comment lines are skipped.
/// 2. Fewer than five fields stops with `InvalidFormat`.
/// 3. An invalid prefix is reported, and checking continues.
/// 4. An empty country code stops; an unknown one stops with `InvalidCountry`.
/// 5. An empty subdivision code stops; a country missing from the index
///    stops with `NoSubdivisions`; an unknown code gives `InvalidSubdivision`.
pub fn classify_line(
    line: &str,
    line_number: usize,
    countries: &CountrySet,
    subdivisions: &SubdivisionIndex,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if is_skippable(line) {
        return diagnostics;
    }

    let record = match GeofeedRecord::parse(line) {
        Some(record) => record,
        None => {
            diagnostics.push(Diagnostic::new(line_number, DiagnosticKind::InvalidFormat));
            return diagnostics;
        }
    };

    if !record.has_valid_prefix() {
        diagnostics.push(Diagnostic::new(
            line_number,
            DiagnosticKind::InvalidPrefix {
                prefix: record.prefix.clone(),
            },
        ));
    }

    let country = record.country_code;
    if country.is_empty() {
        return diagnostics;
    }

    if !countries.contains(&country) {
        diagnostics.push(Diagnostic::new(
            line_number,
            DiagnosticKind::InvalidCountry { country },
        ));
        return diagnostics;
    }

    let subdivision = record.subdivision_code;
    if subdivision.is_empty() {
        return diagnostics;
    }

    match subdivisions.get(&country) {
        None => diagnostics.push(Diagnostic::new(
            line_number,
            DiagnosticKind::NoSubdivisions { country },
        )),
        Some(codes) if !codes.contains(&subdivision) => diagnostics.push(Diagnostic::new(
            line_number,
            DiagnosticKind::InvalidSubdivision {
                subdivision,
                country,
            },
        )),
        Some(_) => {}
    }

    diagnostics
}
