//! Streaming validation of whole geofeed files.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::diagnostic::Diagnostic;
use crate::error::{Error, Result};
use crate::reference::{CountrySet, ReferenceData, ReferenceIndex, SubdivisionIndex};

use super::classify::{classify_line, is_skippable};

/// Name used for inputs that are not files.
const STREAM_INPUT: &str = "<stream>";

/// Overall outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// No diagnostics
    Valid,
    /// At least one diagnostic
    Invalid,
}

impl Verdict {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Valid => "VALID",
            Verdict::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of validating one geofeed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Diagnostics in line order
    pub diagnostics: Vec<Diagnostic>,
    /// Total number of lines consumed
    pub lines_read: usize,
    /// Lines that were parsed as records
    pub records_checked: usize,
    /// Blank and comment lines
    pub lines_skipped: usize,
    /// Set when the input could not be closed cleanly; does not affect the verdict
    pub close_warning: Option<String>,
}

impl ValidationReport {
    /// Check if the geofeed had no diagnostics.
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get the verdict for this report.
    pub fn verdict(&self) -> Verdict {
        if self.is_valid() {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

/// Reads lines as raw bytes so that invalid UTF-8 does not abort the run.
struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
        }
    }

    /// Read the next line without its `\n` or `\r\n` terminator.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

/// Validate a geofeed from any buffered reader.
///
/// `input` names the source in read errors.
fn validate_lines<R: BufRead>(
    reader: R,
    input: &str,
    countries: &CountrySet,
    subdivisions: &SubdivisionIndex,
) -> Result<ValidationReport> {
    let mut lines = LineReader::new(reader);
    let mut report = ValidationReport::default();

    loop {
        let line_number = report.lines_read + 1;
        let line = match lines.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(source) => {
                return Err(Error::Read {
                    input: input.to_string(),
                    line: line_number,
                    source,
                })
            }
        };
        report.lines_read = line_number;

        if is_skippable(&line) {
            log::trace!("Skipping line {}", line_number);
            report.lines_skipped += 1;
            continue;
        }

        report.records_checked += 1;
        report
            .diagnostics
            .extend(classify_line(&line, line_number, countries, subdivisions));
    }

    Ok(report)
}

/// Validate a geofeed read from a buffered reader.
pub fn validate_reader<R: BufRead>(
    reader: R,
    countries: &CountrySet,
    subdivisions: &SubdivisionIndex,
) -> Result<ValidationReport> {
    validate_lines(reader, STREAM_INPUT, countries, subdivisions)
}

/// Validate the geofeed file at `path`.
///
/// The file is streamed line by line and closed before this function
/// returns, on success and on error. A failed close is logged and kept on
/// the report as [`ValidationReport::close_warning`].
pub fn validate_path(
    path: &Path,
    countries: &CountrySet,
    subdivisions: &SubdivisionIndex,
) -> Result<ValidationReport> {
    let file = open_feed(path)?;
    log::debug!("Validating {}", path.display());

    let mut reader = BufReader::new(file);
    let validated = validate_lines(
        &mut reader,
        &path.display().to_string(),
        countries,
        subdivisions,
    );
    let closed = close_feed(reader.into_inner()).map_err(|source| Error::Close {
        path: path.to_path_buf(),
        source,
    });

    let mut report = match validated {
        Ok(report) => report,
        Err(err) => {
            if let Err(close_err) = closed {
                log::warn!("{}", close_err);
            }
            return Err(err);
        }
    };
    note_close_failure(&mut report, closed);

    log::debug!(
        "Validated {}: {} lines, {} records, {} diagnostics",
        path.display(),
        report.lines_read,
        report.records_checked,
        report.diagnostics.len()
    );

    Ok(report)
}

/// Record a failed close on the report without touching its diagnostics.
fn note_close_failure(report: &mut ValidationReport, closed: Result<()>) {
    if let Err(err) = closed {
        log::warn!("{}", err);
        report.close_warning = Some(err.to_string());
    }
}

/// Close a geofeed file and report the result of the close.
#[cfg(unix)]
fn close_feed(file: File) -> io::Result<()> {
    use std::os::unix::io::IntoRawFd;

    let fd = file.into_raw_fd();

    // SAFETY: `fd` was just released by `File`, so this is its only close
    let result = unsafe { libc::close(fd) };

    if result == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn close_feed(file: File) -> io::Result<()> {
    drop(file);
    Ok(())
}

/// Open a geofeed file for reading, rejecting directories.
fn open_feed(path: &Path) -> Result<File> {
    let open_error = |source: io::Error| Error::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_error)?;
    let metadata = file.metadata().map_err(open_error)?;
    if metadata.is_dir() {
        return Err(open_error(io::Error::new(
            io::ErrorKind::Other,
            "is a directory",
        )));
    }

    Ok(file)
}

/// Validator holding a built reference index.
///
/// # Examples
/// ```
/// use geofeed_tools::{ReferenceData, Validator};
///
/// let validator = Validator::from_data(ReferenceData::bundled().unwrap());
/// let feed = "203.0.113.0/24,US,US-CA,Los Angeles,90001\n";
/// let report = validator.validate_reader(feed.as_bytes()).unwrap();
/// assert!(report.is_valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    index: ReferenceIndex,
}

impl Validator {
    /// Create a validator from a built index.
    pub fn new(index: ReferenceIndex) -> Self {
        Self { index }
    }

    /// Build the index from reference data and create a validator.
    pub fn from_data(data: &ReferenceData) -> Self {
        Self::new(ReferenceIndex::build(data))
    }

    /// Classify a single line.
    pub fn classify(&self, line: &str, line_number: usize) -> Vec<Diagnostic> {
        classify_line(
            line,
            line_number,
            &self.index.countries,
            &self.index.subdivisions,
        )
    }

    /// Validate a geofeed from a buffered reader.
    pub fn validate_reader<R: BufRead>(&self, reader: R) -> Result<ValidationReport> {
        validate_reader(reader, &self.index.countries, &self.index.subdivisions)
    }

    /// Validate a geofeed file.
    pub fn validate_path(&self, path: &Path) -> Result<ValidationReport> {
        validate_path(path, &self.index.countries, &self.index.subdivisions)
    }
}
