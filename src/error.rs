//! Error types for geofeed-tools.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The two bundled reference datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// ISO 3166-1 country list
    Countries,
    /// ISO 3166-2 subdivisions grouped by country
    Subdivisions,
}

impl Dataset {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Countries => "countries",
            Dataset::Subdivisions => "subdivisions",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for geofeed-tools operations.
///
/// Every variant except [`Error::Close`] is fatal for the run it occurs in. A
/// failed close happens after the verdict is known, so it is carried on the
/// report as a warning. Problems found inside a geofeed are reported as
/// [`Diagnostic`](crate::Diagnostic)s, not errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Reference dataset could not be read from disk
    #[error("failed to load {dataset}: {}: {source}", .path.display())]
    ReferenceRead {
        dataset: Dataset,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reference dataset is not valid JSON of the expected shape
    #[error("failed to load {dataset}: {source}")]
    ReferenceParse {
        dataset: Dataset,
        #[source]
        source: serde_json::Error,
    },

    /// Geofeed file could not be opened
    #[error("failed to open geofeed file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Geofeed input failed while being read
    #[error("failed to read geofeed {input} at line {line}: {source}")]
    Read {
        input: String,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// Geofeed file could not be closed after reading
    #[error("failed to close geofeed file {}: {source}", .path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Inconsistent configuration
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

/// Result type alias for geofeed-tools operations.
pub type Result<T> = std::result::Result<T, Error>;
