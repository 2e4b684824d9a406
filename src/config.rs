//! Validator configuration.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::reference::ReferenceData;

/// Where the ISO 3166 reference data comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReferenceSource {
    /// Datasets compiled into the crate
    #[default]
    Bundled,
    /// JSON files on disk with the same shape as the bundled datasets
    Files {
        countries: PathBuf,
        subdivisions: PathBuf,
    },
}

impl ReferenceSource {
    /// Build a source from optional file overrides.
    ///
    /// Both paths must be given together; with neither, the bundled data is
    /// used.
    pub fn from_overrides(
        countries: Option<PathBuf>,
        subdivisions: Option<PathBuf>,
    ) -> Result<Self> {
        match (countries, subdivisions) {
            (None, None) => Ok(ReferenceSource::Bundled),
            (Some(countries), Some(subdivisions)) => Ok(ReferenceSource::Files {
                countries,
                subdivisions,
            }),
            (Some(_), None) => Err(Error::InvalidConfig(
                "a countries file requires a subdivisions file".to_string(),
            )),
            (None, Some(_)) => Err(Error::InvalidConfig(
                "a subdivisions file requires a countries file".to_string(),
            )),
        }
    }

    /// Load the reference data from this source.
    pub fn load(&self) -> Result<ReferenceData> {
        match self {
            ReferenceSource::Bundled => ReferenceData::bundled().cloned(),
            ReferenceSource::Files {
                countries,
                subdivisions,
            } => ReferenceData::from_files(countries, subdivisions),
        }
    }

    /// Get a short description for logging.
    pub fn describe(&self) -> String {
        match self {
            ReferenceSource::Bundled => "bundled ISO 3166 data".to_string(),
            ReferenceSource::Files {
                countries,
                subdivisions,
            } => format!("{} and {}", countries.display(), subdivisions.display()),
        }
    }
}
