//! ISO 3166 reference data.
//!
//! The country list (ISO 3166-1) and the subdivision table (ISO 3166-2) are
//! bundled into the crate as JSON and parsed on first use. Alternative
//! datasets with the same shape can be loaded from disk.

mod index;

pub use index::{
    build_country_set, build_subdivision_index, CountrySet, ReferenceIndex, SubdivisionIndex,
};

use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Dataset, Error, Result};

/// Bundled ISO 3166-1 country list.
static BUNDLED_COUNTRIES: &str = include_str!("../../data/iso3166-1.json");

/// Bundled ISO 3166-2 subdivisions, keyed by country code.
static BUNDLED_SUBDIVISIONS: &str = include_str!("../../data/iso3166-2.json");

/// Parsed bundled data, shared by every caller in the process.
static BUNDLED: OnceCell<ReferenceData> = OnceCell::new();

/// A country from the ISO 3166-1 list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    pub name: String,
    /// Two-letter alpha-2 code, e.g. `US`
    pub code: String,
}

/// A subdivision from the ISO 3166-2 list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subdivision {
    pub name: String,
    /// Full subdivision code including the country prefix, e.g. `US-CA`
    pub code: String,
}

/// Subdivisions grouped by their parent country code.
pub type SubdivisionsByCountry = HashMap<String, Vec<Subdivision>>;

/// Raw reference datasets as loaded from JSON.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub countries: Vec<Country>,
    pub subdivisions: SubdivisionsByCountry,
}

impl ReferenceData {
    /// Create reference data from already-built collections.
    pub fn new(countries: Vec<Country>, subdivisions: SubdivisionsByCountry) -> Self {
        Self {
            countries,
            subdivisions,
        }
    }

    /// Parse reference data from JSON text.
    ///
    /// `countries_json` is an array of `{name, code}` objects and
    /// `subdivisions_json` maps country codes to arrays of `{name, code}`.
    pub fn from_json(countries_json: &str, subdivisions_json: &str) -> Result<Self> {
        let countries: Vec<Country> =
            serde_json::from_str(countries_json).map_err(|source| Error::ReferenceParse {
                dataset: Dataset::Countries,
                source,
            })?;
        let subdivisions: SubdivisionsByCountry = serde_json::from_str(subdivisions_json)
            .map_err(|source| Error::ReferenceParse {
                dataset: Dataset::Subdivisions,
                source,
            })?;

        log::debug!(
            "Loaded {} countries and {} subdivision groups",
            countries.len(),
            subdivisions.len()
        );

        Ok(Self::new(countries, subdivisions))
    }

    /// Load reference data from two JSON files on disk.
    pub fn from_files(countries_path: &Path, subdivisions_path: &Path) -> Result<Self> {
        let countries_json =
            fs::read_to_string(countries_path).map_err(|source| Error::ReferenceRead {
                dataset: Dataset::Countries,
                path: countries_path.to_path_buf(),
                source,
            })?;
        let subdivisions_json =
            fs::read_to_string(subdivisions_path).map_err(|source| Error::ReferenceRead {
                dataset: Dataset::Subdivisions,
                path: subdivisions_path.to_path_buf(),
                source,
            })?;

        Self::from_json(&countries_json, &subdivisions_json)
    }

    /// Get the reference data bundled with the crate.
    ///
    /// The JSON is parsed once per process; later calls return the same data.
    pub fn bundled() -> Result<&'static ReferenceData> {
        BUNDLED.get_or_try_init(|| Self::from_json(BUNDLED_COUNTRIES, BUNDLED_SUBDIVISIONS))
    }
}
