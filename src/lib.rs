//! geofeed-tools - Validation of RFC 8805 geofeed files.
//!
//! A geofeed is a CSV file mapping IP prefixes to locations. Each record has
//! at least five fields: `prefix, country_code, subdivision_code, city,
//! postal_code`. This crate checks every record against the ISO 3166-1
//! country list and the ISO 3166-2 subdivision list, and checks that the
//! prefix is valid CIDR notation.
//!
//! # Features
//!
//! - **Bundled reference data**: ISO 3166-1 and ISO 3166-2 tables compiled in
//! - **Streaming**: files are read line by line, so size does not matter
//! - **Structured diagnostics**: every finding carries a line number and kind
//! - **IPv4 and IPv6**: both CIDR forms are accepted
//!
//! # Quick Start
//!
//! ```
//! use geofeed_tools::{ReferenceData, Validator};
//!
//! let validator = Validator::from_data(ReferenceData::bundled().unwrap());
//!
//! let feed = "\
//! 203.0.113.0/24,US,US-CA,Los Angeles,90001
//! not-a-prefix,ZZ,,,
//! ";
//!
//! let report = validator.validate_reader(feed.as_bytes()).unwrap();
//! assert!(!report.is_valid());
//! for diagnostic in &report.diagnostics {
//!     println!("{}", diagnostic);
//! }
//! ```
//!
//! # Checks
//!
//! Lines are checked in this order:
//! 1. Blank lines and `#` comments are skipped
//! 2. Records with fewer than five fields are rejected
//! 3. The prefix must be CIDR notation (reported, but checking continues)
//! 4. A non-empty country code must be a known ISO 3166-1 code
//! 5. A non-empty subdivision code must belong to that country

mod config;
mod diagnostic;
mod error;

pub mod feed;
pub mod output;
pub mod reference;

// Re-export core types
pub use config::ReferenceSource;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{Dataset, Error, Result};

// Re-export validation API
pub use feed::{classify_line, validate_path, validate_reader, ValidationReport, Validator, Verdict};

// Re-export reference data types
pub use reference::{
    build_country_set, build_subdivision_index, Country, CountrySet, ReferenceData,
    ReferenceIndex, Subdivision, SubdivisionIndex, SubdivisionsByCountry,
};

// Re-export presentation
pub use output::Renderer;
