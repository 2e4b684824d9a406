//! Geofeed parsing and validation.

mod classify;
mod record;
mod validator;

pub use classify::{classify_line, is_skippable};
pub use record::{is_valid_cidr, parse_fields, GeofeedRecord, MIN_FIELDS};
pub use validator::{validate_path, validate_reader, ValidationReport, Validator, Verdict};
