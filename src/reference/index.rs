//! O(1) lookup structures built from the reference data.

use ahash::{AHashMap, AHashSet};

use super::{Country, ReferenceData, SubdivisionsByCountry};

/// Set of valid ISO 3166-1 alpha-2 country codes.
#[derive(Debug, Clone, Default)]
pub struct CountrySet {
    codes: AHashSet<String>,
}

impl CountrySet {
    /// Check if a country code is known. Matching is exact.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Get the number of country codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CountrySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Valid ISO 3166-2 subdivision codes, keyed by country code.
///
/// A country without an entry has no known subdivisions.
#[derive(Debug, Clone, Default)]
pub struct SubdivisionIndex {
    by_country: AHashMap<String, AHashSet<String>>,
}

impl SubdivisionIndex {
    /// Get the subdivision codes for a country, if it has any.
    pub fn get(&self, country: &str) -> Option<&AHashSet<String>> {
        self.by_country.get(country)
    }

    /// Get the number of countries in the index.
    pub fn country_count(&self) -> usize {
        self.by_country.len()
    }
}

/// Build the set of valid country codes. Duplicate codes collapse.
pub fn build_country_set(countries: &[Country]) -> CountrySet {
    countries.iter().map(|c| c.code.as_str()).collect()
}

/// Build the subdivision index.
///
/// Countries whose subdivision list is empty get no entry, so they look the
/// same as countries that are missing from the table altogether.
pub fn build_subdivision_index(subdivisions: &SubdivisionsByCountry) -> SubdivisionIndex {
    let by_country = subdivisions
        .iter()
        .filter(|(_, subs)| !subs.is_empty())
        .map(|(country, subs)| {
            let codes = subs.iter().map(|s| s.code.clone()).collect();
            (country.clone(), codes)
        })
        .collect();

    SubdivisionIndex { by_country }
}

/// Country set and subdivision index built together from one dataset.
///
/// Built once before validation starts and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    pub countries: CountrySet,
    pub subdivisions: SubdivisionIndex,
}

impl ReferenceIndex {
    /// Build both lookup structures from the reference data.
    pub fn build(data: &ReferenceData) -> Self {
        let index = Self {
            countries: build_country_set(&data.countries),
            subdivisions: build_subdivision_index(&data.subdivisions),
        };

        log::debug!(
            "Built reference index: {} countries, {} with subdivisions",
            index.countries.len(),
            index.subdivisions.country_count()
        );

        index
    }
}
