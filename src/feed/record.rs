//! RFC 8805 geofeed records.

use csv::{ReaderBuilder, StringRecord};
use ipnet::IpNet;

/// Minimum number of fields in a geofeed record.
pub const MIN_FIELDS: usize = 5;

/// One parsed geofeed line.
///
/// Field order is `prefix, country_code, subdivision_code, city, postal_code`.
/// Extra trailing fields are allowed and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeofeedRecord {
    pub prefix: String,
    pub country_code: String,
    pub subdivision_code: String,
    pub city: String,
    pub postal_code: String,
}

impl GeofeedRecord {
    /// Parse one line as a geofeed record.
    ///
    /// Returns `None` if the line has fewer than five fields.
    pub fn parse(line: &str) -> Option<Self> {
        let fields = parse_fields(line);
        if fields.len() < MIN_FIELDS {
            return None;
        }

        Some(Self {
            prefix: fields[0].to_string(),
            country_code: fields[1].to_string(),
            subdivision_code: fields[2].to_string(),
            city: fields[3].to_string(),
            postal_code: fields[4].to_string(),
        })
    }

    /// Check whether the prefix is valid CIDR notation.
    pub fn has_valid_prefix(&self) -> bool {
        is_valid_cidr(&self.prefix)
    }
}

/// Split a single line into CSV fields.
///
/// Quoting is strict: a `"` inside an unquoted field, text after a closing
/// quote, or a quote that never closes ends the record. Only the fields
/// completed before that point are kept. Parse errors are not reported
/// otherwise; a line that cannot be read yields an empty record.
pub fn parse_fields(line: &str) -> StringRecord {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => {}
        Ok(false) | Err(_) => return StringRecord::new(),
    }

    if let Some(complete) = fields_before_quote_error(line) {
        record.truncate(complete);
    }
    record
}

/// Find the first quoting error in a line.
///
/// Returns the number of fields completed before the error, or `None` if
/// the quoting is well formed. A doubled `""` inside a quoted field is a
/// literal quote.
fn fields_before_quote_error(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut pos = 0;
    let mut field = 0;

    'fields: loop {
        if bytes.get(pos) == Some(&b'"') {
            pos += 1;
            loop {
                match bytes.get(pos) {
                    // Quote never closes
                    None => return Some(field),
                    Some(b'"') => match bytes.get(pos + 1) {
                        Some(b'"') => pos += 2,
                        Some(b',') => {
                            pos += 2;
                            field += 1;
                            continue 'fields;
                        }
                        None => return None,
                        // Text after the closing quote
                        Some(_) => return Some(field),
                    },
                    Some(_) => pos += 1,
                }
            }
        }

        let rest = &bytes[pos..];
        match rest.iter().position(|&b| b == b',' || b == b'"') {
            None => return None,
            // Bare quote in an unquoted field
            Some(offset) if rest[offset] == b'"' => return Some(field),
            Some(offset) => {
                pos += offset + 1;
                field += 1;
            }
        }
    }
}

/// Check whether `prefix` is an IPv4 or IPv6 network in CIDR notation.
///
/// Host bits may be set (`192.0.2.1/24` is accepted); a bare address without
/// a prefix length is not.
pub fn is_valid_cidr(prefix: &str) -> bool {
    prefix.parse::<IpNet>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let record = GeofeedRecord::parse("203.0.113.0/24,US,US-CA,Los Angeles,90001").unwrap();
        assert_eq!(record.prefix, "203.0.113.0/24");
        assert_eq!(record.country_code, "US");
        assert_eq!(record.subdivision_code, "US-CA");
        assert_eq!(record.city, "Los Angeles");
        assert_eq!(record.postal_code, "90001");
        assert!(record.has_valid_prefix());
    }

    #[test]
    fn test_parse_empty_fields() {
        let record = GeofeedRecord::parse("203.0.113.0/24,ZZ,,,").unwrap();
        assert_eq!(record.country_code, "ZZ");
        assert_eq!(record.subdivision_code, "");
        assert_eq!(record.postal_code, "");
    }

    #[test]
    fn test_parse_extra_fields() {
        let record = GeofeedRecord::parse("2001:db8::/32,DE,DE-BE,Berlin,10115,extra").unwrap();
        assert_eq!(record.country_code, "DE");
        assert_eq!(record.postal_code, "10115");
    }

    #[test]
    fn test_parse_too_few_fields() {
        assert!(GeofeedRecord::parse("203.0.113.0/24,US,US-CA,Los Angeles").is_none());
        assert!(GeofeedRecord::parse("203.0.113.0/24").is_none());
        assert!(GeofeedRecord::parse("").is_none());
    }

    #[test]
    fn test_parse_quoted_fields() {
        let record =
            GeofeedRecord::parse("192.0.2.0/24,US,US-DC,\"Washington, D.C.\",20001").unwrap();
        assert_eq!(record.city, "Washington, D.C.");
        assert_eq!(record.postal_code, "20001");

        // A quoted comma does not count as a separator
        assert!(GeofeedRecord::parse("\"192.0.2.0/24,US,US-DC,City\",20001").is_none());
    }

    #[test]
    fn test_bare_quote_ends_record() {
        assert_eq!(parse_fields("203.0.113.0/24,US,,Cit\"y,90001").len(), 3);
        assert!(GeofeedRecord::parse("203.0.113.0/24,US,,Cit\"y,90001").is_none());
    }

    #[test]
    fn test_unterminated_quote_ends_record() {
        assert_eq!(parse_fields("203.0.113.0/24,US,,City,\"90001").len(), 4);
        assert!(GeofeedRecord::parse("203.0.113.0/24,US,,City,\"90001").is_none());
    }

    #[test]
    fn test_text_after_closing_quote_ends_record() {
        assert_eq!(parse_fields("203.0.113.0/24,US,,\"City\"x,90001").len(), 3);
        assert!(GeofeedRecord::parse("203.0.113.0/24,US,,\"City\"x,90001").is_none());
    }

    #[test]
    fn test_quote_error_after_fifth_field_keeps_record() {
        let fields = parse_fields("203.0.113.0/24,US,US-CA,City,90001,ex\"tra,more");
        assert_eq!(fields.len(), 5);
        assert_eq!(&fields[4], "90001");
    }

    #[test]
    fn test_well_formed_quoting() {
        assert_eq!(fields_before_quote_error("a,\"b\"\"c\",\"d,e\",f"), None);
        assert_eq!(fields_before_quote_error("a,b,\"\""), None);
        assert_eq!(fields_before_quote_error("\"a\","), None);
        assert_eq!(fields_before_quote_error(""), None);

        let record =
            GeofeedRecord::parse("192.0.2.0/24,US,US-DC,\"The \"\"District\"\"\",20001").unwrap();
        assert_eq!(record.city, "The \"District\"");
    }

    #[test]
    fn test_fields_are_not_trimmed() {
        let record = GeofeedRecord::parse(" 192.0.2.0/24,US,,,").unwrap();
        assert_eq!(record.prefix, " 192.0.2.0/24");
        assert!(!record.has_valid_prefix());
    }

    #[test]
    fn test_valid_cidr() {
        assert!(is_valid_cidr("203.0.113.0/24"));
        assert!(is_valid_cidr("10.0.0.0/8"));
        assert!(is_valid_cidr("192.0.2.1/32"));
        assert!(is_valid_cidr("192.0.2.1/24")); // Host bits set
        assert!(is_valid_cidr("0.0.0.0/0"));
        assert!(is_valid_cidr("2001:db8::/32"));
        assert!(is_valid_cidr("::1/128"));
        assert!(is_valid_cidr("::/0"));
    }

    #[test]
    fn test_invalid_cidr() {
        assert!(!is_valid_cidr("not-a-prefix"));
        assert!(!is_valid_cidr(""));
        assert!(!is_valid_cidr("203.0.113.0")); // No prefix length
        assert!(!is_valid_cidr("203.0.113.0/33"));
        assert!(!is_valid_cidr("2001:db8::/129"));
        assert!(!is_valid_cidr("256.0.0.0/8"));
        assert!(!is_valid_cidr("203.0.113.0/"));
        assert!(!is_valid_cidr("example.com/24"));
    }
}
