//! End-to-end validation against the bundled ISO 3166 data.

use geofeed_tools::{DiagnosticKind, Error, ReferenceData, Validator, Verdict};
use std::io::Write;
use tempfile::NamedTempFile;

fn validator() -> Validator {
    Validator::from_data(ReferenceData::bundled().unwrap())
}

fn feed_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_valid_single_record() {
    let file = feed_file("203.0.113.0/24,US,US-CA,Los Angeles,90001\n");
    let report = validator().validate_path(file.path()).unwrap();

    assert_eq!(report.verdict(), Verdict::Valid);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_unknown_country() {
    let file = feed_file("203.0.113.0/24,ZZ,,,\n");
    let report = validator().validate_path(file.path()).unwrap();

    let messages: Vec<String> = report.diagnostics.iter().map(|d| d.to_string()).collect();
    assert_eq!(messages, vec!["Line 1: invalid country code (ZZ)"]);
}

#[test]
fn test_invalid_prefix_and_subdivision() {
    let file = feed_file("not-a-prefix,US,US-XX,City,00000\n");
    let report = validator().validate_path(file.path()).unwrap();

    let messages: Vec<String> = report.diagnostics.iter().map(|d| d.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "Line 1: invalid prefix format (not-a-prefix)",
            "Line 1: invalid subdivision code (US-XX) for country (US)",
        ]
    );
    assert_eq!(report.verdict(), Verdict::Invalid);
}

#[test]
fn test_broken_quoting() {
    let file = feed_file(
        "203.0.113.0/24,US,,Cit\"y,90001\n\
         203.0.113.0/24,US,,City,\"90001\n\
         203.0.113.0/24,US,,\"City\"x,90001\n\
         203.0.113.0/24,US,,\"Los Angeles\",90001\n",
    );
    let report = validator().validate_path(file.path()).unwrap();

    let messages: Vec<String> = report.diagnostics.iter().map(|d| d.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "Line 1: invalid geofeed format",
            "Line 2: invalid geofeed format",
            "Line 3: invalid geofeed format",
        ]
    );
    assert_eq!(report.close_warning, None);
}

#[test]
fn test_blank_and_comment_lines() {
    let file = feed_file("\n# comment\n198.51.100.0/24,CA,CA-ON,Toronto,M5H\n");
    let report = validator().validate_path(file.path()).unwrap();

    assert!(report.is_valid());
    assert_eq!(report.lines_read, 3);
    assert_eq!(report.lines_skipped, 2);
    assert_eq!(report.records_checked, 1);
}

#[test]
fn test_line_numbers_count_skipped_lines() {
    let file = feed_file("\n# comment\n198.51.100.0/24,CA,CA-XX,Toronto,M5H\n");
    let report = validator().validate_path(file.path()).unwrap();

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].line_number, 3);
}

#[test]
fn test_nonexistent_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = validator().validate_path(&dir.path().join("geofeed.csv"));

    assert!(matches!(result, Err(Error::Open { .. })));
}

#[test]
fn test_country_without_subdivisions() {
    // Hong Kong has no ISO 3166-2 subdivisions
    let file = feed_file("2001:db8::/32,HK,HK-01,Hong Kong,\n2001:db8:1::/48,HK,,Hong Kong,\n");
    let report = validator().validate_path(file.path()).unwrap();

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].kind,
        DiagnosticKind::NoSubdivisions {
            country: "HK".to_string()
        }
    );
}

#[test]
fn test_mixed_feed() {
    let feed = "\
# RFC 8805 sample
192.0.2.0/24,US,US-WA,Seattle,98101
2001:db8::/32,GB,GB-ENG,London,
198.51.100.0/24,DE,DE-BE,Berlin,10115
203.0.113.0/24,FR
203.0.113.0/24,XX,,,
203.0.113.0/33,JP,JP-13,Tokyo,100-0001
";
    let file = feed_file(feed);
    let report = validator().validate_path(file.path()).unwrap();

    let messages: Vec<String> = report.diagnostics.iter().map(|d| d.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "Line 5: invalid geofeed format",
            "Line 6: invalid country code (XX)",
            "Line 7: invalid prefix format (203.0.113.0/33)",
        ]
    );
}

#[test]
fn test_validation_is_idempotent() {
    let file = feed_file("not-a-prefix,ZZ,,,\n203.0.113.0/24,US,US-XX,,\n\nshort,line\n");
    let validator = validator();

    let first = validator.validate_path(file.path()).unwrap();
    let second = validator.validate_path(file.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.diagnostics.len(), 4);
}

#[test]
fn test_large_feed_streams() {
    let mut file = NamedTempFile::new().unwrap();
    for i in 0..20_000u32 {
        let [_, _, b, c] = i.to_be_bytes();
        writeln!(file, "10.{}.{}.0/24,US,US-NY,New York,10001", b, c).unwrap();
    }
    writeln!(file, "10.255.255.0/24,US,US-ZZ,,").unwrap();
    file.flush().unwrap();

    let report = validator().validate_path(file.path()).unwrap();

    assert_eq!(report.lines_read, 20_001);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].line_number, 20_001);
}
