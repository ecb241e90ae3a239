//! Parsing of the advisory checksum table.
//!
//! The table maps source filenames to content checksums so external callers
//! can decide whether a file needs re-parsing. It is advisory metadata, not
//! structure: a malformed record is skipped, never a load failure.

use std::collections::HashMap;

use tracing::warn;

/// Parse the contents of a checksum table.
///
/// One record per line, `<filename><whitespace><checksum>`, with arbitrary
/// surrounding whitespace. Records missing either field are skipped.
pub fn parse_checksums(contents: &str) -> HashMap<String, String> {
    let mut table = HashMap::new();
    for (lineno, line) in contents.lines().enumerate() {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(filename), Some(checksum)) => {
                table.insert(filename.to_string(), checksum.to_string());
            }
            // Blank lines are not records.
            (None, _) => {}
            _ => {
                warn!(line = lineno + 1, "skipping malformed checksum record");
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_with_surrounding_whitespace() {
        let table = parse_checksums("file1 CHECKSUM1\n  file2 CHECKSUM2 \n");
        assert_eq!(table.len(), 2);
        assert_eq!(table["file1"], "CHECKSUM1");
        assert_eq!(table["file2"], "CHECKSUM2");
    }

    #[test]
    fn tab_separated_record() {
        let table = parse_checksums("lib/parser.rs\tabc123\n");
        assert_eq!(table["lib/parser.rs"], "abc123");
    }

    #[test]
    fn malformed_record_is_skipped() {
        let table = parse_checksums("orphan\nfile1 CHECKSUM1\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table["file1"], "CHECKSUM1");
    }

    #[test]
    fn blank_lines_are_ignored() {
        let table = parse_checksums("\n\nfile1 CHECKSUM1\n\n");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn empty_contents_yield_empty_table() {
        assert!(parse_checksums("").is_empty());
    }

    #[test]
    fn later_record_wins_for_duplicate_filename() {
        let table = parse_checksums("file1 OLD\nfile1 NEW\n");
        assert_eq!(table["file1"], "NEW");
    }
}
