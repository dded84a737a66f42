use std::io::BufRead;

use crate::core::error::Result;
use crate::corpus::record::DocumentRecord;

/// Record source: pulls the next valid document record from an input
/// stream. `Ok(None)` signals end of stream. The builder calls this from a
/// single thread, one record at a time.
pub trait RecordReader: Send + Sync {
    fn next_record(&self, input: &mut dyn BufRead) -> Result<Option<DocumentRecord>>;

    fn name(&self) -> &str;
}

/// One document per line: the first whitespace-delimited token is the
/// trec-id, the rest of the line is the content. Urls stay empty.
pub struct PlaintextReader;

impl RecordReader for PlaintextReader {
    fn next_record(&self, input: &mut dyn BufRead) -> Result<Option<DocumentRecord>> {
        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let rest = line.trim_end_matches(['\r', '\n']).trim_start();
            if rest.is_empty() {
                continue; // Skip blank lines
            }

            let (trecid, content) = match rest.split_once(char::is_whitespace) {
                Some((trecid, content)) => (trecid, content),
                None => (rest, ""),
            };
            return Ok(Some(DocumentRecord::new(
                trecid.to_string(),
                content.to_string(),
            )));
        }
    }

    fn name(&self) -> &str {
        "plaintext"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(input: &str) -> Vec<DocumentRecord> {
        let reader = PlaintextReader;
        let mut cursor = Cursor::new(input.as_bytes());
        let mut records = Vec::new();
        while let Some(record) = reader.next_record(&mut cursor).unwrap() {
            records.push(record);
        }
        records
    }

    #[test]
    fn test_one_record_per_line() {
        let records = read_all("d1 a b a\nd2 b c\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].trecid, "d1");
        assert_eq!(records[0].content, "a b a");
        assert_eq!(records[1].trecid, "d2");
        assert_eq!(records[1].content, "b c");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let records = read_all("\nd1 x\n   \nd2 y\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].trecid, "d1");
        assert_eq!(records[1].trecid, "d2");
    }

    #[test]
    fn test_id_without_content() {
        let records = read_all("d1\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].trecid, "d1");
        assert_eq!(records[0].content, "");
    }

    #[test]
    fn test_missing_trailing_newline() {
        let records = read_all("d1 hello world");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, "hello world");
    }

    #[test]
    fn test_urls_left_empty() {
        let records = read_all("d1 x\n");
        assert_eq!(records[0].url, "");
    }
}
