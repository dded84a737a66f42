use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::TermId;

/// Term -> global id, consuming the sorted global term vector
pub fn reverse_mapping(terms: Vec<String>) -> HashMap<String, TermId> {
    let mut mapping = HashMap::with_capacity(terms.len());
    for (id, term) in terms.into_iter().enumerate() {
        mapping.insert(term, TermId(id as u32));
    }
    mapping
}

/// Local-id -> global-id table for one batch, from its terms sidecar.
///
/// Every batch term must be present in the global mapping; a miss is an
/// invariant violation, not an input condition.
pub fn batch_mapping(
    batch_terms_path: &Path,
    term_mapping: &HashMap<String, TermId>,
) -> Result<Vec<u32>> {
    let reader = BufReader::new(File::open(batch_terms_path)?);
    let mut table = Vec::new();
    for line in reader.lines() {
        let term = line?;
        let id = term_mapping.get(&term).ok_or_else(|| {
            Error::new(
                ErrorKind::Internal,
                format!("batch term {:?} missing from the global dictionary", term),
            )
        })?;
        table.push(id.value());
    }
    Ok(table)
}

/// Rewrite a batch postings file in place, replacing every local term id
/// with its global image. The byte layout is unchanged; only id values in
/// the body records are rewritten. The header record is left alone.
pub fn rewrite_postings(path: &Path, table: &[u32]) -> Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;

    // Skip the header: 4-byte length field plus one 4-byte payload value
    file.seek(SeekFrom::Start(8))?;

    let mut len_buf = [0u8; 4];
    loop {
        match file.read_exact(&mut len_buf) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        }
        let len = u32::from_le_bytes(len_buf) as usize;
        if len == 0 {
            continue;
        }

        let mut payload = vec![0u8; len * 4];
        file.read_exact(&mut payload)?;
        for chunk in payload.chunks_exact_mut(4) {
            let local = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as usize;
            let global = *table.get(local).ok_or_else(|| {
                Error::new(
                    ErrorKind::Internal,
                    format!("local term id {} out of range for its batch", local),
                )
            })?;
            chunk.copy_from_slice(&global.to_le_bytes());
        }
        file.seek(SeekFrom::Current(-(payload.len() as i64)))?;
        file.write_all(&payload)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postings::{self, PostingsReader};
    use std::fs;

    #[test]
    fn test_reverse_mapping_positions() {
        let mapping = reverse_mapping(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(mapping.get("a"), Some(&TermId(0)));
        assert_eq!(mapping.get("c"), Some(&TermId(2)));
        assert_eq!(mapping.get("d"), None);
    }

    #[test]
    fn test_batch_mapping_follows_line_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.terms");
        fs::write(&path, "b\nc\n").unwrap();

        let mapping = reverse_mapping(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        let table = batch_mapping(&path, &mapping).unwrap();
        assert_eq!(table, vec![1, 2]);
    }

    #[test]
    fn test_batch_mapping_missing_term_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.terms");
        fs::write(&path, "ghost\n").unwrap();

        let mapping = reverse_mapping(vec!["a".to_string()]);
        assert!(batch_mapping(&path, &mapping).is_err());
    }

    #[test]
    fn test_rewrite_preserves_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fwd.batch.0");

        let mut buf = Vec::new();
        postings::write_header(&mut buf, 2).unwrap();
        postings::write_record(&mut buf, &[0, 1, 0]).unwrap();
        postings::write_record(&mut buf, &[1]).unwrap();
        fs::write(&path, &buf).unwrap();
        let original_len = fs::metadata(&path).unwrap().len();

        rewrite_postings(&path, &[5, 9]).unwrap();

        assert_eq!(fs::metadata(&path).unwrap().len(), original_len);
        let mut reader = PostingsReader::open(&path).unwrap();
        assert_eq!(reader.read_header().unwrap(), 2); // Header untouched
        assert_eq!(reader.next_record().unwrap(), Some(vec![5, 9, 5]));
        assert_eq!(reader.next_record().unwrap(), Some(vec![9]));
    }

    #[test]
    fn test_rewrite_skips_empty_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fwd.batch.0");

        let mut buf = Vec::new();
        postings::write_header(&mut buf, 2).unwrap();
        postings::write_record(&mut buf, &[]).unwrap();
        postings::write_record(&mut buf, &[0]).unwrap();
        fs::write(&path, &buf).unwrap();

        rewrite_postings(&path, &[7]).unwrap();

        let mut reader = PostingsReader::open(&path).unwrap();
        reader.read_header().unwrap();
        assert_eq!(reader.next_record().unwrap(), Some(vec![]));
        assert_eq!(reader.next_record().unwrap(), Some(vec![7]));
    }
}
