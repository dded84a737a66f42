//! Length-prefixed binary postings format.
//!
//! A postings file is a sequence of records, each a little-endian u32
//! count `n` followed by `n` little-endian u32 values. The first record of
//! a file is a header whose single payload value is the document count;
//! every following record is one document's term-id sequence.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use crate::core::error::{Error, ErrorKind, Result};

/// Write one length-prefixed record
pub fn write_record<W: Write>(out: &mut W, ids: &[u32]) -> Result<()> {
    let len = ids.len() as u32;
    out.write_all(&len.to_le_bytes())?;
    for &id in ids {
        out.write_all(&id.to_le_bytes())?;
    }
    Ok(())
}

/// Header record: a single payload value holding the document count
pub fn write_header<W: Write>(out: &mut W, document_count: u32) -> Result<()> {
    write_record(out, &[document_count])
}

/// Scratch postings file name for one batch
pub fn batch_file_name(prefix: &Path, batch_number: usize) -> PathBuf {
    PathBuf::from(format!("{}.batch.{}", prefix.display(), batch_number))
}

/// Sidecar file name: base path plus a literal suffix
pub fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", base.display(), suffix))
}

/// Streaming reader over length-prefixed postings records
pub struct PostingsReader<R> {
    input: R,
}

impl PostingsReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(PostingsReader {
            input: BufReader::new(file),
        })
    }
}

impl<R: Read> PostingsReader<R> {
    pub fn new(input: R) -> Self {
        PostingsReader { input }
    }

    /// Next record, or `None` at a clean end of stream
    pub fn next_record(&mut self) -> Result<Option<Vec<u32>>> {
        let mut len_buf = [0u8; 4];
        match self.input.read_exact(&mut len_buf) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        }
        let len = u32::from_le_bytes(len_buf) as usize;

        let mut payload = vec![0u8; len * 4];
        self.input.read_exact(&mut payload).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                Error::new(ErrorKind::Parse, "truncated postings record".to_string())
            } else {
                e.into()
            }
        })?;

        let ids = payload
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok(Some(ids))
    }

    /// Read the leading header record and return its document count
    pub fn read_header(&mut self) -> Result<u32> {
        match self.next_record()? {
            Some(record) if record.len() == 1 => Ok(record[0]),
            Some(record) => Err(Error::new(
                ErrorKind::Parse,
                format!("header record must hold one value, found {}", record.len()),
            )),
            None => Err(Error::new(
                ErrorKind::Parse,
                "postings file is missing its header".to_string(),
            )),
        }
    }
}
