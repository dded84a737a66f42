use std::fs::{self, File};
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, error, info};

use crate::builder::collect;
use crate::builder::remap;
use crate::core::error::Result;
use crate::postings;

/// Merge phase: concatenate the sidecars, build and write the global term
/// list, remap every batch's postings to global ids, then concatenate the
/// batch postings behind a fresh header. Returns the global term count.
///
/// Runs on the dispatcher thread, after every worker has joined.
pub fn merge(prefix: &Path, document_count: u32, batch_count: usize) -> Result<usize> {
    info!("merging document ids");
    concat_sidecar(prefix, batch_count, ".documents").map_err(|e| {
        error!("[merge] documents sidecar: {}", e);
        e
    })?;
    info!("merging urls");
    concat_sidecar(prefix, batch_count, ".urls").map_err(|e| {
        error!("[merge] urls sidecar: {}", e);
        e
    })?;

    let terms = collect::collect_terms(prefix, batch_count).map_err(|e| {
        error!("[merge] term collection: {}", e);
        e
    })?;
    let term_count = terms.len();

    info!("writing {} terms", term_count);
    write_terms_file(prefix, &terms).map_err(|e| {
        error!("[merge] terms file: {}", e);
        e
    })?;

    info!("mapping terms");
    let term_mapping = remap::reverse_mapping(terms);

    info!("remapping ids");
    for batch in 0..batch_count {
        debug!("[remap] batch {}/{}", batch, batch_count);
        let basename = postings::batch_file_name(prefix, batch);
        let result = remap::batch_mapping(
            &postings::with_suffix(&basename, ".terms"),
            &term_mapping,
        )
        .and_then(|table| remap::rewrite_postings(&basename, &table));
        result.map_err(|e| {
            error!("[remap] batch {}: {}", batch, e);
            e
        })?;
    }
    drop(term_mapping);

    info!("concatenating {} batches", batch_count);
    concat_postings(prefix, document_count, batch_count).map_err(|e| {
        error!("[concat] {}", e);
        e
    })?;

    Ok(term_count)
}

/// Remove the four scratch files of every batch
pub fn remove_batches(prefix: &Path, batch_count: usize) -> Result<()> {
    for batch in 0..batch_count {
        debug!("[cleanup] batch {}/{}", batch, batch_count);
        let basename = postings::batch_file_name(prefix, batch);
        fs::remove_file(postings::with_suffix(&basename, ".documents"))?;
        fs::remove_file(postings::with_suffix(&basename, ".urls"))?;
        fs::remove_file(postings::with_suffix(&basename, ".terms"))?;
        fs::remove_file(&basename)?;
    }
    Ok(())
}

/// Byte-concatenate one sidecar across batches, in batch-number order
fn concat_sidecar(prefix: &Path, batch_count: usize, suffix: &str) -> Result<()> {
    let mut out = BufWriter::new(File::create(postings::with_suffix(prefix, suffix))?);
    for batch in 0..batch_count {
        debug!("[merge] {} batch {}/{}", suffix, batch, batch_count);
        let path = postings::with_suffix(&postings::batch_file_name(prefix, batch), suffix);
        let mut input = File::open(&path)?;
        io::copy(&mut input, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

/// One term per line, in global-id order
fn write_terms_file(prefix: &Path, terms: &[String]) -> Result<()> {
    let mut out = BufWriter::new(File::create(postings::with_suffix(prefix, ".terms"))?);
    for term in terms {
        writeln!(out, "{}", term)?;
    }
    out.flush()?;
    Ok(())
}

/// Fresh header carrying the document count, then every batch's postings
/// minus its own 8-byte header, in batch-number order
fn concat_postings(prefix: &Path, document_count: u32, batch_count: usize) -> Result<()> {
    let mut out = BufWriter::new(File::create(prefix)?);
    postings::write_header(&mut out, document_count)?;
    for batch in 0..batch_count {
        debug!("[concat] batch {}/{}", batch, batch_count);
        let mut input = File::open(postings::batch_file_name(prefix, batch))?;
        input.seek(SeekFrom::Start(8))?;
        io::copy(&mut input, &mut out)?;
    }
    out.flush()?;
    Ok(())
}
