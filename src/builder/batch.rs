use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::analysis::normalizer::TermNormalizer;
use crate::analysis::tokenizer::ContentTokenizer;
use crate::core::error::{Error, Result};
use crate::core::types::DocId;
use crate::corpus::record::DocumentRecord;
use crate::postings;

/// One dispatch unit: a block of records plus its position in the corpus.
///
/// Concatenating batches in ascending `batch_number` reproduces the source
/// record order; `first_document` is the ordinal of `records[0]`.
pub struct Batch {
    pub batch_number: usize,
    pub records: Vec<DocumentRecord>,
    pub first_document: DocId,
}

/// Process one batch: emit the postings, documents, urls and terms scratch
/// files under the output prefix, using batch-local term ids.
///
/// The local dictionary assigns ids in insertion order; the terms sidecar
/// is written in that same order, so the local id of a term equals its
/// zero-based line index.
pub fn run_batch(
    batch: Batch,
    prefix: &Path,
    tokenizer: &dyn ContentTokenizer,
    normalizer: &dyn TermNormalizer,
) -> Result<()> {
    let basename = postings::batch_file_name(prefix, batch.batch_number);

    let mut postings_os = BufWriter::new(File::create(&basename)?);
    let mut documents_os =
        BufWriter::new(File::create(postings::with_suffix(&basename, ".documents"))?);
    let mut urls_os = BufWriter::new(File::create(postings::with_suffix(&basename, ".urls"))?);
    let mut terms_os = BufWriter::new(File::create(postings::with_suffix(&basename, ".terms"))?);

    let record_count = batch.records.len();
    postings::write_header(&mut postings_os, record_count as u32)?;

    let mut local_ids: HashMap<String, u32> = HashMap::new();
    let mut term_ids: Vec<u32> = Vec::new();

    for record in batch.records {
        writeln!(documents_os, "{}", record.trecid)?;
        writeln!(urls_os, "{}", record.url)?;

        term_ids.clear();
        let mut write_err: Option<Error> = None;
        tokenizer.process(record.content, &mut |term| {
            if write_err.is_some() {
                return;
            }
            let term = normalizer.normalize(term);
            let id = match local_ids.get(&term) {
                Some(&id) => id,
                None => {
                    let id = local_ids.len() as u32;
                    if let Err(e) = writeln!(terms_os, "{}", term) {
                        write_err = Some(e.into());
                        return;
                    }
                    local_ids.insert(term, id);
                    id
                }
            };
            term_ids.push(id);
        });
        if let Some(e) = write_err {
            return Err(e);
        }

        postings::write_record(&mut postings_os, &term_ids)?;
    }

    // BufWriter drops swallow errors; flush so failures surface here
    postings_os.flush()?;
    documents_os.flush()?;
    urls_os.flush()?;
    terms_os.flush()?;

    info!(
        "[batch {}] processed documents [{}, {})",
        batch.batch_number,
        batch.first_document.value(),
        batch.first_document.value() + record_count as u32
    );
    Ok(())
}
