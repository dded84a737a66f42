use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::bounded;
use log::{error, info};
use parking_lot::Mutex;

use crate::analysis::normalizer::TermNormalizer;
use crate::analysis::tokenizer::ContentTokenizer;
use crate::builder::batch::{self, Batch};
use crate::builder::merge;
use crate::core::config::BuilderConfig;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::stats::BuildStats;
use crate::core::types::DocId;
use crate::corpus::reader::RecordReader;
use crate::corpus::record::DocumentRecord;

/// Streaming, batched forward-index builder.
///
/// One thread reads the record source and cuts batches; `threads - 1`
/// workers tokenize batches into scratch files; the merge phase then folds
/// the scratch files into the final forward index. Workers share nothing
/// mutable, so the only synchronization is the batch channel and the
/// first-error slot.
pub struct ForwardIndexBuilder {
    pub config: BuilderConfig,
    pub tokenizer: Arc<dyn ContentTokenizer>,
    pub normalizer: Arc<dyn TermNormalizer>,
}

impl ForwardIndexBuilder {
    pub fn new(
        config: BuilderConfig,
        tokenizer: Arc<dyn ContentTokenizer>,
        normalizer: Arc<dyn TermNormalizer>,
    ) -> Self {
        ForwardIndexBuilder {
            config,
            tokenizer,
            normalizer,
        }
    }

    /// Drive the whole build: dispatch batches, join the workers, merge,
    /// then remove the scratch files.
    ///
    /// Fails fast on configuration errors, before any file is created. A
    /// worker or reader failure aborts the build after the in-flight
    /// batches drain; scratch files are left behind for inspection.
    pub fn build(&self, input: &mut dyn BufRead, reader: &dyn RecordReader) -> Result<BuildStats> {
        if self.config.threads < 2 {
            return Err(Error::new(
                ErrorKind::Config,
                format!(
                    "building a forward index needs at least 2 threads, got {}",
                    self.config.threads
                ),
            ));
        }
        if self.config.batch_size == 0 {
            return Err(Error::new(
                ErrorKind::Config,
                "batch_size must be positive".to_string(),
            ));
        }

        let workers = self.config.threads - 1;
        let prefix = self.config.output_prefix.as_path();
        let batch_size = self.config.batch_size;

        // Queued batches are capped at `workers`; together with the batches
        // in execution this bounds in-flight batches to 2 * (threads - 1)
        let (batch_tx, batch_rx) = bounded::<Batch>(workers);
        let failed = AtomicBool::new(false);
        let first_error: Mutex<Option<Error>> = Mutex::new(None);

        let mut batch_number = 0usize;
        let mut first_document = 0u32;

        thread::scope(|scope| {
            for _ in 0..workers {
                let batch_rx = batch_rx.clone();
                let tokenizer = self.tokenizer.as_ref();
                let normalizer = self.normalizer.as_ref();
                let failed = &failed;
                let first_error = &first_error;
                scope.spawn(move || {
                    while let Ok(b) = batch_rx.recv() {
                        if failed.load(Ordering::Relaxed) {
                            continue; // Drain without processing after a failure
                        }
                        let number = b.batch_number;
                        if let Err(e) = batch::run_batch(b, prefix, tokenizer, normalizer) {
                            error!("[tokenize] batch {}: {}", number, e);
                            let mut slot = first_error.lock();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            failed.store(true, Ordering::Relaxed);
                        }
                    }
                });
            }

            let submit = |records: Vec<DocumentRecord>, number: usize, first: u32| {
                let batch = Batch {
                    batch_number: number,
                    records,
                    first_document: DocId(first),
                };
                if batch_tx.send(batch).is_err() {
                    // Unreachable while a receiver lives; recorded, not dropped
                    let mut slot = first_error.lock();
                    if slot.is_none() {
                        *slot = Some(Error::new(
                            ErrorKind::Internal,
                            "batch channel disconnected".to_string(),
                        ));
                    }
                    failed.store(true, Ordering::Relaxed);
                }
            };

            let mut records: Vec<DocumentRecord> = Vec::new();
            loop {
                if failed.load(Ordering::Relaxed) {
                    break; // A worker failed; stop feeding the pipeline
                }
                match reader.next_record(input) {
                    Ok(Some(record)) => {
                        records.push(record);
                        if records.len() == batch_size {
                            submit(
                                std::mem::take(&mut records),
                                batch_number,
                                first_document,
                            );
                            batch_number += 1;
                            first_document += batch_size as u32;
                        }
                    }
                    Ok(None) => {
                        // The final batch may be short, never empty
                        if !records.is_empty() {
                            let len = records.len();
                            submit(std::mem::take(&mut records), batch_number, first_document);
                            batch_number += 1;
                            first_document += len as u32;
                        }
                        break;
                    }
                    Err(e) => {
                        error!("[tokenize] record source: {}", e);
                        let mut slot = first_error.lock();
                        if slot.is_none() {
                            *slot = Some(e);
                        }
                        failed.store(true, Ordering::Relaxed);
                        break;
                    }
                }
            }

            // Drop the sender (and the closure borrowing it) so the workers
            // see the channel close, drain, and exit; the scope joins them
            // on the way out
            drop(submit);
            drop(batch_tx);
        });

        if let Some(e) = first_error.into_inner() {
            return Err(e);
        }

        let document_count = first_document;
        let batch_count = batch_number;

        let term_count = merge::merge(prefix, document_count, batch_count)?;
        merge::remove_batches(prefix, batch_count).map_err(|e| {
            error!("[cleanup] {}", e);
            e
        })?;

        info!(
            "forward index written to {} ({} documents, {} terms)",
            prefix.display(),
            document_count,
            term_count
        );
        Ok(BuildStats {
            document_count,
            batch_count,
            term_count,
        })
    }
}
