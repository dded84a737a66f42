use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};
use rayon::prelude::*;

use crate::core::error::Result;
use crate::postings;

/// Sorted run of terms occupying `[first, last)` of the collection buffer
#[derive(Debug, Clone, Copy)]
struct TermSpan {
    first: usize,
    last: usize,
    level: u32,
}

/// Merge the per-batch term files into one sorted, deduplicated list.
///
/// Each batch contributes a sorted run at level 0; whenever the top two
/// runs on the stack share a level they are merged into a run of the next
/// level. This keeps every merge close to balanced, so the whole
/// collection costs O(n log batch_count) comparisons. Duplicates are
/// dropped at every merge, so the buffer grows as the size of the union.
pub fn collect_terms(prefix: &Path, batch_count: usize) -> Result<Vec<String>> {
    info!("collecting terms from {} batches", batch_count);

    let mut terms: Vec<String> = Vec::new();
    let mut spans: Vec<TermSpan> = Vec::new();

    for batch in 0..batch_count {
        debug!("[collect] batch {}/{}", batch, batch_count);
        let path = postings::with_suffix(&postings::batch_file_name(prefix, batch), ".terms");
        let reader = BufReader::new(File::open(&path)?);

        let mid = terms.len();
        for line in reader.lines() {
            terms.push(line?);
        }
        terms[mid..].par_sort_unstable();

        let mut span = TermSpan {
            first: mid,
            last: terms.len(),
            level: 0,
        };
        while let Some(&top) = spans.last() {
            if top.level != span.level {
                break;
            }
            spans.pop();
            span = merge_spans(&mut terms, top, span);
        }
        spans.push(span);
    }

    // Collapse whatever the stack still holds
    while spans.len() > 1 {
        let rhs = spans[spans.len() - 1];
        let lhs = spans[spans.len() - 2];
        spans.truncate(spans.len() - 2);
        spans.push(merge_spans(&mut terms, lhs, rhs));
    }

    terms.shrink_to_fit();
    Ok(terms)
}

/// Merge two adjacent sorted runs, dropping duplicates.
///
/// The right run always ends at the buffer's end, so the merged run is
/// rebuilt as the new tail of the buffer.
fn merge_spans(terms: &mut Vec<String>, lhs: TermSpan, rhs: TermSpan) -> TermSpan {
    debug_assert_eq!(lhs.last, rhs.first);
    debug_assert_eq!(rhs.last, terms.len());

    let mut left_run = terms.split_off(lhs.first);
    let right_run = left_run.split_off(lhs.last - lhs.first);

    let mut merged: Vec<String> = Vec::with_capacity(left_run.len() + right_run.len());
    let mut left = left_run.into_iter().peekable();
    let mut right = right_run.into_iter().peekable();
    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l <= r,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let term = if take_left { left.next() } else { right.next() };
        if let Some(term) = term {
            if merged.last() != Some(&term) {
                merged.push(term);
            }
        }
    }

    terms.append(&mut merged);
    TermSpan {
        first: lhs.first,
        last: terms.len(),
        level: lhs.level + 1,
    }
}
