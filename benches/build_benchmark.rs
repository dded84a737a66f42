use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Cursor;
use std::sync::Arc;

use findex::analysis::normalizer::IdentityNormalizer;
use findex::analysis::tokenizer::WhitespaceTokenizer;
use findex::builder::dispatcher::ForwardIndexBuilder;
use findex::core::config::BuilderConfig;
use findex::corpus::reader::PlaintextReader;

/// Word-salad corpus: `documents` records over a bounded vocabulary
fn synthetic_corpus(documents: usize, vocabulary: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut corpus = String::new();
    for d in 0..documents {
        corpus.push_str(&format!("doc{:06}", d));
        let length = rng.gen_range(8..64);
        for _ in 0..length {
            corpus.push_str(&format!(" term{:04}", rng.gen_range(0..vocabulary)));
        }
        corpus.push('\n');
    }
    corpus.into_bytes()
}

fn bench_build(c: &mut Criterion) {
    let corpus = synthetic_corpus(2_000, 5_000, 42);

    let mut group = c.benchmark_group("build");
    for batch_size in [100usize, 500, 2_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch_size,
            |b, &batch_size| {
                b.iter(|| {
                    let dir = tempfile::tempdir().unwrap();
                    let builder = ForwardIndexBuilder::new(
                        BuilderConfig {
                            output_prefix: dir.path().join("fwd"),
                            batch_size,
                            threads: 4,
                        },
                        Arc::new(WhitespaceTokenizer),
                        Arc::new(IdentityNormalizer),
                    );
                    let mut input = Cursor::new(corpus.clone());
                    black_box(builder.build(&mut input, &PlaintextReader).unwrap())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
