//! Criterion benchmarks for the Sieve search index.
//!
//! Covers:
//! - Document indexing
//! - Sequential vs parallel ranking
//! - Sequential vs parallel document removal
//! - Batch query processing

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use sieve::document::DocumentStatus;
use sieve::index::SearchIndex;
use sieve::search::ExecutionPolicy;
use sieve::service::process_queries;
use std::hint::black_box;

const WORDS: &[&str] = &[
    "search", "engine", "full", "text", "index", "query", "document", "field", "term", "phrase",
    "boolean", "vector", "similarity", "relevance", "score", "analysis", "tokenization",
    "stemming", "normalization", "clustering", "machine", "learning", "algorithm", "data",
    "structure", "performance", "optimization", "memory", "storage", "retrieval", "ranking",
    "filtering", "and", "with", "in", "the",
];

const STOP_WORDS: &str = "and with in the";

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 10 + (i % 40);
        let doc_words: Vec<&str> = (0..doc_length)
            .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()])
            .collect();
        documents.push(doc_words.join(" "));
    }
    documents
}

/// Generate queries mixing plus and minus words.
fn generate_test_queries(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let plus: Vec<&str> = (0..6).map(|j| WORDS[(i * 5 + j * 3) % WORDS.len()]).collect();
            let minus = WORDS[(i * 11 + 1) % WORDS.len()];
            format!("{} -{minus}", plus.join(" "))
        })
        .collect()
}

fn build_index(documents: &[String]) -> SearchIndex {
    let mut index = SearchIndex::from_stop_words_text(STOP_WORDS).unwrap();
    for (id, text) in documents.iter().enumerate() {
        index
            .add_document(id as i32, text, DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
    }
    index
}

/// Benchmark document indexing.
fn bench_indexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexing");
    let documents = generate_test_documents(1000);

    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("add_1000_documents", |b| {
        b.iter(|| black_box(build_index(black_box(&documents))))
    });

    group.finish();
}

/// Benchmark ranking with both execution policies.
fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");
    let index = build_index(&generate_test_documents(10_000));
    let queries = generate_test_queries(100);

    group.throughput(Throughput::Elements(queries.len() as u64));
    for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
        group.bench_function(format!("find_top_documents_{policy}"), |b| {
            b.iter(|| {
                for query in &queries {
                    let hits = index.find_top_documents_policy(policy, black_box(query));
                    let _ = black_box(hits);
                }
            })
        });
    }

    group.bench_function("process_queries", |b| {
        b.iter(|| black_box(process_queries(&index, black_box(&queries))))
    });

    group.finish();
}

/// Benchmark removal of every document with both execution policies.
fn bench_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("removal");
    group.sample_size(20);
    let documents = generate_test_documents(2_000);

    group.throughput(Throughput::Elements(documents.len() as u64));
    for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
        group.bench_function(format!("remove_all_{policy}"), |b| {
            b.iter_batched(
                || build_index(&documents),
                |mut index| {
                    for id in 0..documents.len() as i32 {
                        index.remove_document_with_policy(policy, black_box(id));
                    }
                    black_box(index)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_indexing, bench_ranking, bench_removal);
criterion_main!(benches);
