//! Criterion benchmarks for querywise.
//!
//! Covers the hot paths of a single analysis:
//! - Edit distance
//! - Query reconstruction
//! - Full analysis, sequential and batched

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use querywise::analyzer::{AnalysisRequest, QueryQualityAnalyzer};
use querywise::config::AnalyzerOptions;
use querywise::document::SearchResult;
use querywise::util::levenshtein::levenshtein_distance;
use serde_json::json;
use std::hint::black_box;

const WORDS: &[&str] = &[
    "mathematics",
    "mathematcs",
    "algebra",
    "algebr",
    "geometry",
    "chemistry",
    "chemestry",
    "biology",
    "physics",
    "calculus",
];

fn sample_result() -> SearchResult {
    SearchResult::from_value(&json!({
        "found": 42,
        "hits": [{
            "document": {
                "type": "book",
                "title": "Mathematics for Grade 12",
                "description": "Algebra, geometry and calculus practice with worked exam papers",
                "grades": ["12th Grade"]
            },
            "text_match_info": {"fields_matched": 2, "tokens_matched": 2},
            "highlights": [
                {"field": "title", "snippet": "<mark>Mat</mark>hematics for Grade 12"},
                {"field": "grades", "snippets": ["<mark>12</mark>th Grade"]}
            ]
        }]
    }))
    .unwrap()
}

fn bench_levenshtein(c: &mut Criterion) {
    let mut group = c.benchmark_group("levenshtein");
    group.throughput(Throughput::Elements((WORDS.len() * WORDS.len()) as u64));

    group.bench_function("pairwise", |b| {
        b.iter(|| {
            for a in WORDS {
                for w in WORDS {
                    black_box(levenshtein_distance(black_box(a), black_box(w)));
                }
            }
        })
    });

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let analyzer = QueryQualityAnalyzer::new(&AnalyzerOptions::default()).unwrap();
    let result = sample_result();

    let mut group = c.benchmark_group("analyze");

    group.bench_function("single", |b| {
        b.iter(|| black_box(analyzer.safe_analyze(black_box("Mat exam 12th"), &result)))
    });

    let requests: Vec<AnalysisRequest> = (0..256)
        .map(|i| AnalysisRequest {
            query: format!("{} exam 12th", WORDS[i % WORDS.len()]),
            result: result.clone(),
        })
        .collect();
    group.throughput(Throughput::Elements(requests.len() as u64));
    group.bench_function("batch", |b| {
        b.iter(|| black_box(analyzer.analyze_batch(black_box(&requests))))
    });

    group.finish();
}

criterion_group!(benches, bench_levenshtein, bench_analyze);
criterion_main!(benches);
