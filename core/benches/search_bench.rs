use criterion::{criterion_group, criterion_main, Criterion};
use sitekit::tokenizer::tokenize;
use sitekit::{build_index, Corpus, IndexOptions};

const WORDS: &[&str] = &["alpha", "widget", "release", "notes", "rust", "cooking", "garden", "travel", "review", "guide"];

fn corpus(n: usize) -> Corpus {
    (0..n)
        .map(|i| {
            let w = |k: usize| WORDS[(i * 7 + k * 3) % WORDS.len()];
            (
                format!("{} {} {}", w(0), w(1), w(2)),
                format!("Author {}", w(3)),
                w(4).to_string(),
                format!("/posts/{i}"),
            )
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let text = "Running a small garden: notes on cooking, travel and the occasional Rust widget review.";
    c.bench_function("tokenize_sentence", |b| b.iter(|| tokenize(text)));
}

fn bench_index(c: &mut Criterion) {
    let docs = corpus(2_000);
    c.bench_function("build_index_2000", |b| b.iter(|| build_index(docs.clone(), IndexOptions::default())));

    let index = build_index(docs, IndexOptions::default());
    c.bench_function("search_two_terms", |b| b.iter(|| index.search("alpha widget")));
    c.bench_function("search_prefix", |b| b.iter(|| index.search("+gard* -author:rust")));
}

criterion_group!(benches, bench_tokenize, bench_index);
criterion_main!(benches);
