//! Criterion benchmarks for the rewrite cascade.
//!
//! Measures:
//! - Rule compilation
//! - Single stage application
//! - Full cascade throughput on short and long inputs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use portuguese_g2p::phonetic::*;

// ============================================================================
// Benchmark Fixtures
// ============================================================================

fn sample_words() -> Vec<&'static str> {
    vec![
        "vez", "cases", "cimento", "chato", "casa", "luz", "nasço", "filho", "homem", "ninho",
        "braço", "carro", "interesse", "partes", "rápido", "verdade", "não", "maçã", "anta",
    ]
}

fn cascade() -> Cascade {
    CascadeBuilder::new(Alphabet::portuguese())
        .rules(porto_alegre_rules())
        .build()
        .expect("built-in rules compile")
}

// ============================================================================
// Compilation
// ============================================================================

fn bench_compile(c: &mut Criterion) {
    let alphabet = Alphabet::portuguese();
    let rules = porto_alegre_rules();

    c.bench_function("compile_porto_alegre", |b| {
        b.iter(|| {
            for rule in &rules {
                black_box(compile(black_box(rule), &alphabet).expect("rule compiles"));
            }
        });
    });
}

// ============================================================================
// Single stage application
// ============================================================================

fn bench_single_stage(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_stage");
    let cascade = cascade();
    let inputs: Vec<Vec<Symbol>> = sample_words()
        .iter()
        .map(|w| cascade.alphabet().tokenize(w).expect("fixture tokenizes"))
        .collect();

    for (i, stage) in cascade.stages().iter().enumerate() {
        group.bench_function(BenchmarkId::new("stage", i), |b| {
            b.iter(|| {
                for s in &inputs {
                    black_box(stage.apply(black_box(s)).expect("stage applies"));
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// Full cascade
// ============================================================================

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");
    let cascade = cascade();
    let words = sample_words();

    let total_bytes: usize = words.iter().map(|w| w.len()).sum();
    group.throughput(Throughput::Bytes(total_bytes as u64));
    group.bench_function("words", |b| {
        b.iter(|| {
            for word in &words {
                black_box(cascade.transduce(black_box(word)).expect("word transduces"));
            }
        });
    });

    for repeat in [1usize, 16, 256] {
        let long: String = words.concat().repeat(repeat);
        group.throughput(Throughput::Bytes(long.len() as u64));
        group.bench_with_input(BenchmarkId::new("long_input", repeat), &long, |b, input| {
            b.iter(|| black_box(cascade.transduce(black_box(input)).expect("input transduces")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_single_stage, bench_cascade);
criterion_main!(benches);
