use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use coastal_quiz_core::hash::{canonical_number, hash_answer, hash_selection, hash_text};

fn bench_digests(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest");

    let long_text = "The Escoffier curve relates the cross-sectional area ".repeat(20);

    group.bench_function("text_short", |b| b.iter(|| hash_text(black_box("Paris"))));

    group.bench_function("text_long", |b| b.iter(|| hash_text(black_box(&long_text))));

    group.bench_function("selection_4", |b| {
        b.iter(|| hash_selection(black_box(["a", "b", "c", "d"])))
    });

    let selection = json!(["a", "c", "e", "g", "i"]);
    group.bench_function("loose_selection", |b| {
        b.iter(|| hash_answer(black_box(&selection), "multiple_selection", None))
    });

    group.finish();
}

fn bench_canonical_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_number");

    group.bench_function("no_precision", |b| {
        b.iter(|| canonical_number(black_box(0.3333333), None))
    });

    group.bench_function("two_places", |b| {
        b.iter(|| canonical_number(black_box(0.3333333), Some(2)))
    });

    group.bench_function("carry_through", |b| {
        b.iter(|| canonical_number(black_box(99999.9999996), Some(6)))
    });

    group.finish();
}

criterion_group!(benches, bench_digests, bench_canonical_numbers);
criterion_main!(benches);
