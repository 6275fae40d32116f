// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for keywheel
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Chord token parsing
//! - Search normalization
//! - Triad pack construction
//! - Progression transposition

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keywheel::chords::{normalize_search_query, parse_chord, transpose_progression, ChordLibrary};
use keywheel::music::{build_major_pack, build_minor_pack, build_mode_pack, MinorVariant};

fn bench_chord_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_chord");

    for token in ["C", "F#m7", "gsh", "bfl7", "cShArP", "Dminor", "N.C."] {
        group.bench_with_input(BenchmarkId::from_parameter(token), token, |b, token| {
            b.iter(|| black_box(parse_chord(black_box(token))))
        });
    }

    group.finish();
}

fn bench_search_normalization(c: &mut Criterion) {
    c.bench_function("normalize_search_query", |b| {
        b.iter(|| black_box(normalize_search_query(black_box("C Sharp Minor 7"))))
    });
}

fn bench_triad_packs(c: &mut Criterion) {
    let mut group = c.benchmark_group("triad_pack");

    group.bench_function("major", |b| b.iter(|| black_box(build_major_pack(black_box("Eb")))));
    group.bench_function("harmonic_minor", |b| {
        b.iter(|| black_box(build_minor_pack(black_box("F#"), MinorVariant::Harmonic)))
    });
    group.bench_function("mode", |b| {
        b.iter(|| black_box(build_mode_pack(black_box("D#"), 1, "Dorian")))
    });

    group.finish();
}

fn bench_transposition(c: &mut Criterion) {
    let library = ChordLibrary::builtin();
    let mut group = c.benchmark_group("transpose");

    for bars in [4usize, 16, 64] {
        let progression = vec!["C", "Am7", "Dm", "G7"].repeat(bars).join(" ");
        group.bench_with_input(BenchmarkId::new("progression", bars), &progression, |b, text| {
            b.iter(|| black_box(transpose_progression(text, "C", "Eb", &library)))
        });
    }

    group.finish();
}

fn bench_builtin_library(c: &mut Criterion) {
    c.bench_function("chord_library_builtin", |b| b.iter(|| black_box(ChordLibrary::builtin())));
}

criterion_group!(
    benches,
    bench_chord_parsing,
    bench_search_normalization,
    bench_triad_packs,
    bench_transposition,
    bench_builtin_library,
);

criterion_main!(benches);
