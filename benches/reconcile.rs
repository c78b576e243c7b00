//! Benchmarks for reconciling a large catalog against a sparse translation.
//!
//! The reference has 200 sections of 50 keys each, nested one level below
//! a few feature areas; the target keeps every third key and turns every
//! tenth key into a placeholder.

use catalog_sync::codec::{self, normalize};
use catalog_sync::diff::diff;
use catalog_sync::fill::fill_placeholders;
use catalog_sync::generate::TitleCase;
use catalog_sync::lint::find_duplicate_siblings;
use catalog_sync::merge::merge_missing;
use catalog_sync::placeholder::PlaceholderPolicy;
use catalog_sync::tree::{KeyTree, Node};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

const AREAS: [&str; 4] = ["events", "jobs", "admin", "profile"];

/// Builds the reference catalog and a partial translation of it.
fn create_catalogs() -> (KeyTree, KeyTree) {
    let mut reference = KeyTree::new();
    let mut target = KeyTree::new();

    for (a, area) in AREAS.iter().enumerate() {
        let mut reference_area = KeyTree::new();
        let mut target_area = KeyTree::new();
        for s in 0..50 {
            let mut reference_section = KeyTree::new();
            let mut target_section = KeyTree::new();
            for k in 0..50 {
                let key = format!("label{}", k);
                reference_section.insert(key.clone(), Node::leaf(format!("Label {} of {}", k, s)));
                let n = a * 2500 + s * 50 + k;
                if n % 10 == 0 {
                    target_section.insert(key, Node::leaf("TODO"));
                } else if n % 3 == 0 {
                    target_section.insert(key, Node::leaf(format!("标签 {}", k)));
                }
            }
            reference_area.insert(format!("section{}", s), Node::Branch(reference_section));
            target_area.insert(format!("section{}", s), Node::Branch(target_section));
        }
        reference.insert(*area, Node::Branch(reference_area));
        target.insert(*area, Node::Branch(target_area));
    }

    (reference, target)
}

fn bench_diff(c: &mut Criterion) {
    let (reference, target) = create_catalogs();
    let mut group = c.benchmark_group("diff");

    group.bench_function("partial_target", |b| {
        b.iter(|| diff(black_box(&reference), black_box(&target)))
    });

    group.bench_function("identical", |b| {
        b.iter(|| diff(black_box(&reference), black_box(&reference)))
    });

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let (reference, target) = create_catalogs();
    let missing = diff(&reference, &target).only_in_reference;
    let policy = PlaceholderPolicy::default();
    let mut group = c.benchmark_group("merge");

    group.bench_function("merge_missing", |b| {
        b.iter(|| merge_missing(black_box(&target), black_box(&missing), &TitleCase))
    });

    group.bench_function("fill_placeholders", |b| {
        b.iter(|| fill_placeholders(black_box(&reference), black_box(&target), &policy, None))
    });

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let (reference, _) = create_catalogs();
    let text = normalize(&reference);
    let mut group = c.benchmark_group("codec");

    group.bench_function("parse", |b| {
        b.iter(|| codec::parse(black_box(&text)).unwrap())
    });

    group.bench_function("normalize", |b| {
        b.iter_batched(
            || reference.clone(),
            |tree| normalize(&tree),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("find_duplicate_siblings", |b| {
        b.iter(|| find_duplicate_siblings(black_box(&text)))
    });

    group.finish();
}

criterion_group!(benches, bench_diff, bench_merge, bench_codec);
criterion_main!(benches);
