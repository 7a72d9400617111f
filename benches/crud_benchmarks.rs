use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use osrb_tree::{OSRBTree, RemovalFixup};
use std::collections::BTreeMap;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64 % (n as i64 / 4));
    }
    keys
}

/// The baseline: a multiset as a count per key. Selecting by rank has to walk it.
fn counting_multiset(keys: &[i64]) -> BTreeMap<i64, usize> {
    let mut map = BTreeMap::new();
    for &key in keys {
        *map.entry(key).or_insert(0) += 1;
    }
    map
}

fn select_linear(map: &BTreeMap<i64, usize>, k: usize) -> Option<i64> {
    let mut seen = 0;
    for (&key, &count) in map {
        seen += count;
        if seen >= k {
            return Some(key);
        }
    }
    None
}

// ─── Benchmarks ─────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    let keys = random_keys(N);

    group.bench_function(BenchmarkId::new("OSRBTree", N), |b| {
        b.iter(|| {
            let mut tree = OSRBTree::with_capacity(N);
            for &key in &keys {
                tree.insert(key);
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap<_, count>", N), |b| {
        b.iter(|| counting_multiset(&keys));
    });

    group.finish();
}

fn bench_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_then_remove_all");
    let keys = random_keys(N);

    for fixup in [RemovalFixup::Always, RemovalFixup::ChildPresent] {
        group.bench_function(BenchmarkId::new(format!("OSRBTree/{fixup:?}"), N), |b| {
            b.iter(|| {
                let mut tree = OSRBTree::with_removal_fixup(fixup);
                tree.extend(&keys);
                for key in keys.iter().rev() {
                    tree.remove(key);
                }
                tree
            });
        });
    }

    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_every_rank");
    let keys = random_keys(N);
    let tree: OSRBTree<i64> = keys.iter().copied().collect();
    let map = counting_multiset(&keys);

    group.bench_function(BenchmarkId::new("OSRBTree", N), |b| {
        b.iter(|| {
            for k in (1..=N).step_by(97) {
                black_box(tree.select(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap<_, count>", N), |b| {
        b.iter(|| {
            for k in (1..=N).step_by(97) {
                black_box(select_linear(&map, k));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_insert_remove, bench_select);
criterion_main!(benches);
