use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use rb_multiset::multiset::RbMultiset;
use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 100;

fn bench_btreemap_insert(c: &mut Criterion) {
    c.bench_function("bench btreemap insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut map: BTreeMap<u32, usize> = BTreeMap::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let element = rng.gen_range(0, 64);
                *map.entry(element).or_insert(0) += 1;
            }
        })
    });
}

fn bench_multiset_insert(c: &mut Criterion) {
    c.bench_function("bench multiset insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut set = RbMultiset::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let element: u32 = rng.gen_range(0, 64);
                set.insert(element);
            }
        })
    });
}

fn bench_multiset_count(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = RbMultiset::new();
    let mut elements = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let element: u32 = rng.gen_range(0, 64);
        set.insert(element);
        elements.push(element);
    }

    c.bench_function("bench multiset count", move |b| {
        b.iter(|| {
            for element in &elements {
                black_box(set.count(element));
            }
        })
    });
}

fn bench_multiset_insert_remove(c: &mut Criterion) {
    c.bench_function("bench multiset insert remove", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut set = RbMultiset::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let element: u32 = rng.gen_range(0, 64);
                if rng.gen::<bool>() {
                    set.insert(element);
                } else {
                    black_box(set.remove(&element));
                }
            }
        })
    });
}

criterion_group!(
    benches,
    bench_btreemap_insert,
    bench_multiset_insert,
    bench_multiset_count,
    bench_multiset_insert_remove,
);

criterion_main!(benches);
