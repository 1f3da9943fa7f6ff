/*!
 * Circular Deque Benchmarks
 *
 * End operations, positional insert/remove and growth against VecDeque
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fairq::CircularDeque;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop");
    let count = 10_000usize;
    group.throughput(Throughput::Elements(count as u64));

    group.bench_function("circular_deque", |b| {
        let mut deque = CircularDeque::with_capacity(64);
        b.iter(|| {
            for i in 0..count {
                if i % 2 == 0 {
                    deque.push_back(i);
                } else {
                    deque.push_front(i);
                }
            }
            while let Ok(value) = deque.pop_front() {
                black_box(value);
            }
        });
    });

    group.bench_function("vec_deque", |b| {
        let mut deque = VecDeque::with_capacity(64);
        b.iter(|| {
            for i in 0..count {
                if i % 2 == 0 {
                    deque.push_back(i);
                } else {
                    deque.push_front(i);
                }
            }
            while let Some(value) = deque.pop_front() {
                black_box(value);
            }
        });
    });

    group.finish();
}

fn bench_random_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_insert_remove");

    for len in [64usize, 1024, 16_384] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut deque: CircularDeque<usize> = (0..len).collect();
            let mut rng = StdRng::seed_from_u64(0x5eed);

            b.iter(|| {
                let index = rng.gen_range(0..=deque.len());
                deque.insert(index, index).unwrap();
                let index = rng.gen_range(0..deque.len());
                black_box(deque.remove_at(index).unwrap());
            });
        });
    }

    group.finish();
}

fn bench_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth_from_one");

    for count in [1_000usize, 100_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut deque = CircularDeque::with_capacity(1);
                for i in 0..count {
                    deque.push_back(i);
                    if i % 3 == 0 {
                        deque.pop_front().ok();
                    }
                }
                black_box(deque.len())
            });
        });
    }

    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let deque: CircularDeque<u64> = (0..4096).collect();

    c.bench_function("iterate_sum_4096", |b| {
        b.iter(|| black_box(deque.iter().sum::<u64>()));
    });
}

criterion_group!(
    benches,
    bench_push_pop,
    bench_random_insert_remove,
    bench_growth,
    bench_iterate
);
criterion_main!(benches);
