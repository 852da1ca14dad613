use corestructs::avl::AvlSet;
use corestructs::skiplist::SkipList;
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordered_set insert");

    for item_count in [100, 1_000, 10_000, 100_000] {
        group.bench_function(format!("avl {item_count}"), |b| {
            b.iter(|| {
                let mut set = AvlSet::new();
                for v in 0..item_count {
                    set.insert(v);
                }
            });
        });

        group.bench_function(format!("skiplist {item_count}"), |b| {
            b.iter(|| {
                let mut set = SkipList::new();
                for v in 0..item_count {
                    set.insert(v);
                }
            });
        });
    }
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordered_set get");

    for item_count in [100, 1_000, 10_000, 100_000] {
        let mut avl = AvlSet::new();
        let mut sl = SkipList::new();
        for v in 0..item_count {
            avl.insert(v);
            sl.insert(v);
        }

        group.bench_function(format!("avl {item_count}"), |b| {
            b.iter(|| avl.get(&(item_count / 2)));
        });

        group.bench_function(format!("skiplist {item_count}"), |b| {
            b.iter(|| sl.get(&(item_count / 2)));
        });
    }
}

criterion_group!(benches, bench_insert, bench_get);
criterion_main!(benches);
