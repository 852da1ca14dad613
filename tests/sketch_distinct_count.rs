use corestructs::sketch::{Bjkst, FmSketch};
use test_log::test;

/// spec.md §4.14 / §8: `update`/`query` distinct-count sketches should land
/// within an order of magnitude of the true cardinality, and exactly match
/// it while the stream stays under the sketch's retained capacity.
#[test]
fn fm_sketch_estimate_is_within_an_order_of_magnitude() {
    let mut fm = FmSketch::new(16, 16, 32);
    for v in 0..5000u64 {
        fm.update(v);
    }
    let estimate = fm.query();
    assert!(estimate > 500.0 && estimate < 50000.0, "estimate {estimate} wildly off");
}

#[test]
fn fm_sketch_is_insensitive_to_duplicate_updates() {
    let mut fm = FmSketch::new(8, 8, 32);
    for _ in 0..10 {
        for v in 0..200u64 {
            fm.update(v);
        }
    }
    let estimate = fm.query();
    assert!(estimate > 20.0 && estimate < 2000.0, "estimate {estimate} wildly off");
}

#[test]
fn bjkst_exact_below_capacity() {
    let mut b = Bjkst::new(0.1, 32);
    for v in 0..20u64 {
        b.update(v);
        b.update(v);
    }
    assert_eq!(b.query(), 20);
}

#[test]
fn bjkst_estimate_is_within_an_order_of_magnitude() {
    let mut b = Bjkst::new(0.2, 32);
    for v in 0..5000u64 {
        b.update(v);
    }
    let estimate = b.query();
    assert!(estimate > 500 && estimate < 50000, "estimate {estimate} wildly off");
}
