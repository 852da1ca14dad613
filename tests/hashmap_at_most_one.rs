use corestructs::hashmap::HashMap;
use test_log::test;

/// spec.md §8 property 5 and the seeded "keys 1..1000 mapped to squares,
/// delete every 7th" scenario.
#[test]
fn insert_squares_then_delete_every_seventh_key() {
    let mut m = HashMap::new();
    for k in 1..=1000u64 {
        m.insert(k, k * k);
    }
    assert_eq!(m.len(), 1000);

    for k in (1..=1000u64).step_by(7) {
        m.remove(&k);
    }
    let deleted = (1..=1000u64).step_by(7).count();
    assert_eq!(deleted, 143, "ceil(1000/7) = 143");
    assert_eq!(m.len(), 1000 - deleted);

    for k in 1..=1000u64 {
        if k % 7 == 1 {
            assert!(!m.contains(&k));
        } else {
            assert_eq!(m.get(&k), Some(&(k * k)));
        }
    }
}

#[test]
fn at_most_one_active_slot_survives_repeated_insert_and_delete() {
    let mut m = HashMap::new();
    for round in 0..5 {
        for k in 0..300u64 {
            m.insert(k, k + round);
        }
        for k in (0..300u64).step_by(2) {
            m.remove(&k);
        }
    }
    for k in (0..300u64).step_by(2) {
        assert!(!m.contains(&k));
    }
    for k in (1..300u64).step_by(2) {
        assert!(m.contains(&k));
    }
}
