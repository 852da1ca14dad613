use corestructs::skiplist::SkipList;
use test_log::test;

/// spec.md §8 property 4: level-0 in-order traversal yields the
/// inserted-but-not-deleted keys in comparator order, each exactly once.
#[test]
fn insert_then_iter_yields_sorted_order() {
    let mut list = SkipList::new();
    for v in [5, 1, 9, 3, 7, 2, 8, 4, 6] {
        assert!(list.insert(v));
    }
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), (1..=9).collect::<Vec<_>>());
}

#[test]
fn deletions_remove_exactly_their_key_and_preserve_order() {
    let mut list = SkipList::new();
    for v in 0..200 {
        list.insert(v);
    }
    for v in (0..200).step_by(2) {
        assert!(list.remove(&v));
    }
    assert_eq!(list.len(), 100);
    let remaining: Vec<_> = list.iter().copied().collect();
    assert_eq!(remaining, (0..200).step_by(2).map(|v| v + 1).collect::<Vec<_>>());
}
