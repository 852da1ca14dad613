use corestructs::deque::Deque;
use test_log::test;

/// spec.md §8 property 2 and the seeded front/back push scenario.
#[test]
fn double_ended_order_scenario() {
    let mut d = Deque::new();
    d.push_front(1);
    d.push_back(2);
    d.push_front(3);
    d.push_back(4);
    assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2, 4]);

    assert_eq!(d.pop_front(), Some(3));
    assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4]);
}

#[test]
fn get_zero_is_always_the_oldest_surviving_front_element() {
    let mut d = Deque::new();
    for v in 0..20 {
        d.push_back(v);
    }
    for v in 0..10 {
        assert_eq!(*d.get(0), v);
        d.pop_front();
    }
    for v in (100..110).rev() {
        d.push_front(v);
        assert_eq!(*d.get(d.len() - 1), 19);
        assert_eq!(*d.get(0), v);
    }
}
