use corestructs::minqueue::MinQueue;
use std::collections::VecDeque;
use test_log::test;

/// spec.md §8 property 10: after any interleaving of push/pop, `min()`
/// equals the minimum of the values currently in the window, with FIFO
/// tie-breaking among equal minima. Checked against a brute-force oracle
/// over a fixed interleaving of pushes and pops.
#[test]
fn min_matches_brute_force_window_minimum_over_an_interleaving() {
    let mut q = MinQueue::new();
    let mut oracle: VecDeque<i32> = VecDeque::new();

    let ops: &[Op] = &[
        Op::Push(4),
        Op::Push(2),
        Op::Push(3),
        Op::Push(1),
        Op::Push(5),
        Op::Pop,
        Op::Push(0),
        Op::Pop,
        Op::Pop,
        Op::Push(7),
        Op::Push(1),
        Op::Pop,
        Op::Pop,
        Op::Pop,
    ];

    for op in ops {
        match *op {
            Op::Push(v) => {
                q.push(v);
                oracle.push_back(v);
            }
            Op::Pop => {
                let got = q.pop();
                let expected = oracle.pop_front();
                assert_eq!(got, expected);
            }
        }
        let expected_min = oracle.iter().min().copied();
        assert_eq!(q.min().copied(), expected_min);
    }
}

enum Op {
    Push(i32),
    Pop,
}

#[test]
fn fifo_tie_breaking_among_equal_minima() {
    let mut q = MinQueue::new();
    for v in [1, 1, 2, 1, 3] {
        q.push(v);
    }
    let tied: Vec<_> = q.minima().copied().collect();
    assert_eq!(tied, vec![1, 1, 1]);
}
