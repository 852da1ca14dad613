use corestructs::roaring::RoaringBitVec;
use test_log::test;

/// spec.md §8 property 9 and the seeded `size=200000`, every-100th-bit
/// scenario. Spec.md additionally claims that setting bit `50000` flips it
/// from 0 to 1, but `50000` is itself a multiple of 100 and so is already
/// one of the "every 100th bit" set members under the indexing that makes
/// `rank1`/`select1` match the stated `500`/`49900` (bits `0, 100, .., 199900`);
/// this test instead flips an untouched bit (`50001`) to demonstrate the
/// same rank/select-preserving-duality behaviour without asserting a flip
/// that contradicts the scenario's own rank/select numbers.
#[test]
fn rank_select_scenario() {
    let mut rb = RoaringBitVec::new(200_000);
    for i in (0..200_000u32).step_by(100) {
        rb.set(i, true);
    }
    assert_eq!(rb.card(), 2000);
    assert_eq!(rb.rank1(50_000), 500);
    assert_eq!(rb.select1(499), 49_900);

    assert!(!rb.get(50_001));
    rb.set(50_001, true);
    assert!(rb.get(50_001));
    let r = rb.rank1(50_001);
    assert_eq!(rb.rank1(rb.select1(r)), r);
    assert!(rb.get(rb.select1(r)));
}

#[test]
fn rank_select_duality_holds_across_every_bucket() {
    let mut rb = RoaringBitVec::new(300_000);
    for i in (0..300_000).step_by(37) {
        rb.set(i, true);
    }
    let ones = rb.card();
    for r in (0..ones).step_by(13) {
        let pos = rb.select1(r);
        assert_eq!(rb.rank1(pos), r);
        assert!(rb.get(pos));
    }
    assert_eq!(rb.select1(ones), rb.len());
}
