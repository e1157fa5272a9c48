use super::*;

#[test]
fn first_draws_match_lcg_reference() {
    let mut g = SeededGenerator::new(1);
    assert_eq!(g.next_f64(), 1_015_568_748.0 / 4_294_967_296.0);
    assert_eq!(g.next_f64(), 1_586_005_467.0 / 4_294_967_296.0);
    assert_eq!(g.next_f64(), 2_165_703_038.0 / 4_294_967_296.0);
}

#[test]
fn zero_seed_behaves_like_seed_one() {
    let a: Vec<f64> = SeededGenerator::new(0).take(16).collect();
    let b: Vec<f64> = SeededGenerator::new(1).take(16).collect();
    assert_eq!(a, b);
}

#[test]
fn identical_seeds_yield_identical_sequences() {
    let a: Vec<f64> = SeededGenerator::new(127_731_767).take(512).collect();
    let b: Vec<f64> = SeededGenerator::new(127_731_767).take(512).collect();
    assert_eq!(a, b);
}

#[test]
fn instances_do_not_share_state() {
    let mut a = SeededGenerator::new(42);
    let mut b = SeededGenerator::new(42);
    a.next_f64();
    a.next_f64();
    let first_b = b.next_f64();
    assert_eq!(first_b, SeededGenerator::new(42).next_f64());
    assert_ne!(a, b);
}

#[test]
fn draws_stay_in_unit_interval() {
    for seed in [1u32, 7, 0xFFFF_FFFF, 2_147_483_648] {
        for x in SeededGenerator::new(seed).take(10_000) {
            assert!((0.0..1.0).contains(&x), "seed {seed}: {x}");
        }
    }
}

#[test]
fn next_in_respects_half_open_span() {
    let mut g = SeededGenerator::new(99);
    for _ in 0..10_000 {
        let v = g.next_in(0.25, 0.65);
        assert!((0.25..0.90).contains(&v));
    }
}
