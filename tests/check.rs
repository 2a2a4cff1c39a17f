pub mod common;
use common::*;
use shrivel::{
    distance::Distance,
    shrink::{Candidates, Shrink},
    state::State,
};

#[test]
fn shrink_converges_to_zero() {
    let mut count = COUNT;
    let error = number::<i32>()
        .check(COUNT, |_| {
            count = count.saturating_sub(1);
            count > 0
        })
        .unwrap_err();
    assert_eq!(*error.shrunk(), 0);
}

#[test]
fn irrelevant_parts_shrink_to_zero() {
    let result = (positive::<u32>(), positive::<u32>().keep(), positive::<u32>())
        .check(COUNT, |&(left, right, _)| left < right);
    if let Err(error) = result {
        let &(left, right, rest) = error.shrunk();
        assert_eq!(rest, 0);
        assert_eq!(left, right);
    }
}

#[test]
fn kept_values_do_not_shrink() {
    if let Err(error) = number::<u32>().keep().check(COUNT, |&value| value < 100) {
        assert_eq!(error.original(), error.shrunk());
    }
}

#[test]
fn same_seed_same_samples() {
    let mut first = (0u32..=1000).generator().sampler();
    first.seed = 31;
    let mut second = (0u32..=1000).generator().sampler();
    second.seed = 31;
    assert!(first.samples().eq(second.samples()));
}

#[test]
fn unsatisfiable_filters_give_up() {
    for item in (0u32..=100).generator().filter(|_| false).samples(COUNT) {
        assert_eq!(item, None);
    }
}

#[test]
fn deferred_generators_produce_values() {
    for value in with(|| 7u32).samples(16) {
        assert_eq!(value, 7);
    }
    for value in lazy(|| (0u32..=9).generator()).samples(16) {
        assert!(value <= 9);
    }
}

#[test]
fn panics_are_reported() {
    let generator = number::<u32>();
    let mut checker = generator.checker();
    checker.count = COUNT;
    checker.shrinks.accept = 0;
    for result in checker.checks(|&value| {
        assert!(value < 10, "too large");
        true
    }) {
        if let Err(error) = result {
            match error.cause {
                Cause::Panic(Some(message)) => assert!(message.contains("too large")),
                cause => panic!("expected a panic cause, found {cause:?}"),
            }
            return;
        }
    }
    panic!("expected a failing check");
}

// A shrinker whose value cannot be rebuilt for one specific candidate; the
// search must skip it and continue with the next candidate.
#[derive(Clone)]
struct Fussy {
    value: u32,
}

impl Shrink for Fussy {
    type Item = u32;

    fn item(&self) -> u32 {
        assert!(self.value != 1, "cannot rebuild");
        self.value
    }

    fn distance(&self) -> Distance {
        Distance::of(self.value as u64)
    }

    fn shrink(&self) -> Candidates<Self> {
        Box::new((0..self.value).map(|value| Fussy { value }))
    }
}

#[derive(Clone)]
struct FussyDomain;

impl Generate for FussyDomain {
    type Item = u32;
    type Shrink = Fussy;

    fn generate(&self, _: &mut State) -> Self::Shrink {
        Fussy { value: 9 }
    }
}

#[test]
fn unbuildable_candidates_are_skipped() {
    let error = FussyDomain.check(1, |&value| value == 0).unwrap_err();
    // Candidate `0` passes, `1` cannot be rebuilt, `2` is the simplest
    // remaining counterexample.
    assert_eq!(*error.shrunk(), 2);
}
