pub mod common;
use common::*;
use shrivel::state::State;

#[test]
fn finds_minimum() {
    let result = <(u32, u32)>::generator().check(COUNT, |&(left, right)| left >= right);
    let error = result.err().unwrap();
    assert_eq!(*error.shrunk(), (0, 1));
}

#[test]
fn integer_shrinks_to_boundary() {
    for high in (1u32..1000).generator().samples(64) {
        if let Err(error) = number::<u32>().check(COUNT, |&item| item < high) {
            assert_eq!(*error.shrunk(), high);
        }
    }
}

#[test]
fn candidates_change_one_part_at_a_time() {
    let mut state = State::new(0, 1, 1.0..1.0, 5);
    let parts = vec![(0u32..=100).generator(); 4];
    let shrinker = parts.generate(&mut state);
    let original = shrinker.item();
    let mut last = 0;
    let mut seen = false;
    for candidate in shrinker.shrink() {
        let items = candidate.item();
        assert_eq!(items.len(), original.len());
        let changed: Vec<usize> = original
            .iter()
            .zip(items.iter())
            .enumerate()
            .filter(|(_, (left, right))| left != right)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(changed.len(), 1);
        // Candidates for earlier parts are offered before later ones.
        assert!(changed[0] >= last);
        last = changed[0];
        assert!(candidate.distance() < shrinker.distance());
        seen = true;
    }
    assert!(seen);
}

#[test]
fn distance_concatenates_part_distances() {
    let mut state = State::new(0, 1, 1.0..1.0, 7);
    let shrinker = vec![(0u32..=100).generator(); 3].generate(&mut state);
    let mut replay = State::new(0, 1, 1.0..1.0, 7);
    let singles: Vec<_> = (0..3)
        .map(|_| (0u32..=100).generator().generate(&mut replay))
        .collect();
    assert_eq!(
        shrinker.distance(),
        Distance::combine(singles.iter().map(Shrink::distance))
    );
}

#[test]
fn empty_compound_does_not_shrink() {
    let mut state = State::new(0, 1, 1.0..1.0, 3);
    let shrinker = ().generate(&mut state);
    assert_eq!(shrinker.distance(), Distance::ZERO);
    assert_eq!(shrinker.shrink().count(), 0);
}

#[test]
fn shrink_is_idempotent() {
    let mut state = State::new(0, 1, 1.0..1.0, 13);
    let shrinker = (0u32..=1000).generator().generate(&mut state);
    let first: Vec<u32> = shrinker.shrink().map(|candidate| candidate.item()).collect();
    let second: Vec<u32> = shrinker.shrink().map(|candidate| candidate.item()).collect();
    assert_eq!(first, second);
}

#[test]
fn arrays_shrink_one_slot_at_a_time() {
    let result = (0u32..=100)
        .generator()
        .array::<3>()
        .check(COUNT, |items| items.iter().all(|&item| item < 50));
    if let Err(error) = result {
        let shrunk = error.shrunk();
        assert_eq!(shrunk.iter().filter(|&&item| item >= 50).count(), 1);
        assert!(shrunk.contains(&50));
        assert_eq!(shrunk.iter().filter(|&&item| item == 0).count(), 2);
    }
}

#[test]
fn vec_removes_irrelevant_then_shrinks() {
    let error = (..100u32)
        .generator()
        .collect::<Vec<_>>()
        .check(COUNT, |items| {
            items.len() < 10 || items.iter().all(|&item| item < 10)
        })
        .err()
        .unwrap();
    let shrunk = error.shrunk();
    assert_eq!(shrunk.len(), 10);
    assert_eq!(shrunk.iter().filter(|&&item| item == 10).count(), 1);
}
