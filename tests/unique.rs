pub mod common;
use common::*;
use shrivel::{state::State, unique};

#[test]
fn lists_have_distinct_elements() {
    for items in (1..=100u32)
        .generator()
        .collect_with::<_, Vec<u32>>(same(5))
        .unique()
        .samples(COUNT)
    {
        assert!(items.len() <= 5);
        assert!(all_distinct(&items));
    }
}

#[test]
fn full_size_lists_reach_their_count() {
    let items = (1..=100u32)
        .generator()
        .collect_with::<_, Vec<u32>>(same(5))
        .unique()
        .sample(1.0);
    assert_eq!(items.len(), 5);
    assert!(all_distinct(&items));
}

#[test]
fn gives_up_on_unsatisfiable_counts() {
    for items in (1..=3u32)
        .generator()
        .collect_with::<_, Vec<u32>>(same(5))
        .unique()
        .samples(COUNT)
    {
        assert!(items.len() <= 3);
        assert!(all_distinct(&items));
    }
}

#[test]
fn constant_keys_cap_containers() {
    for items in (0..=100u32)
        .generator()
        .collect_with::<_, Vec<u32>>(same(4))
        .unique_by(|_: &u32| 0u8)
        .samples(COUNT)
    {
        assert!(items.len() <= 1);
    }
}

#[test]
fn shrinking_preserves_distinct_elements() {
    let generator = (1..=100u32)
        .generator()
        .collect_with::<_, Vec<u32>>(same(3))
        .unique();
    let error = generator
        .check(COUNT, |items| items.len() < 3)
        .err()
        .unwrap();
    let items = error.shrunk();
    assert_eq!(items.len(), 3);
    assert!(all_distinct(items));
}

#[test]
fn sequences_have_distinct_elements() {
    for sequence in (1..=100u32)
        .generator()
        .sequence_with(same(4))
        .unique()
        .samples(COUNT)
    {
        let items: Vec<u32> = sequence.collect();
        assert!(all_distinct(&items));
    }
}

#[test]
fn extractor_keys_decide_collisions() {
    // Two values with the same parity collide under a parity key.
    for items in (0..=100u32)
        .generator()
        .collect_with::<_, Vec<u32>>(same(2))
        .unique_by(|value: &u32| value % 2)
        .samples(COUNT)
    {
        if items.len() == 2 {
            assert_ne!(items[0] % 2, items[1] % 2);
        }
    }
}

#[test]
fn rejects_colliding_containers() {
    // No native element loop behind `distinct`: whole containers are
    // filtered after the fact, so only collision-free lists survive.
    let generator = of([1, 2, 3])
        .collect_with::<_, Vec<i32>>((0..=5usize).generator())
        .distinct();
    let mut retained = 0;
    for items in generator.samples(COUNT) {
        if let Some(items) = items {
            assert!(items.len() <= 3);
            assert!(all_distinct(&items));
            retained += 1;
        }
    }
    assert!(retained > 0);
}

#[test]
fn rewraps_one_shot_sequences() {
    let generator = unique::rewrap(
        (1..=3u32).generator().sequence_with((0..=5usize).generator()),
        |value: &u32| *value,
    );
    let mut checked = 0;
    for index in 0..COUNT {
        let mut state = State::new(index, COUNT, 0.0..1.0, 11);
        let shrinker = generator.generate(&mut state);
        let Some(first) = shrinker.item() else {
            continue;
        };
        let once: Vec<u32> = first.collect();
        assert!(once.len() <= 3);
        assert!(all_distinct(&once));
        // A second instance from the same shrinker is independently
        // consumable and yields the same elements in the same order.
        let again: Vec<u32> = shrinker.item().unwrap().collect();
        assert_eq!(once, again);
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn unique_edges_stay_distinct() {
    let generator = (0..=9u32)
        .generator()
        .collect_with::<_, Vec<u32>>(same(2))
        .unique();
    for shrinker in generator.edges().iter() {
        assert!(all_distinct(&shrinker.item()));
    }
}
