pub mod common;
use common::*;
use shrivel::edges::Supplier;

#[test]
fn from_suppliers_is_restartable() {
    let edges = Edges::from_suppliers(vec![
        Supplier::new(|| same(42)),
        Supplier::new(|| same(49)),
    ]);
    let mut iterator = edges.iter();
    assert_eq!(iterator.next().unwrap().item(), 42);
    assert_eq!(iterator.next().unwrap().item(), 49);
    assert!(iterator.next().is_none());
    drop(iterator);
    let values: Vec<_> = edges.iter().map(|shrinker| shrinker.item()).collect();
    assert_eq!(values, [42, 49]);
}

#[test]
fn range_has_boundary_values() {
    let values: Vec<i32> = (10..=100)
        .generator()
        .towards(25)
        .edges()
        .iter()
        .map(|shrinker| shrinker.item())
        .collect();
    assert_eq!(values, [10, 100, 25, 24, 26]);
}

#[test]
fn choose_has_first_and_last() {
    let values: Vec<i32> = of([3, 1, 2])
        .edges()
        .iter()
        .map(|shrinker| shrinker.item())
        .collect();
    assert_eq!(values, [3, 2]);
}

#[test]
fn collect_fills_with_element_boundaries() {
    let values: Vec<String> = ('a'..='z')
        .generator()
        .collect_with::<_, String>(same(3))
        .edges()
        .iter()
        .map(|shrinker| shrinker.item())
        .collect();
    assert_eq!(values, ["aaa", "zzz"]);
}

#[test]
fn mapped_edges_can_be_shrunk() {
    let generator = (10..=100)
        .generator()
        .towards(25)
        .map(|value: i32| value.to_string());
    let edges = generator.edges();
    assert_eq!(edges.len(), 5);
    for shrinker in edges.iter() {
        assert_eq!(converge(shrinker).item(), "25");
    }
}

#[test]
fn filtered_edges_can_be_shrunk() {
    let generator = (0..=11).generator().filter(|value: &i32| value % 2 == 1);
    let edges = generator.edges();
    assert_eq!(edges.len(), 2);
    for shrinker in edges.iter() {
        assert_eq!(converge(shrinker).item(), Some(1));
    }
}

#[test]
fn flat_mapped_edges_can_be_shrunk() {
    let generator = of([1usize, 10])
        .flat_map(|length| ('a'..='z').generator().collect_with::<_, String>(same(length)));
    let edges = generator.edges();
    assert_eq!(edges.len(), 4);
    for shrinker in edges.iter() {
        assert_eq!(converge(shrinker).item(), "a");
    }
}

#[test]
fn boxed_keeps_boundary_values() {
    let values: Vec<i32> = (0..=9)
        .generator()
        .boxed()
        .edges()
        .iter()
        .map(|shrinker| shrinker.item())
        .collect();
    assert_eq!(values, [0, 9, 1]);
}
