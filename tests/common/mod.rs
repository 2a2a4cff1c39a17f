pub use shrivel::{check::Cause, *};

pub const COUNT: usize = 1000;

/// Shrinks `shrinker` as if every value falsified the property: the first
/// candidate is adopted at every step until none is left.
pub fn converge<S: Shrink>(mut shrinker: S) -> S {
    loop {
        match shrinker.shrink().next() {
            Some(candidate) => shrinker = candidate,
            None => break shrinker,
        }
    }
}

pub fn all_distinct<T: Clone + Eq + std::hash::Hash>(items: &[T]) -> bool {
    let mut keys = std::collections::HashSet::new();
    items.iter().all(|item| keys.insert(item.clone()))
}
