use crate::distance::Distance;
use core::iter;

/// A lazy, finite sequence of shrink candidates.
pub type Candidates<S> = Box<dyn Iterator<Item = S>>;

/// A value paired with its shrink candidates and its distance from the
/// simplest form the generator could have produced.
///
/// When a check fails, the failing value's shrinker is asked for candidates:
/// new shrinkers holding strictly simpler values that are re-checked in turn.
/// The process is key to making property testing effective, as it isolates
/// the failure and makes it easier to debug.
///
/// # Contract
///
/// - [`Shrink::item`] is deterministic and recomputed on every call; all
///   randomness was consumed during generation.
/// - [`Shrink::shrink`] returns a fresh, finite sequence each time it is
///   called; consuming the sequence has no effect on the owning shrinker and
///   two calls yield equivalent sequences.
/// - Every candidate reports a [`Shrink::distance`] strictly smaller than its
///   parent's, and candidates are ordered from simplest to least simple, so
///   that a falsifier walking the sequence adopts the simplest reproduction
///   first.
/// - Cloning a shrinker yields an independent, freshly traversable tree.
pub trait Shrink: Clone + 'static {
    type Item;

    /// The current value of this shrinker.
    fn item(&self) -> Self::Item;

    /// How far [`Shrink::item`] is from the simplest value of its domain.
    fn distance(&self) -> Distance;

    /// A fresh sequence of strictly simpler shrinkers.
    fn shrink(&self) -> Candidates<Self>;
}

pub(crate) fn none<S: 'static>() -> Candidates<S> {
    Box::new(iter::empty())
}
