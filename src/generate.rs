use crate::{
    all::Array,
    any::Any,
    boxed,
    collect::{Collect, Count},
    edges::Edges,
    filter::Filter,
    flatten::Flatten,
    keep::Keep,
    map::Map,
    primitive::Range,
    sequence::Sequence,
    shrink::Shrink,
    state::State,
    unique::{self, Elements, Extract, Identity, Keys, Unique},
};
use core::hash::Hash;
use std::iter::FromIterator;

/// Number of attempts made by retrying combinators (filtering, uniqueness)
/// before they give up on the current trial.
pub const RETRIES: usize = 256;

pub(crate) const COLLECTS: usize = 256;

/// Types that have a canonical generator.
pub trait FullGenerate {
    type Item;
    type Generate: Generate<Item = Self::Item>;
    fn generator() -> Self::Generate;
}

/// Values that can be converted into a generator (ranges, tuples of
/// generators, explicit value collections, ...).
pub trait IntoGenerate {
    type Item;
    type Generate: Generate<Item = Self::Item>;
    fn generator(self) -> Self::Generate;
}

/// A description of a domain of values: how to produce a random shrinkable
/// value from a [`State`] and which boundary values the domain considers
/// noteworthy.
///
/// Generators are immutable; `generate` draws all of its randomness from the
/// provided `state` and returns a [`Shrink`] whose shrink tree is fully
/// deterministic from that point on.
pub trait Generate {
    type Item;
    type Shrink: Shrink<Item = Self::Item>;

    fn generate(&self, state: &mut State) -> Self::Shrink;

    /// The catalogue of boundary values of this generator. Defaults to none.
    fn edges(&self) -> Edges<Self::Shrink> {
        Edges::none()
    }

    /// `true` when this generator can only ever produce a single value.
    fn constant(&self) -> bool {
        false
    }

    fn map<T, F: Fn(Self::Item) -> T + Clone>(self, map: F) -> Map<Self, F>
    where
        Self: Sized,
    {
        Map::new(self, map)
    }

    /// Discards generated values that fail `filter`, retrying up to
    /// [`RETRIES`] times. Produces `None` when no accepted value was found, so
    /// an unsatisfiable filter shows up as a failed generation attempt rather
    /// than a hang.
    fn filter<F: Fn(&Self::Item) -> bool + Clone>(self, filter: F) -> Filter<Self, F>
    where
        Self: Sized,
    {
        self.filter_with(RETRIES, filter)
    }

    fn filter_with<F: Fn(&Self::Item) -> bool + Clone>(
        self,
        retries: usize,
        filter: F,
    ) -> Filter<Self, F>
    where
        Self: Sized,
    {
        Filter::new(self, filter, retries)
    }

    fn flat_map<G: Generate, F: Fn(Self::Item) -> G + Clone>(self, bind: F) -> Flatten<Map<Self, F>>
    where
        Self: Sized,
    {
        Flatten(Map::new(self, bind))
    }

    fn flatten(self) -> Flatten<Self>
    where
        Self: Sized,
        Self::Item: Generate,
    {
        Flatten(self)
    }

    fn any(self) -> Any<Self>
    where
        Self: Sized,
    {
        Any(self)
    }

    fn array<const N: usize>(self) -> Array<Self, N>
    where
        Self: Sized,
    {
        Array(self)
    }

    fn collect<F: FromIterator<Self::Item>>(self) -> Collect<Self, Range<usize>, F>
    where
        Self: Sized,
    {
        self.collect_with((0..COLLECTS).generator())
    }

    fn collect_with<C: Count, F: FromIterator<Self::Item>>(self, count: C) -> Collect<Self, C, F>
    where
        Self: Sized,
    {
        Collect::new(self, count)
    }

    /// A bounded sequence of items that can be traversed only once; every
    /// access to a generated value yields a fresh traversal.
    fn sequence(self) -> Sequence<Self, Range<usize>>
    where
        Self: Sized,
    {
        Sequence::new(self, (0..COLLECTS).generator())
    }

    fn sequence_with<C: Count>(self, count: C) -> Sequence<Self, C>
    where
        Self: Sized,
    {
        Sequence::new(self, count)
    }

    /// Constrains a container generator so that generated containers never
    /// hold two elements that are equal. See [`Generate::unique_by`].
    fn unique(self) -> Unique<Self, Identity<Self::Element>>
    where
        Self: Elements + Sized,
        Self::Element: Clone + Eq + Hash,
    {
        self.unique_by(unique::identity as Identity<Self::Element>)
    }

    /// Constrains a container generator so that generated containers never
    /// hold two elements with equal extracted keys. The container's own
    /// element loop retries colliding elements and gives up on reaching the
    /// requested size once [`RETRIES`] collisions have been seen.
    fn unique_by<X: Extract<Self::Element>>(self, extractor: X) -> Unique<Self, X>
    where
        Self: Elements + Sized,
    {
        Unique::new(self, extractor, RETRIES)
    }

    /// Uniqueness for generators of container values with no native element
    /// loop: the whole container is generated, its element keys are
    /// extracted, and the container is rejected on any key collision. A
    /// post-hoc [`Generate::filter`], with the same bounded retries and the
    /// same `None`-on-exhaustion outcome.
    fn distinct(self) -> impl Generate<Item = Option<Self::Item>>
    where
        Self: Sized,
        Self::Item: Keys,
        <Self::Item as Keys>::Element: Clone + Eq + Hash + 'static,
    {
        self.distinct_by(unique::identity as Identity<<Self::Item as Keys>::Element>)
    }

    fn distinct_by<X>(self, extractor: X) -> impl Generate<Item = Option<Self::Item>>
    where
        Self: Sized,
        Self::Item: Keys,
        X: Extract<<Self::Item as Keys>::Element> + Clone + 'static,
    {
        self.filter(move |item| item.distinct(&extractor))
    }

    /// Disables shrinking for this generator.
    fn keep(self) -> Keep<Self>
    where
        Self: Sized,
    {
        Keep(self)
    }

    /// Erases the concrete generator type.
    fn boxed(self) -> boxed::Generator<Self::Item>
    where
        Self: Sized + 'static,
    {
        boxed::Generator::new(self)
    }
}

impl<G: Generate + ?Sized> Generate for &G {
    type Item = G::Item;
    type Shrink = G::Shrink;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        (**self).generate(state)
    }

    fn edges(&self) -> Edges<Self::Shrink> {
        (**self).edges()
    }

    fn constant(&self) -> bool {
        (**self).constant()
    }
}

impl<G: Generate + ?Sized> Generate for &mut G {
    type Item = G::Item;
    type Shrink = G::Shrink;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        (**self).generate(state)
    }

    fn edges(&self) -> Edges<Self::Shrink> {
        (**self).edges()
    }

    fn constant(&self) -> bool {
        (**self).constant()
    }
}

impl<G: FullGenerate> FullGenerate for &G {
    type Item = G::Item;
    type Generate = G::Generate;

    fn generator() -> Self::Generate {
        G::generator()
    }
}

impl<G: IntoGenerate + Clone> IntoGenerate for &G {
    type Item = G::Item;
    type Generate = G::Generate;

    fn generator(self) -> Self::Generate {
        self.clone().generator()
    }
}
