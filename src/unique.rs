use crate::{
    collect::{self, Collect, Count},
    distance::Distance,
    edges::Edges,
    generate::Generate,
    sequence::{self, OneShot, Sequence},
    shrink::{Candidates, Shrink},
    state::State,
};
use core::{hash::Hash, iter};
use std::{
    collections::{BTreeSet, HashSet, VecDeque},
    iter::FromIterator,
};

/// Derives the comparison key that decides whether two container elements
/// collide.
///
/// The core never constructs extractors itself; whoever configures a
/// uniqueness constraint builds the extractor (a plain value, usually a
/// closure) and passes it in.
pub trait Extract<E> {
    type Key: Eq + Hash;

    fn extract(&self, element: &E) -> Self::Key;
}

/// The default extractor: every element is its own key.
pub type Identity<E> = fn(&E) -> E;

pub(crate) fn identity<E: Clone>(element: &E) -> E {
    element.clone()
}

impl<E, K: Eq + Hash, F: Fn(&E) -> K> Extract<E> for F {
    type Key = K;

    fn extract(&self, element: &E) -> Self::Key {
        self(element)
    }
}

pub(crate) fn distinct<'a, E: 'a, X: Extract<E>>(
    items: impl IntoIterator<Item = &'a E>,
    extractor: &X,
) -> bool {
    let mut keys = HashSet::new();
    items
        .into_iter()
        .all(|item| keys.insert(extractor.extract(item)))
}

/// Container values whose elements can be inspected for key collisions after
/// the whole container was generated. This backs the post-hoc filtering path
/// of [`Generate::distinct_by`] for generators with no native element loop.
pub trait Keys {
    type Element;

    fn distinct<X: Extract<Self::Element>>(&self, extractor: &X) -> bool;
}

macro_rules! keys {
    ($t:ty) => {
        impl<T> Keys for $t {
            type Element = T;

            fn distinct<X: Extract<T>>(&self, extractor: &X) -> bool {
                distinct(self, extractor)
            }
        }
    };
}

keys!(Vec<T>);
keys!(VecDeque<T>);
keys!(Box<[T]>);
keys!(BTreeSet<T>);
keys!(HashSet<T>);

impl<T, const N: usize> Keys for [T; N] {
    type Element = T;

    fn distinct<X: Extract<T>>(&self, extractor: &X) -> bool {
        distinct(self, extractor)
    }
}

/// Container-shaped generators that can enforce key uniqueness inside their
/// own element loop, retrying colliding elements instead of regenerating the
/// whole container.
pub trait Elements: Generate {
    type Element;

    fn generate_unique<X: Extract<Self::Element>>(
        &self,
        state: &mut State,
        extractor: &X,
        retries: usize,
    ) -> Self::Shrink;
}

/// Container shrinkers that expose their current element values, so shrink
/// candidates can be re-checked against a uniqueness constraint.
pub trait Parts: Shrink {
    type Element;

    fn parts(&self) -> Vec<Self::Element>;
}

impl<G: Generate, C: Count, F: FromIterator<G::Item> + 'static> Elements for Collect<G, C, F> {
    type Element = G::Item;

    fn generate_unique<X: Extract<G::Item>>(
        &self,
        state: &mut State,
        extractor: &X,
        retries: usize,
    ) -> Self::Shrink {
        let count = self.count.generate(state).item();
        let mut keys = HashSet::new();
        let mut misses = 0;
        let mut shrinkers = Vec::with_capacity(count);
        while shrinkers.len() < count {
            let shrinker = self.element.generate(state);
            if keys.insert(extractor.extract(&shrinker.item())) {
                shrinkers.push(shrinker);
            } else {
                misses += 1;
                if misses >= retries {
                    // Give up on reaching the requested count; the container
                    // keeps the elements collected so far.
                    break;
                }
            }
        }
        collect::Shrinker::new(shrinkers, self.count.minimum())
    }
}

impl<S: Shrink, F: FromIterator<S::Item> + 'static> Parts for collect::Shrinker<S, F> {
    type Element = S::Item;

    fn parts(&self) -> Vec<Self::Element> {
        self.shrinkers.iter().map(S::item).collect()
    }
}

impl<G: Generate, C: Count> Elements for Sequence<G, C>
where
    G::Item: 'static,
{
    type Element = G::Item;

    fn generate_unique<X: Extract<G::Item>>(
        &self,
        state: &mut State,
        extractor: &X,
        retries: usize,
    ) -> Self::Shrink {
        sequence::Shrinker(self.inner.generate_unique(state, extractor, retries))
    }
}

impl<S: Shrink> Parts for sequence::Shrinker<S> {
    type Element = S::Item;

    fn parts(&self) -> Vec<Self::Element> {
        self.0.parts()
    }
}

/// A container generator constrained so that no two elements of a generated
/// container share an extracted key.
#[derive(Clone, Debug)]
pub struct Unique<G, X> {
    generator: G,
    extractor: X,
    retries: usize,
}

#[derive(Clone, Debug)]
pub struct Shrinker<S, X> {
    shrinker: S,
    extractor: X,
}

impl<G: Elements, X: Extract<G::Element>> Unique<G, X> {
    pub const fn new(generator: G, extractor: X, retries: usize) -> Self {
        Self {
            generator,
            extractor,
            retries,
        }
    }
}

impl<G: Elements, X: Extract<G::Element> + Clone + 'static> Generate for Unique<G, X>
where
    G::Shrink: Parts<Element = G::Element>,
{
    type Item = G::Item;
    type Shrink = Shrinker<G::Shrink, X>;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        Shrinker {
            shrinker: self
                .generator
                .generate_unique(state, &self.extractor, self.retries),
            extractor: self.extractor.clone(),
        }
    }

    fn edges(&self) -> Edges<Self::Shrink> {
        let extractor = self.extractor.clone();
        let retained = self.generator.edges().retain({
            let extractor = extractor.clone();
            move |shrinker| distinct(&shrinker.parts(), &extractor)
        });
        retained.transform(move |shrinker| Shrinker {
            shrinker,
            extractor: extractor.clone(),
        })
    }

    fn constant(&self) -> bool {
        self.generator.constant()
    }
}

impl<S: Parts, X: Extract<S::Element> + Clone + 'static> Shrink for Shrinker<S, X> {
    type Item = S::Item;

    fn item(&self) -> Self::Item {
        self.shrinker.item()
    }

    fn distance(&self) -> Distance {
        self.shrinker.distance()
    }

    fn shrink(&self) -> Candidates<Self> {
        let extractor = self.extractor.clone();
        Box::new(
            self.shrinker
                .shrink()
                .flat_map(move |candidate| descend(candidate, extractor.clone())),
        )
    }
}

// Dropping an element can never introduce a collision, but shrinking one
// can; colliding candidates are skipped and their own candidates offered
// instead.
fn descend<S: Parts, X: Extract<S::Element> + Clone + 'static>(
    candidate: S,
    extractor: X,
) -> Candidates<Shrinker<S, X>> {
    if distinct(&candidate.parts(), &extractor) {
        Box::new(iter::once(Shrinker {
            shrinker: candidate,
            extractor,
        }))
    } else {
        Box::new(
            candidate
                .shrink()
                .flat_map(move |candidate| descend(candidate, extractor.clone())),
        )
    }
}

/// Uniqueness for generators of one-pass sequences with no native element
/// loop.
///
/// The produced sequence is materialized into an ordered list (which consumes
/// it), the list is filtered on its extracted keys, and the retained list is
/// re-exposed as a fresh [`OneShot`] on every access, so the uniqueness check
/// never starves the consumer of the generated value. Exhausting the retry
/// budget yields `None`, as with [`Generate::filter`].
pub fn rewrap<T, G, X>(generator: G, extractor: X) -> impl Generate<Item = Option<OneShot<T>>>
where
    T: 'static,
    G: Generate<Item = OneShot<T>>,
    X: Extract<T> + Clone + 'static,
{
    generator
        .map(|sequence| sequence.collect::<Vec<_>>())
        .filter(move |items| distinct(items, &extractor))
        .map(|items| items.map(OneShot::new))
}
