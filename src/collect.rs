use crate::{
    distance::Distance,
    edges::{Edges, Supplier},
    generate::{FullGenerate, Generate},
    primitive::Range,
    shrink::{self, Candidates, Shrink},
    state::State,
};
use core::marker::PhantomData;
use std::iter::FromIterator;

/// A generator of container sizes. The minimum bound is respected while
/// shrinking: a container never shrinks below it.
pub trait Count: Generate<Item = usize> {
    fn minimum(&self) -> usize;
    fn maximum(&self) -> usize;
}

impl Count for Range<usize> {
    fn minimum(&self) -> usize {
        self.start()
    }

    fn maximum(&self) -> usize {
        self.end()
    }
}

/// Generates a container of items from an element generator and a count
/// generator, assembled through [`FromIterator`].
#[derive(Debug)]
pub struct Collect<G, C, F: ?Sized> {
    _marker: PhantomData<F>,
    pub(crate) count: C,
    pub(crate) element: G,
}

#[derive(Debug)]
pub struct Shrinker<S, F: ?Sized> {
    pub(crate) shrinkers: Vec<S>,
    pub(crate) minimum: usize,
    _marker: PhantomData<F>,
}

impl<G: Generate, C: Count, F: FromIterator<G::Item>> Collect<G, C, F> {
    pub const fn new(element: G, count: C) -> Self {
        Self {
            _marker: PhantomData,
            count,
            element,
        }
    }
}

impl<S, F: ?Sized> Shrinker<S, F> {
    pub(crate) const fn new(shrinkers: Vec<S>, minimum: usize) -> Self {
        Self {
            shrinkers,
            minimum,
            _marker: PhantomData,
        }
    }
}

impl<G: Clone, C: Clone, F> Clone for Collect<G, C, F> {
    fn clone(&self) -> Self {
        Self {
            _marker: PhantomData,
            count: self.count.clone(),
            element: self.element.clone(),
        }
    }
}

impl<S: Clone, F: ?Sized> Clone for Shrinker<S, F> {
    fn clone(&self) -> Self {
        Self {
            shrinkers: self.shrinkers.clone(),
            minimum: self.minimum,
            _marker: PhantomData,
        }
    }
}

impl<G: Generate, C: Count, F: FromIterator<G::Item> + 'static> Generate for Collect<G, C, F> {
    type Item = F;
    type Shrink = Shrinker<G::Shrink, F>;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        let count = self.count.generate(state).item();
        let shrinkers = (0..count).map(|_| self.element.generate(state)).collect();
        Shrinker::new(shrinkers, self.count.minimum())
    }

    // The empty container (when the count allows it) and minimum-size fills
    // of each element boundary value.
    fn edges(&self) -> Edges<Self::Shrink> {
        let minimum = self.count.minimum();
        let maximum = self.count.maximum();
        let mut suppliers = Vec::new();
        if minimum == 0 {
            suppliers.push(Supplier::new(move || Shrinker::new(Vec::new(), minimum)));
        }
        if maximum > 0 {
            let fill = minimum.max(1);
            for element in self.element.edges().suppliers() {
                let element = element.clone();
                suppliers.push(Supplier::new(move || {
                    Shrinker::new((0..fill).map(|_| element.get()).collect(), minimum)
                }));
            }
        }
        Edges::from_suppliers(suppliers)
    }

    fn constant(&self) -> bool {
        self.count.constant() && (self.element.constant() || self.count.maximum() == 0)
    }
}

impl<S: Shrink, F: FromIterator<S::Item> + 'static> Shrink for Shrinker<S, F> {
    type Item = F;

    fn item(&self) -> Self::Item {
        self.shrinkers.iter().map(S::item).collect()
    }

    fn distance(&self) -> Distance {
        Distance::of(self.shrinkers.len() as u64)
            .append(Distance::combine(self.shrinkers.iter().map(S::distance)))
    }

    fn shrink(&self) -> Candidates<Self> {
        // Drop elements one at a time first, then shrink the elements, one
        // index at a time.
        let removals: Candidates<Self> = if self.shrinkers.len() > self.minimum {
            let this = self.clone();
            Box::new((0..self.shrinkers.len()).map(move |index| {
                let mut shrinkers = this.shrinkers.clone();
                shrinkers.remove(index);
                Self::new(shrinkers, this.minimum)
            }))
        } else {
            shrink::none()
        };
        let this = self.clone();
        let elements = (0..self.shrinkers.len()).flat_map(move |index| {
            let shrinkers = this.shrinkers.clone();
            let minimum = this.minimum;
            let candidates = shrinkers[index].shrink();
            candidates.map(move |candidate| {
                let mut shrinkers = shrinkers.clone();
                shrinkers[index] = candidate;
                Self::new(shrinkers, minimum)
            })
        });
        Box::new(removals.chain(elements))
    }
}

impl<G: FullGenerate> FullGenerate for Vec<G>
where
    G::Item: 'static,
{
    type Item = Vec<G::Item>;
    type Generate = Collect<G::Generate, Range<usize>, Self::Item>;

    fn generator() -> Self::Generate {
        G::generator().collect()
    }
}

impl FullGenerate for String {
    type Item = Self;
    type Generate = Collect<<char as FullGenerate>::Generate, Range<usize>, Self::Item>;

    fn generator() -> Self::Generate {
        char::generator().collect()
    }
}
