use crate::{
    distance::Distance,
    edges::Edges,
    generate::Generate,
    shrink::{Candidates, Shrink},
    state::State,
};
use core::any::Any;

/// A type-erased generator, for storing differently-typed generators of the
/// same item type together.
pub struct Generator<I> {
    inner: Box<dyn Any>,
    generate: fn(&dyn Any, &mut State) -> Shrinker<I>,
    edges: fn(&dyn Any) -> Edges<Shrinker<I>>,
    constant: fn(&dyn Any) -> bool,
}

pub struct Shrinker<I> {
    inner: Box<dyn Any>,
    clone: fn(&dyn Any) -> Box<dyn Any>,
    item: fn(&dyn Any) -> I,
    distance: fn(&dyn Any) -> Distance,
    shrink: fn(&dyn Any) -> Candidates<Shrinker<I>>,
}

impl<I: 'static> Generator<I> {
    pub(crate) fn new<G: Generate<Item = I> + 'static>(generator: G) -> Self {
        Self {
            inner: Box::new(generator),
            generate: |inner, state| {
                Shrinker::new(inner.downcast_ref::<G>().unwrap().generate(state))
            },
            edges: |inner| {
                inner
                    .downcast_ref::<G>()
                    .unwrap()
                    .edges()
                    .transform(|shrinker| Shrinker::new(shrinker))
            },
            constant: |inner| inner.downcast_ref::<G>().unwrap().constant(),
        }
    }
}

impl<I: 'static> Generate for Generator<I> {
    type Item = I;
    type Shrink = Shrinker<I>;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        (self.generate)(self.inner.as_ref(), state)
    }

    fn edges(&self) -> Edges<Self::Shrink> {
        (self.edges)(self.inner.as_ref())
    }

    fn constant(&self) -> bool {
        (self.constant)(self.inner.as_ref())
    }
}

impl<I: 'static> Shrinker<I> {
    pub(crate) fn new<S: Shrink<Item = I>>(shrinker: S) -> Self {
        Self {
            inner: Box::new(shrinker),
            clone: |inner| Box::new(inner.downcast_ref::<S>().unwrap().clone()),
            item: |inner| inner.downcast_ref::<S>().unwrap().item(),
            distance: |inner| inner.downcast_ref::<S>().unwrap().distance(),
            shrink: |inner| {
                Box::new(
                    inner
                        .downcast_ref::<S>()
                        .unwrap()
                        .shrink()
                        .map(Shrinker::new),
                )
            },
        }
    }
}

impl<I> Clone for Shrinker<I> {
    fn clone(&self) -> Self {
        Self {
            inner: (self.clone)(self.inner.as_ref()),
            clone: self.clone,
            item: self.item,
            distance: self.distance,
            shrink: self.shrink,
        }
    }
}

impl<I: 'static> Shrink for Shrinker<I> {
    type Item = I;

    fn item(&self) -> Self::Item {
        (self.item)(self.inner.as_ref())
    }

    fn distance(&self) -> Distance {
        (self.distance)(self.inner.as_ref())
    }

    fn shrink(&self) -> Candidates<Self> {
        (self.shrink)(self.inner.as_ref())
    }
}
