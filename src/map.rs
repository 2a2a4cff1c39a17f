use crate::{
    distance::Distance,
    edges::Edges,
    generate::Generate,
    shrink::{Candidates, Shrink},
    state::State,
};

#[derive(Clone, Debug)]
pub struct Map<G: ?Sized, F> {
    map: F,
    generator: G,
}

#[derive(Clone, Debug)]
pub struct Shrinker<S, F> {
    map: F,
    shrinker: S,
}

impl<G: Generate, T, F: Fn(G::Item) -> T + Clone> Map<G, F> {
    pub const fn new(generator: G, map: F) -> Self {
        Self { map, generator }
    }
}

impl<G: Generate + ?Sized, T, F: Fn(G::Item) -> T + Clone + 'static> Generate for Map<G, F> {
    type Item = T;
    type Shrink = Shrinker<G::Shrink, F>;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        Shrinker {
            shrinker: self.generator.generate(state),
            map: self.map.clone(),
        }
    }

    fn edges(&self) -> Edges<Self::Shrink> {
        let map = self.map.clone();
        self.generator.edges().transform(move |shrinker| Shrinker {
            shrinker,
            map: map.clone(),
        })
    }

    fn constant(&self) -> bool {
        self.generator.constant()
    }
}

// The shrinker walks the untransformed tree and re-applies `map` at every
// step, so shrinking keeps making progress toward simpler pre-images even
// though only mapped values are visible outside.
impl<S: Shrink, T, F: Fn(S::Item) -> T + Clone + 'static> Shrink for Shrinker<S, F> {
    type Item = T;

    fn item(&self) -> Self::Item {
        (self.map)(self.shrinker.item())
    }

    fn distance(&self) -> Distance {
        self.shrinker.distance()
    }

    fn shrink(&self) -> Candidates<Self> {
        let map = self.map.clone();
        Box::new(self.shrinker.shrink().map(move |shrinker| Self {
            shrinker,
            map: map.clone(),
        }))
    }
}
