use crate::{
    distance::Distance,
    edges::Edges,
    generate::Generate,
    shrink::{self, Candidates, Shrink},
    state::State,
};

/// Keeps generated values as-is by disabling shrinking.
#[derive(Clone, Debug)]
pub struct Keep<G: ?Sized>(pub G);

#[derive(Clone, Debug)]
pub struct Shrinker<S>(S);

impl<G: Generate + ?Sized> Generate for Keep<G> {
    type Item = G::Item;
    type Shrink = Shrinker<G::Shrink>;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        Shrinker(self.0.generate(state))
    }

    fn edges(&self) -> Edges<Self::Shrink> {
        self.0.edges().transform(Shrinker)
    }

    fn constant(&self) -> bool {
        self.0.constant()
    }
}

impl<S: Shrink> Shrink for Shrinker<S> {
    type Item = S::Item;

    fn item(&self) -> Self::Item {
        self.0.item()
    }

    fn distance(&self) -> Distance {
        self.0.distance()
    }

    fn shrink(&self) -> Candidates<Self> {
        shrink::none()
    }
}
