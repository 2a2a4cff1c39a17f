use crate::{
    distance::Distance,
    edges::{Edges, Supplier},
    generate::Generate,
    shrink::{Candidates, Shrink},
    state::State,
};

#[derive(Clone, Debug)]
pub struct Flatten<G: ?Sized>(pub G);

/// Shrinker for a generator chosen by another generated value.
///
/// The pre-generation `state` is kept so that shrinking the outer value can
/// re-generate the inner one deterministically from the same random sequence.
#[derive(Clone, Debug)]
pub struct Shrinker<I, O> {
    state: State,
    inner: I,
    outer: O,
}

impl<G: Generate + ?Sized> Generate for Flatten<G>
where
    G::Item: Generate,
{
    type Item = <G::Item as Generate>::Item;
    type Shrink = Shrinker<<G::Item as Generate>::Shrink, G::Shrink>;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        let old = state.clone();
        let outer = self.0.generate(state);
        let inner = outer.item().generate(state);
        Shrinker {
            state: old,
            inner,
            outer,
        }
    }

    // The catalogue is the union, over each boundary value of the outer
    // generator, of the boundary values of the inner generator that outer
    // value selects.
    fn edges(&self) -> Edges<Self::Shrink> {
        let mut suppliers = Vec::new();
        for outer in self.0.edges().suppliers() {
            let domain = outer.get().item();
            for inner in domain.edges().suppliers() {
                let outer = outer.clone();
                let inner = inner.clone();
                suppliers.push(Supplier::new(move || Shrinker {
                    state: State::new(0, 1, 0.0..0.0, 0),
                    inner: inner.get(),
                    outer: outer.get(),
                }));
            }
        }
        Edges::from_suppliers(suppliers)
    }

    fn constant(&self) -> bool {
        self.0.constant()
    }
}

impl<I: Shrink, O: Shrink> Shrink for Shrinker<I, O>
where
    O::Item: Generate<Shrink = I>,
{
    type Item = I::Item;

    fn item(&self) -> Self::Item {
        self.inner.item()
    }

    fn distance(&self) -> Distance {
        self.outer.distance().append(self.inner.distance())
    }

    fn shrink(&self) -> Candidates<Self> {
        let this = self.clone();
        let outers = self.outer.shrink().map(move |outer| {
            let mut state = this.state.clone();
            let inner = outer.item().generate(&mut state);
            Self {
                state: this.state.clone(),
                inner,
                outer,
            }
        });
        let this = self.clone();
        let inners = self.inner.shrink().map(move |inner| Self {
            state: this.state.clone(),
            inner,
            outer: this.outer.clone(),
        });
        Box::new(outers.chain(inners))
    }
}
