use crate::{
    distance::Distance,
    edges::Edges,
    generate::Generate,
    shrink::{self, Candidates, Shrink},
    state::State,
};
use core::iter;

#[derive(Clone, Debug)]
pub struct Filter<G: ?Sized, F> {
    filter: F,
    retries: usize,
    generator: G,
}

#[derive(Clone, Debug)]
pub struct Shrinker<S, F> {
    shrinker: Option<S>,
    filter: F,
}

impl<G: Generate, F: Fn(&G::Item) -> bool + Clone> Filter<G, F> {
    pub const fn new(generator: G, filter: F, retries: usize) -> Self {
        Self {
            filter,
            retries,
            generator,
        }
    }
}

impl<G: Generate + ?Sized, F: Fn(&G::Item) -> bool + Clone + 'static> Generate for Filter<G, F> {
    type Item = Option<G::Item>;
    type Shrink = Shrinker<G::Shrink, F>;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        let mut shrinker = None;
        let size = state.size();
        let retries = self.retries.max(1);
        for retry in 0..retries {
            // Later retries search a larger portion of the domain.
            state.set_size(size + (1.0 - size) * (retry as f64 / retries as f64));
            let inner = self.generator.generate(state);
            if self.constant() || (self.filter)(&inner.item()) {
                shrinker = Some(inner);
                break;
            }
        }
        state.set_size(size);
        Shrinker {
            shrinker,
            filter: self.filter.clone(),
        }
    }

    fn edges(&self) -> Edges<Self::Shrink> {
        let filter = self.filter.clone();
        let retained = self.generator.edges().retain({
            let filter = filter.clone();
            move |shrinker| filter(&shrinker.item())
        });
        retained.transform(move |shrinker| Shrinker {
            shrinker: Some(shrinker),
            filter: filter.clone(),
        })
    }

    fn constant(&self) -> bool {
        self.retries == 0 || self.generator.constant()
    }
}

impl<S: Shrink, F: Fn(&S::Item) -> bool + Clone + 'static> Shrink for Shrinker<S, F> {
    type Item = Option<S::Item>;

    fn item(&self) -> Self::Item {
        self.shrinker
            .as_ref()
            .map(S::item)
            .filter(|item| (self.filter)(item))
    }

    fn distance(&self) -> Distance {
        self.shrinker.as_ref().map_or(Distance::ZERO, S::distance)
    }

    fn shrink(&self) -> Candidates<Self> {
        match &self.shrinker {
            None => shrink::none(),
            Some(shrinker) => {
                let filter = self.filter.clone();
                Box::new(
                    shrinker
                        .shrink()
                        .flat_map(move |candidate| descend(candidate, filter.clone())),
                )
            }
        }
    }
}

// A candidate that fails the filter is skipped, not aborted: its own
// candidates are offered in its place, so shrinking continues past rejected
// values to still-simpler ones.
fn descend<S: Shrink, F: Fn(&S::Item) -> bool + Clone + 'static>(
    candidate: S,
    filter: F,
) -> Candidates<Shrinker<S, F>> {
    if filter(&candidate.item()) {
        Box::new(iter::once(Shrinker {
            shrinker: Some(candidate),
            filter,
        }))
    } else {
        Box::new(
            candidate
                .shrink()
                .flat_map(move |candidate| descend(candidate, filter.clone())),
        )
    }
}
