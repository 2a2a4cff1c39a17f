use crate::{
    distance::Distance,
    generate::{FullGenerate, Generate, IntoGenerate},
    shrink::{self, Candidates, Shrink},
    state::State,
    tuples,
};
use core::array;

/// A compound shrinker over an ordered set of independently-shrinkable parts.
///
/// Candidates are produced one part index at a time, in ascending index
/// order: every candidate differs from the original in exactly one part, and
/// all candidates for index 0 are offered before any for index 1. The
/// distance is the concatenation of the part distances in index order.
#[derive(Clone, Debug)]
pub struct Shrinker<S: ?Sized>(pub(crate) S);

/// Generates `N` items from a single generator.
#[derive(Clone, Debug)]
pub struct Array<G: ?Sized, const N: usize>(pub G);

impl<G: Generate, const N: usize> Generate for Array<G, N> {
    type Item = [G::Item; N];
    type Shrink = Shrinker<[G::Shrink; N]>;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        Shrinker(array::from_fn(|_| self.0.generate(state)))
    }

    fn constant(&self) -> bool {
        self.0.constant()
    }
}

impl<G: FullGenerate, const N: usize> FullGenerate for [G; N] {
    type Item = [G::Item; N];
    type Generate = [G::Generate; N];

    fn generator() -> Self::Generate {
        array::from_fn(|_| G::generator())
    }
}

impl<G: IntoGenerate, const N: usize> IntoGenerate for [G; N] {
    type Item = [G::Item; N];
    type Generate = [G::Generate; N];

    fn generator(self) -> Self::Generate {
        self.map(G::generator)
    }
}

impl<G: Generate, const N: usize> Generate for [G; N] {
    type Item = [G::Item; N];
    type Shrink = Shrinker<[G::Shrink; N]>;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        Shrinker(array::from_fn(|index| self[index].generate(state)))
    }

    fn constant(&self) -> bool {
        self.iter().all(G::constant)
    }
}

impl<S: Shrink, const N: usize> Shrink for Shrinker<[S; N]> {
    type Item = [S::Item; N];

    fn item(&self) -> Self::Item {
        array::from_fn(|index| self.0[index].item())
    }

    fn distance(&self) -> Distance {
        Distance::combine(self.0.iter().map(S::distance))
    }

    fn shrink(&self) -> Candidates<Self> {
        let this = self.clone();
        Box::new((0..N).flat_map(move |index| {
            let parts = this.0.clone();
            let candidates = parts[index].shrink();
            candidates.map(move |candidate| {
                let mut parts = parts.clone();
                parts[index] = candidate;
                Shrinker(parts)
            })
        }))
    }
}

impl<G: Generate> Generate for Vec<G> {
    type Item = Vec<G::Item>;
    type Shrink = Shrinker<Vec<G::Shrink>>;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        Shrinker(
            self.iter()
                .map(|generator| generator.generate(state))
                .collect(),
        )
    }

    fn constant(&self) -> bool {
        self.iter().all(G::constant)
    }
}

impl<S: Shrink> Shrink for Shrinker<Vec<S>> {
    type Item = Vec<S::Item>;

    fn item(&self) -> Self::Item {
        self.0.iter().map(S::item).collect()
    }

    fn distance(&self) -> Distance {
        Distance::combine(self.0.iter().map(S::distance))
    }

    fn shrink(&self) -> Candidates<Self> {
        let this = self.clone();
        Box::new((0..self.0.len()).flat_map(move |index| {
            let parts = this.0.clone();
            let candidates = parts[index].shrink();
            candidates.map(move |candidate| {
                let mut parts = parts.clone();
                parts[index] = candidate;
                Shrinker(parts)
            })
        }))
    }
}

macro_rules! tuple {
    ($n:ident, $c:tt) => {
        impl FullGenerate for () {
            type Item = ();
            type Generate = ();

            fn generator() -> Self::Generate {}
        }

        impl IntoGenerate for () {
            type Item = ();
            type Generate = ();

            fn generator(self) -> Self::Generate {}
        }

        impl Generate for () {
            type Item = ();
            type Shrink = Shrinker<()>;

            fn generate(&self, _: &mut State) -> Self::Shrink {
                Shrinker(())
            }

            fn constant(&self) -> bool {
                true
            }
        }

        impl Shrink for Shrinker<()> {
            type Item = ();

            fn item(&self) -> Self::Item {}

            fn distance(&self) -> Distance {
                Distance::ZERO
            }

            fn shrink(&self) -> Candidates<Self> {
                shrink::none()
            }
        }
    };
    ($n:ident, $c:tt $(,$p:ident, $t:ident, $i:tt)*) => {
        impl<$($t: FullGenerate,)*> FullGenerate for ($($t,)*) {
            type Item = ($($t::Item,)*);
            type Generate = ($($t::Generate,)*);

            fn generator() -> Self::Generate {
                ($($t::generator(),)*)
            }
        }

        impl<$($t: IntoGenerate,)*> IntoGenerate for ($($t,)*) {
            type Item = ($($t::Item,)*);
            type Generate = ($($t::Generate,)*);

            fn generator(self) -> Self::Generate {
                ($(self.$i.generator(),)*)
            }
        }

        impl<$($t: Generate,)*> Generate for ($($t,)*) {
            type Item = ($($t::Item,)*);
            type Shrink = Shrinker<($($t::Shrink,)*)>;

            fn generate(&self, _state: &mut State) -> Self::Shrink {
                Shrinker(($(self.$i.generate(_state),)*))
            }

            fn constant(&self) -> bool {
                $(self.$i.constant() &&)* true
            }
        }

        impl<$($t: Shrink,)*> Shrink for Shrinker<($($t,)*)> {
            type Item = ($($t::Item,)*);

            fn item(&self) -> Self::Item {
                ($(self.0.$i.item(),)*)
            }

            fn distance(&self) -> Distance {
                Distance::ZERO $(.append(self.0.$i.distance()))*
            }

            fn shrink(&self) -> Candidates<Self> {
                let candidates: Candidates<Self> = shrink::none();
                $(
                    let part = self.0.$i.shrink();
                    let this = self.clone();
                    let candidates: Candidates<Self> =
                        Box::new(candidates.chain(part.map(move |candidate| {
                            let mut parts = this.0.clone();
                            parts.$i = candidate;
                            Shrinker(parts)
                        })));
                )*
                candidates
            }
        }
    };
}

tuples!(tuple);
