use crate::{
    distance::Distance,
    edges::Edges,
    generate::{FullGenerate, Generate, IntoGenerate},
    shrink::{Candidates, Shrink},
    state::State,
    tuples,
};
use core::f64;

/// Picks one of several generators; heterogeneous generators produce an
/// [`orn`] union of their items. Shrinking stays within the chosen branch.
#[repr(transparent)]
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Any<T: ?Sized>(pub T);

/// A generator paired with a selection weight, for biased branch picks.
#[derive(Clone, PartialEq, PartialOrd, Debug)]
pub struct Weight<T: ?Sized> {
    weight: f64,
    value: T,
}

impl<T> Weight<T> {
    pub fn new(weight: f64, value: T) -> Self {
        assert!(weight.is_finite());
        assert!(weight > f64::EPSILON);
        Self { weight, value }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T: ?Sized> AsRef<T> for Any<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<G: FullGenerate + ?Sized> FullGenerate for Any<G>
where
    Any<G::Generate>: Generate,
{
    type Item = <Any<G::Generate> as Generate>::Item;
    type Generate = Any<G::Generate>;

    fn generator() -> Self::Generate {
        Any(G::generator())
    }
}

impl<G: IntoGenerate> IntoGenerate for Any<G>
where
    Any<G::Generate>: Generate,
{
    type Item = <Any<G::Generate> as Generate>::Item;
    type Generate = Any<G::Generate>;

    fn generator(self) -> Self::Generate {
        Any(self.0.generator())
    }
}

macro_rules! tuple {
    ($n:ident, $c:tt) => {};
    ($n:ident, $c:tt $(, $ps:ident, $ts:ident, $is:tt)+) => {
        impl<$($ts: Generate,)*> Generate for orn::$n::Or<$($ts,)*> {
            type Item = orn::$n::Or<$($ts::Item,)*>;
            type Shrink = orn::$n::Or<$($ts::Shrink,)*>;

            fn generate(&self, state: &mut State) -> Self::Shrink {
                match self {
                    $(Self::$ts(generator) => orn::$n::Or::$ts(generator.generate(state)),)*
                }
            }

            fn edges(&self) -> Edges<Self::Shrink> {
                match self {
                    $(Self::$ts(generator) => generator.edges().transform(orn::$n::Or::$ts),)*
                }
            }

            fn constant(&self) -> bool {
                match self {
                    $(Self::$ts(generator) => generator.constant(),)*
                }
            }
        }

        impl<$($ts: Shrink,)*> Shrink for orn::$n::Or<$($ts,)*> {
            type Item = orn::$n::Or<$($ts::Item,)*>;

            fn item(&self) -> Self::Item {
                match self {
                    $(Self::$ts(shrinker) => orn::$n::Or::$ts(shrinker.item()),)*
                }
            }

            fn distance(&self) -> Distance {
                match self {
                    $(Self::$ts(shrinker) => shrinker.distance(),)*
                }
            }

            fn shrink(&self) -> Candidates<Self> {
                match self {
                    $(Self::$ts(shrinker) => Box::new(shrinker.shrink().map(orn::$n::Or::$ts)),)*
                }
            }
        }

        impl<$($ts: Generate,)*> Generate for Any<($($ts,)*)> {
            type Item = orn::$n::Or<$($ts::Item,)*>;
            type Shrink = orn::$n::Or<$($ts::Shrink,)*>;

            fn generate(&self, state: &mut State) -> Self::Shrink {
                match state.random().u8(..$c) {
                    $($is => orn::$n::Or::$ts(self.0.$is.generate(state)),)*
                    _ => unreachable!(),
                }
            }

            fn edges(&self) -> Edges<Self::Shrink> {
                let edges = Edges::none();
                $(let edges = edges.merge(self.0.$is.edges().transform(orn::$n::Or::$ts));)*
                edges
            }

            fn constant(&self) -> bool {
                $c <= 1
            }
        }

        impl<$($ts: Generate,)*> Generate for ($(Weight<$ts>,)*) {
            type Item = orn::$n::Or<$($ts::Item,)*>;
            type Shrink = orn::$n::Or<$($ts::Shrink,)*>;

            fn generate(&self, state: &mut State) -> Self::Shrink {
                let _total = $(self.$is.weight.max(f64::EPSILON) +)* 0.0;
                assert!(_total.is_finite());
                let mut _weight = state.random().f64() * _total;
                $(
                    let Weight { weight, value } = &self.$is;
                    let weight = weight.max(f64::EPSILON);
                    if _weight < weight {
                        return orn::$n::Or::$ts(value.generate(state));
                    } else {
                        _weight -= weight;
                    }
                )*
                unreachable!("weights are finite and `> 0.0`");
            }

            fn edges(&self) -> Edges<Self::Shrink> {
                let edges = Edges::none();
                $(let edges = edges.merge(self.$is.value.edges().transform(orn::$n::Or::$ts));)*
                edges
            }

            fn constant(&self) -> bool {
                $c <= 1
            }
        }
    };
}

tuples!(tuple);
