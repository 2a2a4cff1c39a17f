use crate::{
    collect::Count,
    distance::Distance,
    edges::{Edges, Supplier},
    generate::Generate,
    shrink::{self, Candidates, Shrink},
    state::State,
};

/// A generator that always produces the same value and never shrinks.
#[derive(Clone, Debug)]
pub struct Same<T: ?Sized>(pub(crate) T);

impl<T: Clone + 'static> Generate for Same<T> {
    type Item = T;
    type Shrink = Self;

    fn generate(&self, _: &mut State) -> Self::Shrink {
        self.clone()
    }

    fn edges(&self) -> Edges<Self::Shrink> {
        let this = self.clone();
        Edges::from_suppliers(vec![Supplier::new(move || this.clone())])
    }

    fn constant(&self) -> bool {
        true
    }
}

impl<T: Clone + 'static> Shrink for Same<T> {
    type Item = T;

    fn item(&self) -> Self::Item {
        self.0.clone()
    }

    fn distance(&self) -> Distance {
        Distance::ZERO
    }

    fn shrink(&self) -> Candidates<Self> {
        shrink::none()
    }
}

impl Count for Same<usize> {
    fn minimum(&self) -> usize {
        self.0
    }

    fn maximum(&self) -> usize {
        self.0
    }
}
