use crate::{
    distance::Distance,
    edges::{Edges, Supplier},
    generate::Generate,
    shrink::{Candidates, Shrink},
    state::State,
};
use std::sync::Arc;

/// Picks one of an explicit list of values.
///
/// Shrinking moves the chosen index toward the first value, so earlier values
/// are considered simpler; the distance is the chosen index.
#[derive(Debug)]
pub struct Choose<T> {
    values: Arc<[T]>,
}

#[derive(Debug)]
pub struct Shrinker<T> {
    values: Arc<[T]>,
    index: usize,
}

impl<T> Choose<T> {
    pub fn new(values: Vec<T>) -> Self {
        assert!(!values.is_empty(), "at least one value is required");
        Self {
            values: values.into(),
        }
    }
}

impl<T> Clone for Choose<T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
        }
    }
}

impl<T> Clone for Shrinker<T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            index: self.index,
        }
    }
}

impl<T: Clone + 'static> Generate for Choose<T> {
    type Item = T;
    type Shrink = Shrinker<T>;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        Shrinker {
            values: self.values.clone(),
            index: state.random().usize(0..self.values.len()),
        }
    }

    fn edges(&self) -> Edges<Self::Shrink> {
        let mut indices = vec![0];
        if self.values.len() > 1 {
            indices.push(self.values.len() - 1);
        }
        Edges::from_suppliers(
            indices
                .into_iter()
                .map(|index| {
                    let values = self.values.clone();
                    Supplier::new(move || Shrinker {
                        values: values.clone(),
                        index,
                    })
                })
                .collect(),
        )
    }

    fn constant(&self) -> bool {
        self.values.len() == 1
    }
}

impl<T: Clone + 'static> Shrink for Shrinker<T> {
    type Item = T;

    fn item(&self) -> Self::Item {
        self.values[self.index].clone()
    }

    fn distance(&self) -> Distance {
        Distance::of(self.index as u64)
    }

    fn shrink(&self) -> Candidates<Self> {
        let this = self.clone();
        Box::new((0..self.index).map(move |index| Self {
            values: this.values.clone(),
            index,
        }))
    }
}
