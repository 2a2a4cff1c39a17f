use crate::shrink::Shrink;
use core::fmt;
use std::sync::Arc;

/// A zero-argument factory for a boundary value's shrinker.
///
/// Factories rather than materialized shrinkers: every call to
/// [`Supplier::get`] hands back an independent, freshly traversable shrink
/// tree, so the same catalogue can feed any number of falsifiers.
pub struct Supplier<S>(Arc<dyn Fn() -> S>);

/// The finite catalogue of boundary values of a generator.
///
/// The catalogue is restartable: [`Edges::iter`] may be called any number of
/// times and realizes a fresh shrinker per factory per iteration. Generator
/// combinators rewrite the catalogue so that a transformed generator still
/// reports correct, still-shrinkable boundary values.
pub struct Edges<S> {
    suppliers: Vec<Supplier<S>>,
}

impl<S> Supplier<S> {
    pub fn new<F: Fn() -> S + 'static>(supply: F) -> Self {
        Self(Arc::new(supply))
    }

    pub fn get(&self) -> S {
        (self.0)()
    }
}

impl<S> Clone for Supplier<S> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<S> fmt::Debug for Supplier<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_struct("Supplier").finish_non_exhaustive()
    }
}

impl<S: Shrink> Edges<S> {
    pub fn none() -> Self {
        Self {
            suppliers: Vec::new(),
        }
    }

    pub fn from_suppliers(suppliers: Vec<Supplier<S>>) -> Self {
        Self { suppliers }
    }

    pub fn suppliers(&self) -> &[Supplier<S>] {
        &self.suppliers
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Realizes one fresh shrinker per factory.
    pub fn iter(&self) -> impl Iterator<Item = S> + '_ {
        self.suppliers.iter().map(Supplier::get)
    }

    /// Rewrites every factory through `wrap`, preserving laziness: `wrap` runs
    /// when a factory is realized, not when the catalogue is built.
    pub fn transform<T: Shrink, F: Fn(S) -> T + Clone + 'static>(&self, wrap: F) -> Edges<T> {
        Edges {
            suppliers: self
                .suppliers
                .iter()
                .map(|supplier| {
                    let supplier = supplier.clone();
                    let wrap = wrap.clone();
                    Supplier::new(move || wrap(supplier.get()))
                })
                .collect(),
        }
    }

    /// Drops the factories whose realized shrinker fails `keep`.
    pub fn retain<F: Fn(&S) -> bool>(self, keep: F) -> Self {
        Self {
            suppliers: self
                .suppliers
                .into_iter()
                .filter(|supplier| keep(&supplier.get()))
                .collect(),
        }
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.suppliers.extend(other.suppliers);
        self
    }
}

impl<S> Clone for Edges<S> {
    fn clone(&self) -> Self {
        Self {
            suppliers: self.suppliers.clone(),
        }
    }
}

impl<S> fmt::Debug for Edges<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("Edges")
            .field("count", &self.suppliers.len())
            .finish()
    }
}
