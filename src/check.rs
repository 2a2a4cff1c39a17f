use crate::{generate::Generate, prove::Prove, random, shrink::Shrink, state::State};
use core::{fmt, ops::Range, panic::AssertUnwindSafe, time::Duration};
use std::{borrow::Cow, error, panic::catch_unwind, time::Instant};

pub const COUNT: usize = 1000;

/// Bounds the shrinking process.
#[derive(Clone, Copy, Debug)]
pub struct Shrinks {
    /// Maximum number of successful reductions before the search stops.
    /// Defaults to `usize::MAX`.
    pub accept: usize,
    /// Maximum number of rejected candidates before the search stops.
    /// Defaults to `usize::MAX`.
    pub reject: usize,
    /// Maximum time spent shrinking.
    /// Defaults to 30 seconds.
    pub duration: Duration,
}

/// Holds a generator and the configuration of the checking and shrinking
/// processes.
#[derive(Debug)]
pub struct Checker<'a, G: ?Sized> {
    /// The generator that provides the values to check.
    pub generator: &'a G,
    /// Whether the [`Checks`] iterator yields passing items. When `false`,
    /// the iterator only yields errors. Defaults to `true`.
    pub items: bool,
    /// Limits the shrinking process.
    pub shrinks: Shrinks,
    /// Seed for the random source. Defaults to a random value.
    pub seed: u64,
    /// Range of sizes traversed gradually while generating values.
    /// Defaults to `0.0..1.0`.
    pub size: Range<f64>,
    /// Number of checks to perform. Defaults to `1000`.
    pub count: usize,
}

/// An iterator over a series of checks, one generated value per check.
#[derive(Debug)]
pub struct Checks<'a, G: ?Sized, F> {
    checker: Checker<'a, G>,
    items: bool,
    index: usize,
    count: usize,
    check: F,
}

pub trait Check: Generate {
    fn checker(&self) -> Checker<Self> {
        let mut checker = Checker::new(self, random::seed());
        environment::update(&mut checker);
        checker
    }

    fn checks<P: Prove, F: FnMut(&Self::Item) -> P>(
        &self,
        count: usize,
        check: F,
    ) -> Checks<Self, F> {
        let mut checker = self.checker();
        checker.count = count;
        checker.checks(check)
    }

    fn check<P: Prove, F: FnMut(&Self::Item) -> P>(
        &self,
        count: usize,
        check: F,
    ) -> Result<(), Error<Self::Item, P>> {
        let mut checker = self.checker();
        checker.count = count;
        checker.items = false;
        for result in checker.checks(check) {
            result?;
        }
        Ok(())
    }
}

impl<G: Generate + ?Sized> Check for G {}

/// A check failure: the original counterexample, the smallest one the shrink
/// search could find, and what went wrong.
#[derive(Clone, Debug)]
pub struct Error<T, P> {
    pub original: T,
    pub shrunk: Option<T>,
    pub state: State,
    pub cause: Cause<P>,
    pub shrinks: Shrinks,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cause<P> {
    /// The property returned a proof that does not hold.
    Disprove(P),
    /// The property panicked; the message is included when it can be read.
    Panic(Option<Cow<'static, str>>),
}

impl<'a, G: Generate + ?Sized> Checker<'a, G> {
    pub(crate) fn new(generator: &'a G, seed: u64) -> Self {
        Self {
            generator,
            items: true,
            shrinks: Shrinks {
                accept: usize::MAX,
                reject: usize::MAX,
                duration: Duration::from_secs(30),
            },
            seed,
            size: 0.0..1.0,
            count: if generator.constant() { 1 } else { COUNT },
        }
    }

    /// Performs a single check at the given `size`.
    pub fn check<P: Prove, F: FnMut(&G::Item) -> P>(
        &self,
        size: f64,
        check: F,
    ) -> Result<G::Item, Error<G::Item, P>> {
        next(
            self.generator,
            State::new(0, 1, size..size, self.seed),
            self.shrinks,
            check,
        )
        .map(|shrinker| shrinker.item())
    }

    pub fn checks<P: Prove, F: FnMut(&G::Item) -> P>(&self, check: F) -> Checks<'a, G, F> {
        Checks {
            checker: self.clone(),
            items: self.items,
            count: self.count,
            check,
            index: 0,
        }
    }
}

impl<G: ?Sized> Clone for Checker<'_, G> {
    fn clone(&self) -> Self {
        Self {
            generator: self.generator,
            items: self.items,
            shrinks: self.shrinks,
            seed: self.seed,
            size: self.size.clone(),
            count: self.count,
        }
    }
}

impl<G: ?Sized, F: Clone> Clone for Checks<'_, G, F> {
    fn clone(&self) -> Self {
        Self {
            checker: self.checker.clone(),
            items: self.items,
            index: self.index,
            count: self.count,
            check: self.check.clone(),
        }
    }
}

impl<G: Generate + ?Sized, P: Prove, F: FnMut(&G::Item) -> P> Iterator for Checks<'_, G, F> {
    type Item = Result<G::Item, Error<G::Item, P>>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.count {
            let result = next(
                self.checker.generator,
                State::new(
                    self.index,
                    self.count,
                    self.checker.size.clone(),
                    self.checker.seed,
                ),
                self.checker.shrinks,
                &mut self.check,
            );
            self.index += 1;
            match result {
                Ok(shrinker) if self.items => return Some(Ok(shrinker.item())),
                Ok(_) => continue,
                Err(error) => return Some(Err(error)),
            }
        }
        None
    }
}

impl<T, P> Error<T, P> {
    pub fn original(&self) -> &T {
        &self.original
    }

    pub fn shrunk(&self) -> &T {
        self.shrunk.as_ref().unwrap_or(&self.original)
    }

    pub fn seed(&self) -> u64 {
        self.state.seed()
    }

    pub fn index(&self) -> usize {
        self.state.index()
    }

    pub fn message(&self) -> Cow<'static, str>
    where
        P: fmt::Debug,
    {
        match &self.cause {
            Cause::Panic(Some(message)) => message.clone(),
            Cause::Panic(None) => "panicked".into(),
            Cause::Disprove(proof) => format!("{proof:?}").into(),
        }
    }
}

fn handle<T, P: Prove, F: FnMut(&T) -> P>(item: &T, check: &mut F) -> Option<Cause<P>> {
    let error = match catch_unwind(AssertUnwindSafe(|| check(item))) {
        Ok(prove) if prove.prove() => return None,
        Ok(prove) => return Some(Cause::Disprove(prove)),
        Err(error) => error,
    };
    let error = match error.downcast::<&'static str>() {
        Ok(error) => return Some(Cause::Panic(Some(Cow::Borrowed(*error)))),
        Err(error) => error,
    };
    let error = match error.downcast::<String>() {
        Ok(error) => return Some(Cause::Panic(Some(Cow::Owned(*error)))),
        Err(error) => error,
    };
    match error.downcast::<Cow<'static, str>>() {
        Ok(error) => Some(Cause::Panic(Some(*error))),
        Err(_) => Some(Cause::Panic(None)),
    }
}

fn next<G: Generate + ?Sized, P: Prove, F: FnMut(&G::Item) -> P>(
    generator: &G,
    mut state: State,
    limits: Shrinks,
    mut check: F,
) -> Result<G::Shrink, Error<G::Item, P>> {
    let shrinker = generator.generate(&mut state);
    let item = shrinker.item();
    let Some(cause) = handle(&item, &mut check) else {
        return Ok(shrinker);
    };
    let mut error = Error {
        original: item,
        shrunk: None,
        state,
        cause,
        shrinks: Shrinks {
            accept: 0,
            reject: 0,
            duration: Duration::ZERO,
        },
    };
    search(shrinker, limits, &mut error, &mut check);
    Err(error)
}

// Walks the candidate sequence of the failing shrinker. Candidates come in
// increasing distance order, so the first one that still fails is adopted
// and the search restarts from it; the last failing shrinker is kept when no
// candidate fails or the limits run out.
fn search<S: Shrink, P: Prove, F: FnMut(&S::Item) -> P>(
    mut current: S,
    limits: Shrinks,
    error: &mut Error<S::Item, P>,
    check: &mut F,
) {
    let start = Instant::now();
    loop {
        let mut progress = false;
        for candidate in current.shrink() {
            if error.shrinks.accept >= limits.accept
                || error.shrinks.reject >= limits.reject
                || start.elapsed() >= limits.duration
            {
                error.shrinks.duration = start.elapsed();
                return;
            }
            debug_assert!(
                candidate.distance() < current.distance(),
                "a shrink candidate must be strictly simpler than its parent"
            );
            // A value that cannot be rebuilt from the candidate's parts
            // aborts only this candidate.
            let Ok(item) = catch_unwind(AssertUnwindSafe(|| candidate.item())) else {
                error.shrinks.reject += 1;
                continue;
            };
            match handle(&item, check) {
                Some(cause) => {
                    error.cause = cause;
                    error.shrunk = Some(item);
                    error.shrinks.accept += 1;
                    current = candidate;
                    progress = true;
                    break;
                }
                None => error.shrinks.reject += 1,
            }
        }
        if !progress {
            error.shrinks.duration = start.elapsed();
            return;
        }
    }
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Display for Error<T, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, formatter)
    }
}

impl<T: fmt::Debug, P: fmt::Debug> error::Error for Error<T, P> {}

pub mod environment {
    use super::Checker;
    use std::{env, str::FromStr, time::Duration};

    pub fn count() -> Option<usize> {
        parse("SHRIVEL_COUNT")
    }

    pub fn size() -> Option<f64> {
        parse("SHRIVEL_SIZE")
    }

    pub fn seed() -> Option<u64> {
        parse("SHRIVEL_SEED")
    }

    pub fn accept() -> Option<usize> {
        parse("SHRIVEL_ACCEPT")
    }

    pub fn reject() -> Option<usize> {
        parse("SHRIVEL_REJECT")
    }

    pub fn duration() -> Option<Duration> {
        parse("SHRIVEL_DURATION").map(Duration::from_secs_f64)
    }

    pub fn update<G: ?Sized>(checker: &mut Checker<'_, G>) {
        if let Some(value) = size() {
            checker.size = value..value;
        }
        if let Some(value) = count() {
            checker.count = value;
        }
        if let Some(value) = seed() {
            checker.seed = value;
        }
        if let Some(value) = accept() {
            checker.shrinks.accept = value;
        }
        if let Some(value) = reject() {
            checker.shrinks.reject = value;
        }
        if let Some(value) = duration() {
            checker.shrinks.duration = value;
        }
    }

    fn parse<T: FromStr>(key: &str) -> Option<T> {
        match env::var(key) {
            Ok(value) => value.parse().ok(),
            Err(_) => None,
        }
    }
}
