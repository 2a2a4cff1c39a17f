use crate::random::Random;
use core::ops::Range;

/// The state of one generation trial.
///
/// A `State` carries the random source and the current generation `size` (a
/// value in `0.0..=1.0` that scales how large generated values are allowed to
/// be). One `State` belongs to exactly one logical trial; it must never be
/// consumed from two threads at once. All randomness is drawn through it
/// during generation; shrinking afterwards is fully deterministic.
#[derive(Clone, Debug)]
pub struct State {
    size: f64,
    index: usize,
    seed: u64,
    random: Random,
}

impl State {
    pub fn new(index: usize, count: usize, sizes: Range<f64>, seed: u64) -> Self {
        let ratio = if count == 0 {
            1.0
        } else {
            (index as f64 / count as f64 * 1.1).min(1.0)
        };
        Self {
            size: (sizes.start + (sizes.end - sizes.start) * ratio).clamp(0.0, 1.0),
            index,
            seed,
            random: Random::with_seed(seed.wrapping_add(index as u64)),
        }
    }

    #[inline]
    pub const fn size(&self) -> f64 {
        self.size
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn random(&mut self) -> &mut Random {
        &mut self.random
    }

    #[inline]
    pub(crate) fn set_size(&mut self, size: f64) {
        self.size = size.clamp(0.0, 1.0);
    }
}
