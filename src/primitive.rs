use crate::{
    choose::Choose,
    distance::Distance,
    edges::{Edges, Supplier},
    generate::{FullGenerate, Generate, IntoGenerate},
    shrink::{self, Candidates, Shrink},
    state::State,
    utility::Nudge,
};
use core::ops::{self, Bound};

/// A bounded domain of primitive values with a shrink target.
///
/// The target is the value shrinking converges to; it defaults to zero
/// clamped into the range and can be moved with [`Range::towards`] (numeric
/// ranges only).
#[derive(Clone, Copy, Debug)]
pub struct Range<T> {
    start: T,
    end: T,
    target: T,
}

#[derive(Clone, Copy, Debug)]
pub struct Shrinker<T> {
    item: T,
    target: T,
}

/// Shrinker for `char` ranges; shrinks through the underlying scalar value.
#[derive(Clone, Copy, Debug)]
pub struct Character(Shrinker<u32>);

impl<T: Copy> Range<T> {
    pub const fn start(&self) -> T {
        self.start
    }

    pub const fn end(&self) -> T {
        self.end
    }

    pub const fn target(&self) -> T {
        self.target
    }
}

pub trait Number: Sized + Copy + 'static {
    const ZERO: Self;
    const MIN: Self;
    const MAX: Self;

    fn full() -> Range<Self>;
    fn positive() -> Range<Self>;
    fn negative() -> Range<Self>;
}

macro_rules! ranges {
    ($t:ident) => {
        impl IntoGenerate for ops::Range<$t> {
            type Item = $t;
            type Generate = Range<$t>;

            fn generator(self) -> Self::Generate {
                Range::<$t>::new(self)
            }
        }

        impl IntoGenerate for ops::RangeInclusive<$t> {
            type Item = $t;
            type Generate = Range<$t>;

            fn generator(self) -> Self::Generate {
                Range::<$t>::new(self)
            }
        }

        impl IntoGenerate for ops::RangeFrom<$t> {
            type Item = $t;
            type Generate = Range<$t>;

            fn generator(self) -> Self::Generate {
                Range::<$t>::new(self)
            }
        }

        impl IntoGenerate for ops::RangeTo<$t> {
            type Item = $t;
            type Generate = Range<$t>;

            fn generator(self) -> Self::Generate {
                Range::<$t>::new(self)
            }
        }

        impl IntoGenerate for ops::RangeToInclusive<$t> {
            type Item = $t;
            type Generate = Range<$t>;

            fn generator(self) -> Self::Generate {
                Range::<$t>::new(self)
            }
        }

        impl FullGenerate for $t {
            type Item = $t;
            type Generate = Range<$t>;

            fn generator() -> Self::Generate {
                Range::<$t>::new(..)
            }
        }
    };
}

macro_rules! number {
    ($t:ident) => {
        impl Number for $t {
            const ZERO: Self = 0 as $t;
            const MIN: Self = $t::MIN;
            const MAX: Self = $t::MAX;

            fn full() -> Range<Self> {
                Range::<$t>::new(..)
            }

            fn positive() -> Range<Self> {
                Range::<$t>::new(Self::ZERO..)
            }

            fn negative() -> Range<Self> {
                Range::<$t>::new(..=Self::ZERO)
            }
        }
    };
}

macro_rules! integer {
    ($t:ident) => {
        impl Range<$t> {
            /// - An empty or invalid range (`0..0`) collapses to its `start`.
            /// - A reversed range is flipped.
            pub fn new<R: ops::RangeBounds<$t>>(range: R) -> Self {
                let mut start = match range.start_bound() {
                    Bound::Included(&bound) => (bound, false),
                    Bound::Excluded(&bound) => (bound, true),
                    Bound::Unbounded => ($t::MIN, false),
                };
                let mut end = match range.end_bound() {
                    Bound::Included(&bound) => (bound, false),
                    Bound::Excluded(&bound) => (bound, true),
                    Bound::Unbounded => ($t::MAX, false),
                };
                if start.0 > end.0 {
                    (start, end) = (end, start);
                }
                if start.1 {
                    start.0 = start.0.saturating_add(1 as $t);
                }
                if end.1 {
                    end.0 = end.0.saturating_sub(1 as $t);
                }
                let start = start.0;
                let end = end.0.max(start);
                Self {
                    start,
                    end,
                    target: (0 as $t).clamp(start, end),
                }
            }

            pub fn towards(mut self, target: $t) -> Self {
                self.target = target.clamp(self.start, self.end);
                self
            }

            fn sized(&self, size: f64) -> ($t, $t) {
                fn scale(span: f64, size: f64) -> f64 {
                    if span <= 0.0 {
                        0.0
                    } else {
                        // Damps large spans (such as the full `u64` range) so
                        // they do not rush into huge values as soon as
                        // `size > 0`.
                        span * size.powf(span.log2() / 12.0)
                    }
                }

                let target = self.target as f64;
                let low = target - scale(target - self.start as f64, size);
                let high = target + scale(self.end as f64 - target, size);
                (
                    (low as $t).clamp(self.start, self.target),
                    (high as $t).clamp(self.target, self.end),
                )
            }
        }

        impl Generate for Range<$t> {
            type Item = $t;
            type Shrink = Shrinker<$t>;

            fn generate(&self, state: &mut State) -> Self::Shrink {
                let (start, end) = self.sized(state.size());
                Shrinker {
                    item: state.random().$t(start..=end),
                    target: self.target,
                }
            }

            fn edges(&self) -> Edges<Self::Shrink> {
                let Self { start, end, target } = *self;
                let mut values: Vec<$t> = Vec::new();
                for value in [start, end, target] {
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
                if let Some(value) = target.checked_sub(1 as $t) {
                    if value >= start && !values.contains(&value) {
                        values.push(value);
                    }
                }
                if let Some(value) = target.checked_add(1 as $t) {
                    if value <= end && !values.contains(&value) {
                        values.push(value);
                    }
                }
                Edges::from_suppliers(
                    values
                        .into_iter()
                        .map(|item| Supplier::new(move || Shrinker { item, target }))
                        .collect(),
                )
            }

            fn constant(&self) -> bool {
                self.start == self.end
            }
        }

        impl Shrink for Shrinker<$t> {
            type Item = $t;

            fn item(&self) -> Self::Item {
                self.item
            }

            fn distance(&self) -> Distance {
                Distance::of(Distance::saturate(self.item.abs_diff(self.target) as u128))
            }

            fn shrink(&self) -> Candidates<Self> {
                let Self { item, target } = *self;
                if item == target {
                    return shrink::none();
                }
                // The target first, then bisection points approaching the
                // item, so candidates come in increasing distance order.
                let mut candidates = vec![Self {
                    item: target,
                    target,
                }];
                let mut cursor = target;
                loop {
                    let middle = cursor / 2 as $t + item / 2 as $t;
                    if middle == cursor || middle == item {
                        break;
                    }
                    candidates.push(Self {
                        item: middle,
                        target,
                    });
                    cursor = middle;
                }
                // The adjacent value closes the sequence so the search can
                // settle exactly on a boundary.
                let adjacent = if item > target {
                    item - 1 as $t
                } else {
                    item + 1 as $t
                };
                if candidates.last().map_or(true, |last| last.item != adjacent) {
                    candidates.push(Self {
                        item: adjacent,
                        target,
                    });
                }
                Box::new(candidates.into_iter())
            }
        }

        ranges!($t);
        number!($t);
    };
    ($($ts:ident),*) => { $(integer!($ts);)* };
}

macro_rules! floating {
    ($t:ident) => {
        impl Range<$t> {
            pub fn new<R: ops::RangeBounds<$t>>(range: R) -> Self {
                let mut start = match range.start_bound() {
                    Bound::Included(&bound) => (bound, false),
                    Bound::Excluded(&bound) => (bound, true),
                    Bound::Unbounded => ($t::MIN, false),
                };
                let mut end = match range.end_bound() {
                    Bound::Included(&bound) => (bound, false),
                    Bound::Excluded(&bound) => (bound, true),
                    Bound::Unbounded => ($t::MAX, false),
                };
                assert!(start.0.is_finite());
                assert!(end.0.is_finite());
                if start.0 > end.0 {
                    (start, end) = (end, start);
                }
                let start = if start.1 {
                    start.0.nudge(start.0.signum())
                } else {
                    start.0
                };
                let end = if end.1 { end.0.nudge(-end.0.signum()) } else { end.0 };
                // `Nudge` can push a value to infinity; clamping brings it
                // back in range.
                let start = start.clamp($t::MIN, end);
                let end = end.clamp(start, $t::MAX);
                Self {
                    start,
                    end,
                    target: (0.0 as $t).clamp(start, end),
                }
            }

            pub fn towards(mut self, target: $t) -> Self {
                if target.is_finite() {
                    self.target = target.clamp(self.start, self.end);
                }
                self
            }

            fn sized(&self, size: f64) -> ($t, $t) {
                fn scale(span: f64, size: f64) -> f64 {
                    if span <= 0.0 {
                        0.0
                    } else {
                        span * size.powf((span.log2() / 12.0).max(0.0))
                    }
                }

                let target = self.target as f64;
                let low = target - scale(target - self.start as f64, size);
                let high = target + scale(self.end as f64 - target, size);
                (
                    (low as $t).clamp(self.start, self.target),
                    (high as $t).clamp(self.target, self.end),
                )
            }
        }

        impl Generate for Range<$t> {
            type Item = $t;
            type Shrink = Shrinker<$t>;

            fn generate(&self, state: &mut State) -> Self::Shrink {
                let (start, end) = self.sized(state.size());
                let ratio = state.random().$t();
                let difference = end * ratio - start * ratio;
                Shrinker {
                    item: (difference + start).clamp(start, end),
                    target: self.target,
                }
            }

            fn edges(&self) -> Edges<Self::Shrink> {
                let Self { start, end, target } = *self;
                let mut values: Vec<$t> = Vec::new();
                for value in [start, end, target] {
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
                Edges::from_suppliers(
                    values
                        .into_iter()
                        .map(|item| Supplier::new(move || Shrinker { item, target }))
                        .collect(),
                )
            }

            fn constant(&self) -> bool {
                self.start == self.end
            }
        }

        impl Shrink for Shrinker<$t> {
            type Item = $t;

            fn item(&self) -> Self::Item {
                self.item
            }

            fn distance(&self) -> Distance {
                let difference = ((self.item - self.target) as f64).abs();
                if difference.is_finite() {
                    Distance::of(difference.trunc() as u64)
                        .append(Distance::of((difference.fract() * 1e9) as u64))
                } else {
                    Distance::of(u64::MAX)
                }
            }

            fn shrink(&self) -> Candidates<Self> {
                let Self { item, target } = *self;
                if item == target {
                    return shrink::none();
                }
                if !item.is_finite() {
                    return Box::new(core::iter::once(Self {
                        item: target,
                        target,
                    }));
                }
                let limit = self.distance();
                let mut candidates = vec![Self {
                    item: target,
                    target,
                }];
                let mut cursor = target;
                for _ in 0..64 {
                    let middle = cursor + (item - cursor) / 2 as $t;
                    if middle == cursor || middle == item {
                        break;
                    }
                    let candidate = Self {
                        item: middle,
                        target,
                    };
                    if candidate.distance() >= limit {
                        break;
                    }
                    candidates.push(candidate);
                    cursor = middle;
                }
                Box::new(candidates.into_iter())
            }
        }

        ranges!($t);
        number!($t);
    };
    ($($ts:ident),*) => { $(floating!($ts);)* };
}

integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
floating!(f32, f64);

impl Range<char> {
    pub fn new<R: ops::RangeBounds<char>>(range: R) -> Self {
        let start = match range.start_bound() {
            Bound::Included(&bound) => bound,
            Bound::Excluded(&bound) => {
                char::from_u32((bound as u32).saturating_add(1)).unwrap_or('\u{E000}')
            }
            Bound::Unbounded => '\0',
        };
        let end = match range.end_bound() {
            Bound::Included(&bound) => bound,
            Bound::Excluded(&bound) => {
                char::from_u32((bound as u32).saturating_sub(1)).unwrap_or('\u{D7FF}')
            }
            Bound::Unbounded => char::MAX,
        };
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            start,
            end,
            target: start,
        }
    }
}

impl Generate for Range<char> {
    type Item = char;
    type Shrink = Character;

    fn generate(&self, state: &mut State) -> Self::Shrink {
        let target = self.start as u32;
        let span = self.end as u32 - target;
        let scaled = if span == 0 {
            0
        } else {
            (span as f64 * state.size().powf((span as f64).log2() / 12.0)) as u32
        };
        Character(Shrinker {
            item: state.random().u32(target..=target + scaled.min(span)),
            target,
        })
    }

    fn edges(&self) -> Edges<Self::Shrink> {
        let Self { start, end, target } = *self;
        let target = target as u32;
        let mut values: Vec<u32> = Vec::new();
        for value in [start as u32, end as u32] {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        Edges::from_suppliers(
            values
                .into_iter()
                .map(|item| Supplier::new(move || Character(Shrinker { item, target })))
                .collect(),
        )
    }

    fn constant(&self) -> bool {
        self.start == self.end
    }
}

impl Shrink for Character {
    type Item = char;

    fn item(&self) -> Self::Item {
        char::from_u32(self.0.item).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn distance(&self) -> Distance {
        self.0.distance()
    }

    fn shrink(&self) -> Candidates<Self> {
        Box::new(self.0.shrink().map(Character))
    }
}

impl IntoGenerate for ops::Range<char> {
    type Item = char;
    type Generate = Range<char>;

    fn generator(self) -> Self::Generate {
        Range::<char>::new(self)
    }
}

impl IntoGenerate for ops::RangeInclusive<char> {
    type Item = char;
    type Generate = Range<char>;

    fn generator(self) -> Self::Generate {
        Range::<char>::new(self)
    }
}

impl FullGenerate for char {
    type Item = char;
    type Generate = Range<char>;

    fn generator() -> Self::Generate {
        Range::<char>::new(..)
    }
}

impl FullGenerate for bool {
    type Item = bool;
    type Generate = Choose<bool>;

    fn generator() -> Self::Generate {
        Choose::new(vec![false, true])
    }
}
