pub mod common;
use common::*;

type Result<T> = std::result::Result<(), shrivel::check::Error<T, bool>>;

macro_rules! tests {
    ($t:ident, [$($m:ident),*]) => {
        mod $t {
            use super::*;

            #[test]
            fn samples_have_count() {
                for count in 0..64 {
                    assert_eq!(number::<$t>().samples(count).len(), count);
                }
            }

            #[test]
            fn is_in_range() -> Result<($t, $t, $t)> {
                (number::<$t>(), number::<$t>())
                    .map(|(low, high)| (low.min(high), low.max(high)))
                    .flat_map(|(low, high)| {
                        ((low..=high).generator(), same(low), same(high))
                    })
                    .check(COUNT, |&(value, low, high)| value >= low && value <= high)
            }

            #[test]
            fn is_positive() -> Result<$t> {
                positive::<$t>().check(COUNT, |&value| value >= 0 as $t)
            }

            $($m!($t);)*
        }
    };
}

macro_rules! tests_signed {
    ($t:ident) => {
        #[test]
        fn is_negative() -> Result<$t> {
            negative::<$t>().check(COUNT, |&value| value <= 0 as $t)
        }
    };
}

macro_rules! tests_integer {
    ($t:ident) => {
        #[test]
        fn shrinks_to_the_smallest_failing_value() {
            let mut count = COUNT;
            let error = number::<$t>()
                .check(COUNT, |_| {
                    count = count.saturating_sub(1);
                    count > 0
                })
                .unwrap_err();
            assert_eq!(0 as $t, *error.shrunk());
        }
    };
}

tests!(u8, [tests_integer]);
tests!(u16, [tests_integer]);
tests!(u32, [tests_integer]);
tests!(u64, [tests_integer]);
tests!(i8, [tests_integer, tests_signed]);
tests!(i16, [tests_integer, tests_signed]);
tests!(i32, [tests_integer, tests_signed]);
tests!(i64, [tests_integer, tests_signed]);

mod floating {
    use super::*;

    #[test]
    fn is_finite() -> Result<f64> {
        number::<f64>().check(COUNT, |&value| value.is_finite())
    }

    #[test]
    fn is_in_range() -> Result<f32> {
        (1.0f32..=9.0).generator().check(COUNT, |&value| (1.0..=9.0).contains(&value))
    }
}

mod character {
    use super::*;

    #[test]
    fn is_in_range() -> Result<char> {
        ('a'..='z')
            .generator()
            .check(COUNT, |&value| ('a'..='z').contains(&value))
    }

    #[test]
    fn letters_are_alphabetic() -> Result<char> {
        letter().check(COUNT, |&value| value.is_ascii_alphabetic())
    }

    #[test]
    fn digits_are_numeric() -> Result<char> {
        digit().check(COUNT, |&value| value.is_ascii_digit())
    }

    #[test]
    fn ascii_stays_ascii() -> Result<char> {
        ascii().check(COUNT, |&value| value.is_ascii())
    }
}
