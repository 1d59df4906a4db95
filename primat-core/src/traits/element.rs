//! Element-kind constraints for dense matrices
//!
//! This module defines the traits that constrain what types can be stored as
//! matrix elements, and the arithmetic the numeric kinds expose.

use core::fmt;

use bytemuck::Zeroable;

use crate::kind::ElementKind;

/// Trait for types that can be stored as matrix elements
///
/// Every element kind must be:
/// - Clone: cells are copied into freshly allocated results
/// - PartialEq: matrices compare structurally
/// - Send + Sync: bulk operations may visit cells from worker threads
pub trait MatrixElement: Clone + PartialEq + Send + Sync + fmt::Debug + 'static {
    /// Kind tag for this element type
    const KIND: ElementKind;

    /// The value new cells take when a shape grows
    fn zero() -> Self;

    /// Render a single value for the `[[a, b], [c, d]]` text form
    fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Element kinds supporting add/subtract/multiply
///
/// Fixed-width integer kinds wrap on overflow, floats follow IEEE-754.
pub trait NumericElement: MatrixElement + Copy {
    fn elem_add(self, rhs: Self) -> Self;

    fn elem_sub(self, rhs: Self) -> Self;

    fn elem_mul(self, rhs: Self) -> Self;

    /// `acc += a * b`, the multiply kernel's accumulate step
    fn mul_add_into(acc: &mut Self, a: Self, b: Self) {
        *acc = acc.elem_add(a.elem_mul(b));
    }
}

/// Integer kinds, usable for range factories
pub trait IntegerElement: NumericElement + Ord {
    fn one() -> Self;

    /// Lossless widening
    fn to_i128(self) -> i128;

    /// Narrowing that wraps like an `as` cast
    fn from_i128_wrapping(value: i128) -> Self;
}

macro_rules! impl_display_element {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl MatrixElement for $t {
                const KIND: ElementKind = ElementKind::$kind;

                fn zero() -> Self {
                    <$t as Zeroable>::zeroed()
                }

                fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }
            }
        )*
    };
}

// Debug keeps the trailing ".0" on whole floats
macro_rules! impl_float_element {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl MatrixElement for $t {
                const KIND: ElementKind = ElementKind::$kind;

                fn zero() -> Self {
                    <$t as Zeroable>::zeroed()
                }
            }

            impl NumericElement for $t {
                fn elem_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                fn elem_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                fn elem_mul(self, rhs: Self) -> Self {
                    self * rhs
                }
            }
        )*
    };
}

macro_rules! impl_integer_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl NumericElement for $t {
                fn elem_add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                fn elem_sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                fn elem_mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }
            }

            impl IntegerElement for $t {
                fn one() -> Self {
                    1
                }

                fn to_i128(self) -> i128 {
                    self as i128
                }

                fn from_i128_wrapping(value: i128) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_display_element!(
    bool => Boolean,
    char => Char,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
);
impl_float_element!(f32 => Float, f64 => Double);
impl_integer_element!(i8, i16, i32, i64);

/// The generic kind: nullable values of any clonable type
impl<T> MatrixElement for Option<T>
where
    T: Clone + PartialEq + Send + Sync + fmt::Debug + 'static,
{
    const KIND: ElementKind = ElementKind::Object;

    fn zero() -> Self {
        None
    }

    fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => fmt::Debug::fmt(value, f),
            None => f.write_str("null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values() {
        assert_eq!(<i32 as MatrixElement>::zero(), 0);
        assert_eq!(<f64 as MatrixElement>::zero(), 0.0);
        assert!(!<bool as MatrixElement>::zero());
        assert_eq!(<char as MatrixElement>::zero(), '\0');
        assert_eq!(<Option<u8> as MatrixElement>::zero(), None);
    }

    #[test]
    fn test_fixed_width_kinds_wrap() {
        assert_eq!(i8::MAX.elem_add(1), i8::MIN);
        assert_eq!(i32::MIN.elem_sub(1), i32::MAX);
        assert_eq!(i16::MAX.elem_mul(2), -2);

        let mut acc = i64::MAX;
        i64::mul_add_into(&mut acc, 1, 1);
        assert_eq!(acc, i64::MIN);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(<i8 as MatrixElement>::KIND, ElementKind::Byte);
        assert_eq!(<f32 as MatrixElement>::KIND, ElementKind::Float);
        assert_eq!(<Option<char> as MatrixElement>::KIND, ElementKind::Object);
    }

    #[test]
    fn test_integer_widening() {
        assert_eq!((-5i16).to_i128(), -5);
        assert_eq!(i8::from_i128_wrapping(130), -126);
        assert_eq!(<i32 as IntegerElement>::one(), 1);
    }
}
