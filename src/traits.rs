// FIXME: `Scalar` could be implemented for `half::f16` once GPU half-precision buffers are needed

use std::{fmt, ops};

use crate::approx::ApproxEq;

/// Types that support the trigonometric functions.
pub trait Trig {
    /// Computes the sine of the angle `self` (in radians).
    fn sin(self) -> Self;
    /// Computes the cosine of the angle `self` (in radians).
    fn cos(self) -> Self;
    /// Computes the tangent of the angle `self` (in radians).
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan2(self, other: Self) -> Self;
}

/// Types that support computing their square root.
pub trait Sqrt {
    fn sqrt(self) -> Self;
}

/// Types that support a `min` and `max` operation.
///
/// [`f32`] and [`f64`] implement this trait in terms of the [`f32::min`] and [`f32::max`] functions
/// ([`f64::min`] and [`f64::max`] respectively), so a `NaN` operand yields the other operand.
pub trait MinMax: Sized {
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }
}

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

/// A trait for numeric types that support basic arithmetic operations.
pub trait Number:
    Zero
    + One
    + ops::Neg<Output = Self>
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
    + ops::Rem<Output = Self>
    + PartialOrd
    + Copy
{
}
impl<T> Number for T where
    T: Zero
        + One
        + ops::Neg<Output = Self>
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + ops::Div<Output = Self>
        + ops::Rem<Output = Self>
        + PartialOrd
        + Copy
{
}

/// The element type stored in every math value.
///
/// This is implemented for [`f32`] and [`f64`], the two element types a GPU buffer can hold that
/// the [`Storage`][crate::Storage] policies allocate.
pub trait Scalar:
    Number
    + Trig
    + Sqrt
    + MinMax
    + ApproxEq<Tolerance = Self>
    + fmt::Debug
    + fmt::Display
    + Default
    + bytemuck::Pod
    + Send
    + Sync
    + 'static
{
    /// Archimedes' constant (π).
    const PI: Self;
    /// `0.5`, used by every half-angle formula.
    const HALF: Self;
    /// `2.0`.
    const TWO: Self;

    /// Converts an [`f64`] into this type, rounding to the nearest representable value.
    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;

    fn abs(self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    /// Rounds half-way cases away from zero (like [`f32::round`]).
    fn round(self) -> Self;
    fn is_finite(self) -> bool;
    fn is_nan(self) -> bool;
}

macro_rules! float_scalar {
    ($($ty:ident),+) => {
        $(
            impl Zero for $ty {
                const ZERO: Self = 0.0;
            }

            impl One for $ty {
                const ONE: Self = 1.0;
            }

            impl Trig for $ty {
                fn sin(self) -> Self {
                    self.sin()
                }

                fn cos(self) -> Self {
                    self.cos()
                }

                fn tan(self) -> Self {
                    self.tan()
                }

                fn asin(self) -> Self {
                    self.asin()
                }

                fn acos(self) -> Self {
                    self.acos()
                }

                fn atan2(self, other: Self) -> Self {
                    self.atan2(other)
                }
            }

            impl Sqrt for $ty {
                fn sqrt(self) -> Self {
                    self.sqrt()
                }
            }

            impl MinMax for $ty {
                fn min(self, other: Self) -> Self {
                    self.min(other)
                }

                fn max(self, other: Self) -> Self {
                    self.max(other)
                }
            }

            impl Scalar for $ty {
                const PI: Self = std::$ty::consts::PI;
                const HALF: Self = 0.5;
                const TWO: Self = 2.0;

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $ty
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn abs(self) -> Self {
                    self.abs()
                }

                fn floor(self) -> Self {
                    self.floor()
                }

                fn ceil(self) -> Self {
                    self.ceil()
                }

                fn round(self) -> Self {
                    self.round()
                }

                fn is_finite(self) -> bool {
                    self.is_finite()
                }

                fn is_nan(self) -> bool {
                    self.is_nan()
                }
            }
        )+
    };
}
float_scalar!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn clamp<T: Scalar>(v: T, min: T, max: T) -> T {
        MinMax::clamp(v, min, max)
    }

    #[test]
    fn clamp_range() {
        assert_eq!(clamp(5.0f32, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0f64, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25f64, 0.0, 1.0), 0.25);
    }

    #[test]
    fn conversions() {
        assert_eq!(f32::from_f64(0.1), 0.1f32);
        assert_eq!(0.5f32.to_f64(), 0.5);
        assert_eq!(<f64 as Scalar>::PI, std::f64::consts::PI);
    }

    #[test]
    fn rounding() {
        assert_eq!(Scalar::round(2.5f32), 3.0);
        assert_eq!(Scalar::round(-2.5f64), -3.0);
        assert_eq!(Scalar::floor(-0.5f64), -1.0);
        assert_eq!(Scalar::ceil(-0.5f32), -0.0);
    }
}
