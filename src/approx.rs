//! Approximate equality.
//!
//! Every `equals_approximately` operation in this crate is built on [`ApproxEq`], using the
//! current [`epsilon`][crate::epsilon] as tolerance. The [`assert_approx_eq!`] and
//! [`assert_approx_ne!`] macros use the same comparison, which makes them convenient for testing
//! code that produces math values.

mod impls;

use std::{fmt, panic::Location};

/// Types that can be compared for *approximate equality*.
///
/// Compound types implementing this trait are considered *equal* if all of their elements are.
pub trait ApproxEq<Rhs: ?Sized = Self> {
    /// Type representing the tolerance of the comparison.
    ///
    /// This is either [`f32`] or [`f64`], depending on which one is the underlying primitive type
    /// being compared.
    type Tolerance: DefaultTolerance + Copy;

    /// Performs an *absolute comparison* of `self` and `other`.
    ///
    /// The values are considered equal if their absolute difference is *strictly less* than
    /// `tolerance`. No relative scaling is applied, and `NaN` is never equal to anything.
    fn abs_diff_eq(&self, other: &Rhs, tolerance: Self::Tolerance) -> bool;
}

/// Trait implemented for the `Tolerance` value of [`ApproxEq`] implementations.
pub trait DefaultTolerance {
    /// Returns the current [`epsilon`][crate::epsilon], converted to `Self`.
    fn current() -> Self;
}

impl DefaultTolerance for f32 {
    fn current() -> Self {
        crate::epsilon() as f32
    }
}

impl DefaultTolerance for f64 {
    fn current() -> Self {
        crate::epsilon()
    }
}

/// Assertion guard returned by the [`assert_approx_eq!`][crate::assert_approx_eq] and
/// [`assert_approx_ne!`][crate::assert_approx_ne] macros.
///
/// The assertion is checked when this value is dropped. Before that, [`Asserter::abs`] can be used
/// to override the tolerance. If it isn't called, the current [`epsilon`][crate::epsilon] is used.
pub struct Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug + ?Sized,
{
    left: &'a T,
    right: &'a T,
    kind: AssertionKind,
    location: &'static Location<'static>,
    msg: Option<fmt::Arguments<'a>>,
    abs: Option<T::Tolerance>,
}

impl<'a, T> Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug + ?Sized,
{
    #[doc(hidden)]
    #[track_caller]
    pub fn new(
        left: &'a T,
        right: &'a T,
        kind: AssertionKind,
        msg: Option<fmt::Arguments<'a>>,
    ) -> Self {
        Self {
            left,
            right,
            kind,
            location: Location::caller(),
            msg,
            abs: None,
        }
    }

    /// Compares the values with the given absolute tolerance instead of the current epsilon.
    pub fn abs(&mut self, abs: T::Tolerance) -> &mut Self {
        self.abs = Some(abs);
        self
    }
}

impl<'a, T> Drop for Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug + ?Sized,
{
    // `#[track_caller]` does not work on destructors, so the location is captured in `new`.
    fn drop(&mut self) {
        let tolerance = self.abs.take().unwrap_or_else(T::Tolerance::current);
        let equal = self.left.abs_diff_eq(self.right, tolerance);
        if (!equal && self.kind == AssertionKind::Eq) || (equal && self.kind == AssertionKind::Ne) {
            assert_failed_inner(&self.left, &self.right, self.kind, self.location, self.msg);
        }
    }
}

fn assert_failed_inner(
    left: &dyn fmt::Debug,
    right: &dyn fmt::Debug,
    kind: AssertionKind,
    location: &Location<'_>,
    args: Option<fmt::Arguments<'_>>,
) -> ! {
    let op = match kind {
        AssertionKind::Eq => "==",
        AssertionKind::Ne => "!=",
    };
    match args {
        Some(args) => panic!(
            r#"assertion `left {op} right` failed at {location}: {args}
  left: {left:?}
 right: {right:?}"#
        ),
        None => panic!(
            r#"assertion `left {op} right` failed at {location}
  left: {left:?}
 right: {right:?}"#
        ),
    }
}

#[doc(hidden)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssertionKind {
    Eq,
    Ne,
}

/// Asserts that two expressions are approximately equal to each other (using [`ApproxEq`]).
///
/// Works like [`assert_eq!`], but compares with [`ApproxEq::abs_diff_eq`] and the current
/// [`epsilon`][crate::epsilon]. Returns an [`Asserter`] that can override the tolerance.
///
/// # Examples
///
/// ```
/// # use gpumath::*;
/// let one = (0..10).fold(0.0, |acc, _| acc + 0.1);
/// assert_approx_eq!(one, 1.0);
/// assert_approx_eq!(100.0, 99.0).abs(1.5);
/// assert_approx_eq!([1.0, 2.0][..], [1.0, 2.0 + 1e-9][..]);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::Asserter::new(&$lhs, &$rhs, $crate::approx::AssertionKind::Eq, ::core::option::Option::None)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::approx::Asserter::new(&$lhs, &$rhs, $crate::approx::AssertionKind::Eq, ::core::option::Option::Some(::core::format_args!($($arg)+)))
    };
}

/// Asserts that two expressions are *not* approximately equal to each other (using [`ApproxEq`]).
///
/// Also see [`assert_approx_eq!`].
///
/// # Examples
///
/// ```
/// # use gpumath::*;
/// assert_approx_ne!(1.0, 1.001);
/// assert_approx_ne!(100.0, 99.0).abs(0.5);
/// ```
#[macro_export]
macro_rules! assert_approx_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Ne,
            ::core::option::Option::None
        )
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Ne,
            ::core::option::Option::Some(::core::format_args!($($arg)+))
        )
    };
}

#[cfg(test)]
mod tests {
    #[test]
    #[should_panic(expected = "assertion `left != right` failed")]
    fn fail_ne() {
        assert_approx_ne!(1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "assertion `left == right` failed")]
    fn fail_eq() {
        assert_approx_eq!(1.0, 2.0);
    }

    #[test]
    #[should_panic(expected = "my message")]
    fn assertion_message() {
        assert_approx_eq!(1.0, 2.0, "my message");
    }

    #[test]
    fn strict() {
        // The difference has to be strictly below the tolerance.
        assert_approx_ne!(1.0, 2.0).abs(1.0);
        assert_approx_eq!(1.0, 2.0).abs(1.0000001);
        assert_approx_ne!(0.0f32, 0.0).abs(0.0);
    }

    #[test]
    fn slices() {
        assert_approx_eq!([1.0f32, 2.0][..], [1.0, 2.0000001][..]);
        assert_approx_ne!([1.0f32, 2.0][..], [1.0, 2.1][..]);
        assert_approx_eq!([1.0f64, 2.0], [1.0, 2.0]);
    }

    #[test]
    fn nan() {
        assert_approx_ne!(f32::NAN, f32::NAN).abs(1.0);
        assert_approx_ne!(f64::NAN, 0.0).abs(1.0);
        assert_approx_ne!(f32::INFINITY, f32::INFINITY);
    }
}
