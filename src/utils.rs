//! Tolerance configuration and scalar helpers.
//!
//! # Epsilon
//!
//! Every `equals_approximately` operation, and the few operations that guard against
//! near-degenerate input by comparing against a tolerance (such as quaternion slerp falling back
//! to a linear blend), use the *epsilon* returned by [`epsilon`].
//!
//! The epsilon is **thread-local**: [`set_epsilon`] only affects the calling thread, so concurrent
//! users (and concurrently running tests) cannot observe each other's settings. New threads start
//! out with the value of the `GPUMATH_EPSILON` environment variable, or `1e-6` if it is unset.

use std::{cell::Cell, env};

use once_cell::sync::Lazy;

use crate::Scalar;

/// The epsilon used when `GPUMATH_EPSILON` is not set.
pub const DEFAULT_EPSILON: f64 = 0.000001;

/// Vectors and quaternions whose length is at or below this value normalize to zero.
///
/// This threshold is fixed and does not follow [`epsilon`]: changing the comparison tolerance for
/// tests should not change which vectors are considered degenerate.
pub const NORMALIZE_THRESHOLD: f64 = 0.00001;

static INITIAL_EPSILON: Lazy<f64> = Lazy::new(|| match env::var("GPUMATH_EPSILON") {
    Ok(v) => match v.trim().parse::<f64>() {
        Ok(eps) if eps.is_finite() && eps >= 0.0 => eps,
        _ => {
            log::warn!(
                "invalid value set for `GPUMATH_EPSILON` variable: '{v}'; using {DEFAULT_EPSILON}"
            );
            DEFAULT_EPSILON
        }
    },
    Err(_) => DEFAULT_EPSILON,
});

thread_local! {
    static EPSILON: Cell<f64> = Cell::new(*INITIAL_EPSILON);
}

/// Returns the tolerance currently used by approximate comparisons on this thread.
pub fn epsilon() -> f64 {
    EPSILON.with(Cell::get)
}

/// Sets the tolerance used by approximate comparisons on this thread, returning the previous one.
///
/// Prefer [`scoped_epsilon`] when the change should only apply to a block of code.
///
/// # Examples
///
/// ```
/// # use gpumath::*;
/// let old = set_epsilon(0.1);
/// assert!(vec2().equals_approximately(&[1.0, 1.0], &[1.05, 1.0]));
/// set_epsilon(old);
/// assert!(!vec2().equals_approximately(&[1.0, 1.0], &[1.05, 1.0]));
/// ```
pub fn set_epsilon(epsilon: f64) -> f64 {
    let prev = EPSILON.with(|cell| cell.replace(epsilon));
    log::trace!("epsilon changed from {prev} to {epsilon}");
    prev
}

/// Sets the epsilon for this thread until the returned guard is dropped.
///
/// # Examples
///
/// ```
/// # use gpumath::*;
/// let before = epsilon();
/// {
///     let _guard = scoped_epsilon(0.5);
///     assert_eq!(epsilon(), 0.5);
/// }
/// assert_eq!(epsilon(), before);
/// ```
#[must_use = "the previous epsilon is restored as soon as the guard is dropped"]
pub fn scoped_epsilon(epsilon: f64) -> EpsilonGuard {
    EpsilonGuard {
        prev: set_epsilon(epsilon),
    }
}

/// Guard returned by [`scoped_epsilon`]; restores the previous epsilon when dropped.
#[derive(Debug)]
pub struct EpsilonGuard {
    prev: f64,
}

impl Drop for EpsilonGuard {
    fn drop(&mut self) {
        set_epsilon(self.prev);
    }
}

/// Converts degrees to radians.
pub fn deg_to_rad<T: Scalar>(degrees: T) -> T {
    degrees * T::PI / T::from_f64(180.0)
}

/// Converts radians to degrees.
pub fn rad_to_deg<T: Scalar>(radians: T) -> T {
    radians * T::from_f64(180.0) / T::PI
}

/// Linearly interpolates between `a` and `b`.
///
/// `t` is not clamped, so values outside of `0..=1` extrapolate.
///
/// # Examples
///
/// ```
/// # use gpumath::*;
/// assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
/// assert_eq!(lerp(10.0, 20.0, 1.5), 25.0);
/// assert_eq!(lerp(10.0, 20.0, -0.5), 5.0);
/// ```
pub fn lerp<T: Scalar>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Computes the interpolation factor that [`lerp`] would need to produce `v` from `a` and `b`.
///
/// If `a` and `b` are within [`epsilon`] of each other, the factor is undefined and `a` is
/// returned.
pub fn inverse_lerp<T: Scalar>(a: T, b: T, v: T) -> T {
    let d = b - a;
    if d.abs() < T::from_f64(epsilon()) {
        a
    } else {
        (v - a) / d
    }
}

/// Computes `n` modulo `m`, with a result that has the sign of `m`.
///
/// # Examples
///
/// ```
/// # use gpumath::*;
/// assert_eq!(euclidean_modulo(-1.0, 3.0), 2.0);
/// assert_eq!(euclidean_modulo(4.0, 3.0), 1.0);
/// ```
pub fn euclidean_modulo<T: Scalar>(n: T, m: T) -> T {
    ((n % m) + m) % m
}

#[cfg(test)]
mod tests {
    use std::{f64::consts::PI, thread};

    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn angles() {
        assert_approx_eq!(deg_to_rad(180.0), PI);
        assert_approx_eq!(deg_to_rad(90.0f32), std::f32::consts::FRAC_PI_2);
        assert_approx_eq!(rad_to_deg(PI / 4.0), 45.0);
    }

    #[test]
    fn lerp_extrapolates() {
        assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
        assert_eq!(lerp(10.0, 20.0, 1.5), 25.0);
        assert_eq!(lerp(10.0, 20.0, -0.5), 5.0);
        assert_eq!(lerp(10.0f32, 20.0, 0.0), 10.0);
    }

    #[test]
    fn inverse_lerp_values() {
        assert_eq!(inverse_lerp(10.0, 20.0, 15.0), 0.5);
        assert_eq!(inverse_lerp(10.0, 20.0, 30.0), 2.0);
        assert_eq!(inverse_lerp(10.0, 20.0, 5.0), -0.5);
        // Degenerate range.
        assert_eq!(inverse_lerp(10.0, 10.0, 123.0), 10.0);
    }

    #[test]
    fn modulo() {
        assert_eq!(euclidean_modulo(7.0, 3.0), 1.0);
        assert_eq!(euclidean_modulo(-7.0, 3.0), 2.0);
        assert_eq!(euclidean_modulo(-0.5f32, 2.0), 1.5);
    }

    #[test]
    fn set_returns_previous() {
        let _guard = scoped_epsilon(0.25);
        assert_eq!(set_epsilon(0.5), 0.25);
        assert_eq!(set_epsilon(0.25), 0.5);
        assert_eq!(epsilon(), 0.25);
    }

    #[test]
    fn scoped_restores() {
        let before = epsilon();
        {
            let _guard = scoped_epsilon(1.0);
            assert_eq!(epsilon(), 1.0);
            {
                let _inner = scoped_epsilon(2.0);
                assert_eq!(epsilon(), 2.0);
            }
            assert_eq!(epsilon(), 1.0);
        }
        assert_eq!(epsilon(), before);
    }

    #[test]
    fn thread_local() {
        let _guard = scoped_epsilon(0.125);
        let other = thread::spawn(epsilon).join().unwrap();
        assert_eq!(other, *INITIAL_EPSILON);
        assert_eq!(epsilon(), 0.125);
    }
}
