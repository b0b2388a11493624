//! Destinations: where an operation writes its result.
//!
//! Every operation that produces a vector, matrix or quaternion takes a trailing `dst` argument
//! implementing [`Dst`]:
//!
//! - [`New`] allocates a fresh container through the operation set's [`Storage`] policy and
//!   returns it. This is the only way an operation allocates, and it allocates exactly once.
//! - A mutable slice (`&mut [T]`) is overwritten and returned. No allocation happens. The slice
//!   has to be at least as long as the result, otherwise the operation panics.
//!
//! ```
//! # use gpumath::*;
//! let v3 = vec3();
//! let a = v3.from_values(1.0, 2.0, 3.0);
//! let b = v3.add(&a, &a, New);
//! assert_eq!(&*b, &[2.0, 4.0, 6.0]);
//!
//! let mut out = [0.0f32; 3];
//! v3.add(&a, &b, &mut out[..]);
//! assert_eq!(out, [3.0, 6.0, 9.0]);
//! ```
//!
//! # Aliasing
//!
//! All operations read their operands into local values before writing any element of the
//! destination. Using an operand as the destination is therefore always correct. Since Rust does
//! not allow passing the same buffer as `&[T]` and `&mut [T]` at once, the `in_place` method of
//! every operation set hands the operation a stack copy of the value alongside the value itself:
//!
//! ```
//! # use gpumath::*;
//! let m4 = mat4();
//! let mut m = m4.identity(New);
//! m4.in_place(&mut m, |m4, src, dst| {
//!     m4.translate(src, &[1.0, 2.0, 3.0], dst);
//! });
//! assert_eq!(&m[12..15], &[1.0, 2.0, 3.0]);
//! ```

use std::array;

use crate::{storage::Elem, Storage};

/// A destination for the result of an operation. See the [module documentation](self).
pub trait Dst<S: Storage> {
    /// What the operation returns when writing to this destination.
    type Output;

    /// Stores `values` and returns the destination.
    fn fill<const N: usize>(self, values: [Elem<S>; N]) -> Self::Output;
}

/// Destination that allocates a new container for the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct New;

impl<S: Storage> Dst<S> for New {
    type Output = S::Container;

    #[inline]
    fn fill<const N: usize>(self, values: [Elem<S>; N]) -> S::Container {
        S::from_array(values)
    }
}

impl<'d, S: Storage> Dst<S> for &'d mut [Elem<S>] {
    type Output = &'d mut [Elem<S>];

    #[inline]
    fn fill<const N: usize>(self, values: [Elem<S>; N]) -> Self::Output {
        self[..N].copy_from_slice(&values);
        self
    }
}

/// Reads the first `N` elements of `src`.
///
/// Panics if `src` is shorter than `N`.
#[inline]
pub(crate) fn load<T: Copy, const N: usize>(src: &[T]) -> [T; N] {
    array::from_fn(|i| src[i])
}

/// Runs `op` with a snapshot of the first `N` elements of `value` as its source and `value` itself
/// as its destination.
pub(crate) fn update<'d, T: Copy, const N: usize>(
    value: &'d mut [T],
    op: impl FnOnce(&[T], &mut [T]),
) -> &'d mut [T] {
    let src: [T; N] = load(value);
    op(&src, value);
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayStorage, F32};

    #[test]
    fn new_allocates() {
        let out = <New as Dst<F32>>::fill(New, [1.0, 2.0, 3.0]);
        assert_eq!(&*out, &[1.0, 2.0, 3.0]);

        let out = <New as Dst<ArrayStorage>>::fill(New, [4.0; 2]);
        assert_eq!(out, vec![4.0, 4.0]);
    }

    #[test]
    fn slice_returns_same_reference() {
        let mut buf = [9.0f32; 4];
        let ptr = buf.as_ptr();
        let out = <&mut [f32] as Dst<F32>>::fill(&mut buf[..], [1.0, 2.0]);
        assert_eq!(out.as_ptr(), ptr);
        assert_eq!(buf, [1.0, 2.0, 9.0, 9.0]);
    }

    #[test]
    #[should_panic]
    fn slice_too_short() {
        let mut buf = [0.0f32; 2];
        <&mut [f32] as Dst<F32>>::fill(&mut buf[..], [1.0, 2.0, 3.0]);
    }

    #[test]
    fn update_snapshots() {
        let mut v = [1.0, 2.0, 3.0];
        update::<_, 3>(&mut v, |src, dst| {
            // Reads after the first write still see the original values.
            for i in 0..3 {
                dst[i] = src[2 - i];
            }
        });
        assert_eq!(v, [3.0, 2.0, 1.0]);
    }
}
