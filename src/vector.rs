use std::{array, fmt, marker::PhantomData};

use crate::{
    approx::ApproxEq,
    dst::{load, update},
    storage::Elem,
    utils::NORMALIZE_THRESHOLD,
    Dst, MinMax, One, Scalar, Sqrt, Storage, StorageKind, Trig, Zero,
};

mod vec2;
mod vec3;
mod vec4;

/// Operation set for 2-component vectors.
pub type Vec2Api<S> = VectorApi<S, 2>;
/// Operation set for 3-component vectors.
pub type Vec3Api<S> = VectorApi<S, 3>;
/// Operation set for 4-component vectors.
pub type Vec4Api<S> = VectorApi<S, 4>;

/// The operation set for `N`-component vectors stored according to policy `S`.
///
/// A vector is any container holding (at least) `N` elements. Operation sets are obtained from
/// [`apis`][crate::apis] or one of the short names like [`vec3`][crate::vec3].
///
/// # Construction
///
/// - [`VectorApi::create`] copies up to `N` values into a new container, leaving the rest at zero.
/// - `from_values` and `set` (defined per dimension) take one argument per component.
/// - [`VectorApi::zero`] produces the zero vector.
///
/// # Operations
///
/// Every operation producing a vector takes a trailing [`Dst`]; see the [`dst`][crate::dst]
/// module. Operations producing a scalar or a `bool` never allocate.
///
/// For vectors with 2 to 4 components, additional operations are provided by the
/// dimension-specific `impl` blocks (cross products, matrix transforms, rotations).
pub struct VectorApi<S: Storage, const N: usize> {
    kind: StorageKind,
    _storage: PhantomData<fn() -> S>,
}

impl<S: Storage, const N: usize> VectorApi<S, N> {
    pub(crate) fn new() -> Self {
        Self {
            kind: S::KIND,
            _storage: PhantomData,
        }
    }

    /// Returns the kind of storage this operation set allocates.
    pub fn storage(&self) -> StorageKind {
        self.kind
    }

    /// Allocates a vector holding `values`.
    ///
    /// Components not covered by `values` are left at zero; extra values are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// assert_eq!(&*vec3().create(&[1.0]), &[1.0, 0.0, 0.0]);
    /// assert_eq!(vec4n().create(&[1.0, 2.0]), vec![1.0, 2.0, 0.0, 0.0]);
    /// ```
    pub fn create(&self, values: &[Elem<S>]) -> S::Container {
        let mut out = S::alloc(N);
        for (elem, value) in out.as_mut().iter_mut().zip(values) {
            *elem = *value;
        }
        out
    }

    /// Writes the zero vector.
    pub fn zero<D: Dst<S>>(&self, dst: D) -> D::Output {
        dst.fill([S::Scalar::ZERO; N])
    }

    #[doc(alias = "clone")]
    pub fn copy<D: Dst<S>>(&self, v: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(load::<_, N>(v))
    }

    /// Rounds each component up.
    pub fn ceil<D: Dst<S>>(&self, v: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(map::<_, N>(v, Scalar::ceil))
    }

    /// Rounds each component down.
    pub fn floor<D: Dst<S>>(&self, v: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(map::<_, N>(v, Scalar::floor))
    }

    /// Rounds each component to the nearest integer, rounding half-way cases away from zero.
    pub fn round<D: Dst<S>>(&self, v: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(map::<_, N>(v, Scalar::round))
    }

    /// Clamps each component to the range `min..=max`.
    pub fn clamp<D: Dst<S>>(
        &self,
        v: &[Elem<S>],
        min: Elem<S>,
        max: Elem<S>,
        dst: D,
    ) -> D::Output {
        dst.fill(map::<_, N>(v, |x| x.clamp(min, max)))
    }

    pub fn add<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(zip::<_, N>(a, b, |a, b| a + b))
    }

    /// Computes `a + b * scale`.
    pub fn add_scaled<D: Dst<S>>(
        &self,
        a: &[Elem<S>],
        b: &[Elem<S>],
        scale: Elem<S>,
        dst: D,
    ) -> D::Output {
        dst.fill(zip::<_, N>(a, b, |a, b| a + b * scale))
    }

    #[doc(alias = "sub")]
    pub fn subtract<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(zip::<_, N>(a, b, |a, b| a - b))
    }

    /// Multiplies `a` and `b` component-wise.
    #[doc(alias = "mul")]
    pub fn multiply<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(zip::<_, N>(a, b, |a, b| a * b))
    }

    /// Divides `a` by `b` component-wise.
    #[doc(alias = "div")]
    pub fn divide<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(zip::<_, N>(a, b, |a, b| a / b))
    }

    #[doc(alias = "scale")]
    pub fn mul_scalar<D: Dst<S>>(&self, v: &[Elem<S>], k: Elem<S>, dst: D) -> D::Output {
        dst.fill(map::<_, N>(v, |x| x * k))
    }

    pub fn div_scalar<D: Dst<S>>(&self, v: &[Elem<S>], k: Elem<S>, dst: D) -> D::Output {
        dst.fill(map::<_, N>(v, |x| x / k))
    }

    /// Computes the reciprocal of each component.
    #[doc(alias = "invert")]
    pub fn inverse<D: Dst<S>>(&self, v: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(map::<_, N>(v, |x| S::Scalar::ONE / x))
    }

    pub fn negate<D: Dst<S>>(&self, v: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(map::<_, N>(v, |x| -x))
    }

    /// Linearly interpolates between `a` and `b`. `t` is not clamped.
    pub fn lerp<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], t: Elem<S>, dst: D) -> D::Output {
        dst.fill(zip::<_, N>(a, b, |a, b| a + t * (b - a)))
    }

    /// Linearly interpolates between `a` and `b`, with a separate factor for each component.
    pub fn lerp_v<D: Dst<S>>(
        &self,
        a: &[Elem<S>],
        b: &[Elem<S>],
        t: &[Elem<S>],
        dst: D,
    ) -> D::Output {
        let (a, b, t) = (load::<_, N>(a), load::<_, N>(b), load::<_, N>(t));
        dst.fill::<N>(array::from_fn(|i| a[i] + t[i] * (b[i] - a[i])))
    }

    /// Component-wise minimum.
    pub fn min<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(zip::<_, N>(a, b, MinMax::min))
    }

    /// Component-wise maximum.
    pub fn max<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(zip::<_, N>(a, b, MinMax::max))
    }

    pub fn dot(&self, a: &[Elem<S>], b: &[Elem<S>]) -> Elem<S> {
        dot(&load::<_, N>(a), &load::<_, N>(b))
    }

    #[doc(alias = "len_sq")]
    pub fn length_sq(&self, v: &[Elem<S>]) -> Elem<S> {
        self.dot(v, v)
    }

    #[doc(alias = "len")]
    pub fn length(&self, v: &[Elem<S>]) -> Elem<S> {
        self.length_sq(v).sqrt()
    }

    #[doc(alias = "dist_sq")]
    pub fn distance_sq(&self, a: &[Elem<S>], b: &[Elem<S>]) -> Elem<S> {
        let d = zip::<_, N>(a, b, |a, b| a - b);
        dot(&d, &d)
    }

    #[doc(alias = "dist")]
    pub fn distance(&self, a: &[Elem<S>], b: &[Elem<S>]) -> Elem<S> {
        self.distance_sq(a, b).sqrt()
    }

    /// Divides `v` by its length.
    ///
    /// Vectors whose length is at or below [`NORMALIZE_THRESHOLD`] normalize to the zero vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// let v3 = vec3d();
    /// assert_eq!(&*v3.normalize(&[0.0, 0.0, 4.0], New), &[0.0, 0.0, 1.0]);
    /// assert_eq!(&*v3.normalize(&[0.0, 0.0, 0.0], New), &[0.0, 0.0, 0.0]);
    /// ```
    pub fn normalize<D: Dst<S>>(&self, v: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(normalize(load::<_, N>(v)))
    }

    /// Scales `v` to have length `len`. Degenerate vectors yield zero.
    pub fn set_length<D: Dst<S>>(&self, v: &[Elem<S>], len: Elem<S>, dst: D) -> D::Output {
        dst.fill(normalize(load::<_, N>(v)).map(|x| x * len))
    }

    /// Shortens `v` to `max_len` if it is longer than that, and copies it otherwise.
    pub fn truncate<D: Dst<S>>(&self, v: &[Elem<S>], max_len: Elem<S>, dst: D) -> D::Output {
        if self.length(v) > max_len {
            self.set_length(v, max_len, dst)
        } else {
            self.copy(v, dst)
        }
    }

    /// Computes the point halfway between `a` and `b`.
    pub fn midpoint<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        self.lerp(a, b, S::Scalar::HALF, dst)
    }

    /// Computes the unsigned angle between `a` and `b`, in radians.
    ///
    /// If either vector has zero length, the result is a quarter turn.
    pub fn angle(&self, a: &[Elem<S>], b: &[Elem<S>]) -> Elem<S> {
        let mag = (self.length_sq(a) * self.length_sq(b)).sqrt();
        let cosine = if mag == S::Scalar::ZERO {
            S::Scalar::ZERO
        } else {
            self.dot(a, b) / mag
        };
        cosine.clamp(-S::Scalar::ONE, S::Scalar::ONE).acos()
    }

    /// Returns whether each component of `a` equals the one in `b`.
    pub fn equals(&self, a: &[Elem<S>], b: &[Elem<S>]) -> bool {
        load::<_, N>(a) == load::<_, N>(b)
    }

    /// Returns whether each component of `a` is within [`epsilon`][crate::epsilon] of the one in
    /// `b`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// let v2 = vec2();
    /// assert!(v2.equals_approximately(&[2.0, 3.0], &[2.0 + 0.0000005, 3.0]));
    /// assert!(!v2.equals_approximately(&[2.0, 3.0], &[2.001, 3.0]));
    /// ```
    pub fn equals_approximately(&self, a: &[Elem<S>], b: &[Elem<S>]) -> bool {
        let eps = S::Scalar::from_f64(crate::epsilon());
        load::<_, N>(a).abs_diff_eq(&load::<_, N>(b), eps)
    }

    /// Runs `op` with `v` as both its operand and its destination.
    ///
    /// `op` receives a copy of `v` to read from, and `v` itself to write to.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// let v3 = vec3();
    /// let mut v = v3.from_values(1.0, 2.0, 3.0);
    /// v3.in_place(&mut v, |v3, src, dst| {
    ///     v3.cross(src, &[0.0, 0.0, 1.0], dst);
    /// });
    /// assert_eq!(&*v, &[2.0, -1.0, 0.0]);
    /// ```
    pub fn in_place<'d>(
        &self,
        v: &'d mut [Elem<S>],
        op: impl FnOnce(&Self, &[Elem<S>], &mut [Elem<S>]),
    ) -> &'d mut [Elem<S>] {
        update::<_, N>(v, |src, dst| op(self, src, dst))
    }
}

impl<S: Storage, const N: usize> fmt::Debug for VectorApi<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorApi")
            .field("storage", &self.kind)
            .field("components", &N)
            .finish()
    }
}

fn map<T: Copy, const N: usize>(v: &[T], f: impl Fn(T) -> T) -> [T; N] {
    load::<_, N>(v).map(f)
}

fn zip<T: Copy, const N: usize>(a: &[T], b: &[T], f: impl Fn(T, T) -> T) -> [T; N] {
    let (a, b) = (load::<_, N>(a), load::<_, N>(b));
    array::from_fn(|i| f(a[i], b[i]))
}

pub(crate) fn dot<T: Scalar, const N: usize>(a: &[T; N], b: &[T; N]) -> T {
    a.iter().zip(b).fold(T::ZERO, |acc, (&a, &b)| acc + a * b)
}

pub(crate) fn normalize<T: Scalar, const N: usize>(v: [T; N]) -> [T; N] {
    let len = dot(&v, &v).sqrt();
    if len > T::from_f64(NORMALIZE_THRESHOLD) {
        v.map(|x| x / len)
    } else {
        [T::ZERO; N]
    }
}

pub(crate) fn cross<T: Scalar>([a1, a2, a3]: [T; 3], [b1, b2, b3]: [T; 3]) -> [T; 3] {
    #[rustfmt::skip]
    let cross = [
        a2 * b3 - a3 * b2,
        a3 * b1 - a1 * b3,
        a1 * b2 - a2 * b1,
    ];
    cross
}
