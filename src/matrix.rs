use std::{array, fmt, marker::PhantomData};

use crate::{
    approx::ApproxEq,
    dst::{load, update},
    storage::Elem,
    Dst, One, Scalar, Storage, StorageKind, Zero,
};

mod mat3;
mod mat4;

/// Operation set for 3x3 matrices.
///
/// 3x3 matrices occupy **12** slots: three columns of 4 elements each, where the 4th element of
/// every column (slots 3, 7 and 11) is padding. This matches the layout of a `mat3x3<f32>` in a
/// WGSL uniform buffer. Every operation writes 0 to the padding slots and ignores whatever the
/// inputs hold there.
pub type Mat3Api<S> = MatrixApi<S, 3, 12>;

/// Operation set for 4x4 matrices.
///
/// 4x4 matrices occupy 16 slots, stored column by column; slots 12, 13 and 14 hold the
/// translation.
pub type Mat4Api<S> = MatrixApi<S, 4, 16>;

/// The operation set for square `DIM`x`DIM` matrices with columns padded to 4 elements, stored
/// according to policy `S` in `LEN` slots.
///
/// Only the two instantiations [`Mat3Api`] and [`Mat4Api`] exist.
///
/// # Layout
///
/// Matrices are *column-major*: slot `c * 4 + r` holds the element in row `r` and column `c`.
/// Vectors are treated as columns, so [`MatrixApi::multiply`]`(a, b)` applies `b` first, and
/// methods like `translate` or `rotate_x` append their transform on the right-hand side.
///
/// # Operations
///
/// Like all operation sets, operations producing a matrix take a trailing [`Dst`]. Operations
/// that produce vectors (such as `get_translation`) write as many slots as the vector has.
pub struct MatrixApi<S: Storage, const DIM: usize, const LEN: usize> {
    kind: StorageKind,
    identity: [Elem<S>; LEN],
    _storage: PhantomData<fn() -> S>,
}

impl<S: Storage, const DIM: usize, const LEN: usize> MatrixApi<S, DIM, LEN> {
    pub(crate) fn new() -> Self {
        Self {
            kind: S::KIND,
            identity: identity::<_, LEN>(),
            _storage: PhantomData,
        }
    }

    /// Returns the kind of storage this operation set allocates.
    pub fn storage(&self) -> StorageKind {
        self.kind
    }

    /// Allocates a matrix holding `values`, given column by column without padding.
    ///
    /// Elements not covered by `values` are left at zero, as are the padding slots of 3x3
    /// matrices.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// let m = mat3().create(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(&*m, &[1.0, 2.0, 3.0, 0.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    /// ```
    pub fn create(&self, values: &[Elem<S>]) -> S::Container {
        let mut out = S::alloc(LEN);
        let slots = out.as_mut().iter_mut().enumerate();
        for ((_, elem), value) in slots.filter(|(i, _)| i % 4 < DIM).zip(values) {
            *elem = *value;
        }
        out
    }

    /// Writes the identity matrix.
    pub fn identity<D: Dst<S>>(&self, dst: D) -> D::Output {
        dst.fill(self.identity)
    }

    #[doc(alias = "clone")]
    pub fn copy<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(elements::<_, DIM, LEN>(m))
    }

    pub fn negate<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(map::<_, DIM, LEN>(m, |x| -x))
    }

    /// Adds `a` and `b` element-wise.
    pub fn add<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        let (a, b) = (elements::<_, DIM, LEN>(a), elements::<_, DIM, LEN>(b));
        dst.fill::<LEN>(array::from_fn(|i| a[i] + b[i]))
    }

    /// Multiplies every element of `m` by `k`.
    #[doc(alias = "mul_scalar")]
    pub fn multiply_scalar<D: Dst<S>>(&self, m: &[Elem<S>], k: Elem<S>, dst: D) -> D::Output {
        dst.fill(map::<_, DIM, LEN>(m, |x| x * k))
    }

    /// Computes the matrix product `a * b`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// let m4 = mat4();
    /// let t = m4.translation(&[1.0, 2.0, 3.0], New);
    /// let i = m4.identity(New);
    /// assert!(m4.equals(&m4.multiply(&i, &t, New), &t));
    /// assert!(m4.equals(&m4.multiply(&t, &i, New), &t));
    /// ```
    #[doc(alias = "mul")]
    pub fn multiply<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        let (a, b) = (elements::<_, DIM, LEN>(a), elements::<_, DIM, LEN>(b));
        dst.fill(multiply::<_, DIM, LEN>(&a, &b))
    }

    pub fn transpose<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        let m = elements::<_, DIM, LEN>(m);
        dst.fill::<LEN>(array::from_fn(|i| {
            let (c, r) = (i / 4, i % 4);
            if r < DIM {
                m[r * 4 + c]
            } else {
                S::Scalar::ZERO
            }
        }))
    }

    /// Transposes `m` by swapping its elements. Padding slots are reset to zero.
    pub fn transpose_in_place<'m>(&self, m: &'m mut [Elem<S>]) -> &'m mut [Elem<S>] {
        for c in 0..DIM {
            for r in c + 1..DIM {
                m.swap(c * 4 + r, r * 4 + c);
            }
            for r in DIM..4 {
                m[c * 4 + r] = S::Scalar::ZERO;
            }
        }
        m
    }

    /// Returns whether every element of `a` equals the one in `b`. Padding is not compared.
    pub fn equals(&self, a: &[Elem<S>], b: &[Elem<S>]) -> bool {
        (0..LEN).filter(|i| i % 4 < DIM).all(|i| a[i] == b[i])
    }

    /// Returns whether every element of `a` is within [`epsilon`][crate::epsilon] of the one in
    /// `b`. Padding is not compared.
    pub fn equals_approximately(&self, a: &[Elem<S>], b: &[Elem<S>]) -> bool {
        let eps = S::Scalar::from_f64(crate::epsilon());
        elements::<_, DIM, LEN>(a).abs_diff_eq(&elements::<_, DIM, LEN>(b), eps)
    }

    /// Runs `op` with `m` as both its operand and its destination.
    ///
    /// `op` receives a copy of `m` to read from, and `m` itself to write to.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// let m3 = mat3();
    /// let mut m = m3.translation(&[2.0, 3.0], New);
    /// m3.in_place(&mut m, |m3, src, dst| {
    ///     m3.multiply(src, src, dst);
    /// });
    /// assert_eq!(&*m3.get_translation(&m, New), &[4.0, 6.0]);
    /// ```
    pub fn in_place<'d>(
        &self,
        m: &'d mut [Elem<S>],
        op: impl FnOnce(&Self, &[Elem<S>], &mut [Elem<S>]),
    ) -> &'d mut [Elem<S>] {
        update::<_, LEN>(m, |src, dst| op(self, src, dst))
    }
}

impl<S: Storage, const DIM: usize, const LEN: usize> fmt::Debug for MatrixApi<S, DIM, LEN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixApi")
            .field("storage", &self.kind)
            .field("dimension", &DIM)
            .finish()
    }
}

fn identity<T: Scalar, const LEN: usize>() -> [T; LEN] {
    array::from_fn(|i| if i / 4 == i % 4 { T::ONE } else { T::ZERO })
}

/// Loads the first `LEN` slots of `m`, zeroing the padding.
pub(crate) fn elements<T: Scalar, const DIM: usize, const LEN: usize>(m: &[T]) -> [T; LEN] {
    let mut m = load::<_, LEN>(m);
    for (i, elem) in m.iter_mut().enumerate() {
        if i % 4 >= DIM {
            *elem = T::ZERO;
        }
    }
    m
}

/// Applies `f` to every element of `m`, leaving the padding at zero.
fn map<T: Scalar, const DIM: usize, const LEN: usize>(m: &[T], f: impl Fn(T) -> T) -> [T; LEN] {
    let m = load::<_, LEN>(m);
    array::from_fn(|i| if i % 4 < DIM { f(m[i]) } else { T::ZERO })
}

pub(crate) fn multiply<T: Scalar, const DIM: usize, const LEN: usize>(
    a: &[T; LEN],
    b: &[T; LEN],
) -> [T; LEN] {
    array::from_fn(|i| {
        let (c, r) = (i / 4, i % 4);
        if r < DIM {
            (0..DIM).fold(T::ZERO, |acc, k| acc + a[k * 4 + r] * b[c * 4 + k])
        } else {
            T::ZERO
        }
    })
}

/// Multiplies column `c` of `m` by `k[c]`.
pub(crate) fn scale_columns<T: Scalar, const DIM: usize, const LEN: usize>(
    m: &[T; LEN],
    k: [T; DIM],
) -> [T; LEN] {
    array::from_fn(|i| m[i] * k[i / 4])
}

/// Builds the rotation matrix of the unit quaternion `[x, y, z, w]`, in 3x3 (padded) layout.
pub(crate) fn rotation_from_quat<T: Scalar>([x, y, z, w]: [T; 4]) -> [T; 12] {
    let (x2, y2, z2) = (x + x, y + y, z + z);

    let xx = x * x2;
    let yx = y * x2;
    let yy = y * y2;
    let zx = z * x2;
    let zy = z * y2;
    let zz = z * z2;
    let wx = w * x2;
    let wy = w * y2;
    let wz = w * z2;

    let (zero, one) = (T::ZERO, T::ONE);
    #[rustfmt::skip]
    let m = [
        one - yy - zz, yx + wz,       zx - wy,       zero,
        yx - wz,       one - xx - zz, zy + wx,       zero,
        zx + wy,       zy - wx,       one - xx - yy, zero,
    ];
    m
}

#[cfg(test)]
mod tests {
    use crate::{mat3, mat3d, mat4, mat4d, New};

    #[test]
    fn identity_layout() {
        #[rustfmt::skip]
        assert_eq!(&*mat3().identity(New), &[
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
        ]);
        let i = mat4d().identity(New);
        for (slot, &elem) in i.iter().enumerate() {
            let expected = if [0, 5, 10, 15].contains(&slot) { 1.0 } else { 0.0 };
            assert_eq!(elem, expected, "slot {slot}");
        }
    }

    #[test]
    fn multiply_identity_is_exact() {
        let m4 = mat4d();
        let i = m4.identity(New);
        let m: Vec<f64> = (0..16).map(|i| i as f64 * 0.37 - 2.0).collect();
        assert_eq!(&*m4.multiply(&i, &m, New), &m[..]);
        assert_eq!(&*m4.multiply(&m, &i, New), &m[..]);

        let m3 = mat3d();
        let i = m3.identity(New);
        let m = m3.create(&[1.5, -2.0, 3.25, 4.0, 5.0, 6.0, -7.0, 8.0, 9.5]);
        assert_eq!(m3.multiply(&i, &m, New), m);
        assert_eq!(m3.multiply(&m, &i, New), m);
    }

    #[test]
    fn multiply_order() {
        let m4 = mat4d();
        let t = m4.translation(&[1.0, 0.0, 0.0], New);
        let s = m4.scaling(&[2.0, 2.0, 2.0], New);
        // Scale first, then translate.
        let ts = m4.multiply(&t, &s, New);
        assert_eq!(&ts[12..15], &[1.0, 0.0, 0.0]);
        // Translate first, then scale.
        let st = m4.multiply(&s, &t, New);
        assert_eq!(&st[12..15], &[2.0, 0.0, 0.0]);
    }

    #[test]
    fn transpose_twice() {
        let m4 = mat4d();
        let m: Vec<f64> = (0..16).map(f64::from).collect();
        let t = m4.transpose(&m, New);
        assert_eq!(t[1], 4.0);
        assert_eq!(t[4], 1.0);
        assert_eq!(&*m4.transpose(&t, New), &m[..]);

        let mut in_place = m.clone();
        m4.transpose_in_place(&mut in_place);
        assert_eq!(&*in_place, &*t);
    }

    #[test]
    fn mat3_transpose_in_place_clears_padding() {
        let m3 = mat3();
        let mut m = m3.create(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        m[3] = 5.0;
        m[7] = -1.0;
        m[11] = 2.5;
        let t = m3.transpose(&m, New);
        m3.transpose_in_place(&mut m);
        assert_eq!(m, t);
        #[rustfmt::skip]
        assert_eq!(&*t, &[
            1.0, 4.0, 7.0, 0.0,
            2.0, 5.0, 8.0, 0.0,
            3.0, 6.0, 9.0, 0.0,
        ]);
    }

    #[test]
    fn padding_is_ignored() {
        let m3 = mat3();
        let a = m3.identity(New);
        let mut b = a.clone();
        b[3] = 5.0;
        b[11] = -1.0;
        assert!(m3.equals(&a, &b));
        assert!(m3.equals_approximately(&a, &b));
        assert_eq!(m3.copy(&b, New), a);
    }

    #[test]
    fn element_wise() {
        let m4 = mat4();
        let a = m4.translation(&[1.0, 2.0, 3.0], New);
        let sum = m4.add(&a, &a, New);
        assert_eq!(sum[0], 2.0);
        assert_eq!(&sum[12..], &[2.0, 4.0, 6.0, 2.0]);
        assert_eq!(m4.multiply_scalar(&a, 2.0, New), sum);
        let neg = m4.negate(&a, New);
        assert_eq!(&neg[12..], &[-1.0, -2.0, -3.0, -1.0]);
    }

    #[test]
    fn approximate_equality() {
        let m4 = mat4();
        let a = m4.identity(New);
        let mut b = a.clone();
        b[7] = 0.0000005;
        assert!(!m4.equals(&a, &b));
        assert!(m4.equals_approximately(&a, &b));
        b[7] = 0.001;
        assert!(!m4.equals_approximately(&a, &b));
    }
}
