use crate::{dst::load, storage::Elem, Dst, One, Scalar, Sqrt, Storage, Zero};

use super::{elements, multiply, rotation_from_quat, scale_columns, MatrixApi};

impl<S: Storage> MatrixApi<S, 3, 12> {
    /// Writes a matrix with the given 9 elements, given column by column.
    pub fn set<D: Dst<S>>(&self, values: [Elem<S>; 9], dst: D) -> D::Output {
        let [v0, v1, v2, v3, v4, v5, v6, v7, v8] = values;
        let zero = S::Scalar::ZERO;
        dst.fill([v0, v1, v2, zero, v3, v4, v5, zero, v6, v7, v8, zero])
    }

    /// Extracts the upper-left 3x3 part of the 4x4 matrix `m4`.
    pub fn from_mat4<D: Dst<S>>(&self, m4: &[Elem<S>], dst: D) -> D::Output {
        let m = load::<_, 16>(m4);
        dst.fill(elements::<_, 3, 12>(&m[..12]))
    }

    /// Builds the rotation matrix of the unit quaternion `q`.
    pub fn from_quat<D: Dst<S>>(&self, q: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(rotation_from_quat(load(q)))
    }

    /// Computes the inverse of `m`.
    ///
    /// The determinant is not checked: inverting a singular matrix produces infinite or NaN
    /// elements.
    #[doc(alias = "invert")]
    pub fn inverse<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        let [m00, m01, m02, _, m10, m11, m12, _, m20, m21, m22, _] = load::<_, 12>(m);

        let b01 = m22 * m11 - m12 * m21;
        let b11 = -m22 * m10 + m12 * m20;
        let b21 = m21 * m10 - m11 * m20;

        let inv_det = S::Scalar::ONE / (m00 * b01 + m01 * b11 + m02 * b21);
        let zero = S::Scalar::ZERO;

        #[rustfmt::skip]
        let inverse = [
            b01 * inv_det,
            (-m22 * m01 + m02 * m21) * inv_det,
            (m12 * m01 - m02 * m11) * inv_det,
            zero,
            b11 * inv_det,
            (m22 * m00 - m02 * m20) * inv_det,
            (-m12 * m00 + m02 * m10) * inv_det,
            zero,
            b21 * inv_det,
            (-m21 * m00 + m01 * m20) * inv_det,
            (m11 * m00 - m01 * m10) * inv_det,
            zero,
        ];
        dst.fill(inverse)
    }

    pub fn determinant(&self, m: &[Elem<S>]) -> Elem<S> {
        let [m00, m01, m02, _, m10, m11, m12, _, m20, m21, m22, _] = load::<_, 12>(m);
        m00 * (m11 * m22 - m21 * m12) - m10 * (m01 * m22 - m21 * m02)
            + m20 * (m01 * m12 - m11 * m02)
    }

    /// Extracts the 2D translation of `m`.
    pub fn get_translation<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        dst.fill([m[8], m[9]])
    }

    /// Copies `m`, replacing its 2D translation with `v`.
    pub fn set_translation<D: Dst<S>>(
        &self,
        m: &[Elem<S>],
        v: &[Elem<S>],
        dst: D,
    ) -> D::Output {
        let mut out = elements::<_, 3, 12>(m);
        out[8..10].copy_from_slice(&v[..2]);
        dst.fill(out)
    }

    /// Extracts the first two elements of basis vector `axis` (0 = x, 1 = y) of `m`.
    pub fn get_axis<D: Dst<S>>(&self, m: &[Elem<S>], axis: usize, dst: D) -> D::Output {
        let off = axis * 4;
        dst.fill([m[off], m[off + 1]])
    }

    /// Copies `m`, replacing the first two elements of basis vector `axis` with `v`.
    pub fn set_axis<D: Dst<S>>(
        &self,
        m: &[Elem<S>],
        v: &[Elem<S>],
        axis: usize,
        dst: D,
    ) -> D::Output {
        let off = axis * 4;
        let mut out = elements::<_, 3, 12>(m);
        out[off..off + 2].copy_from_slice(&v[..2]);
        dst.fill(out)
    }

    /// Computes the 2D scale factors of `m`.
    pub fn get_scaling<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        let m = load::<_, 12>(m);
        dst.fill([0, 4].map(|off| (m[off] * m[off] + m[off + 1] * m[off + 1]).sqrt()))
    }

    /// Computes the 3D scale factors of `m`.
    pub fn get_3d_scaling<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        let m = load::<_, 12>(m);
        dst.fill([0, 4, 8].map(|off| {
            (m[off] * m[off] + m[off + 1] * m[off + 1] + m[off + 2] * m[off + 2]).sqrt()
        }))
    }

    /// Builds a matrix translating 2D points by `v`.
    pub fn translation<D: Dst<S>>(&self, v: &[Elem<S>], dst: D) -> D::Output {
        let mut out = self.identity;
        out[8..10].copy_from_slice(&v[..2]);
        dst.fill(out)
    }

    /// Translates `m` by `v`.
    pub fn translate<D: Dst<S>>(&self, m: &[Elem<S>], v: &[Elem<S>], dst: D) -> D::Output {
        let [x, y] = load::<_, 2>(v);
        let mut out = elements::<_, 3, 12>(m);
        for r in 0..3 {
            out[8 + r] = out[r] * x + out[4 + r] * y + out[8 + r];
        }
        dst.fill(out)
    }

    /// Builds a matrix rotating 2D points counterclockwise by `angle` radians.
    pub fn rotation<D: Dst<S>>(&self, angle: Elem<S>, dst: D) -> D::Output {
        dst.fill(rotation_z(angle))
    }

    /// Rotates `m` by `angle` radians in the XY plane.
    pub fn rotate<D: Dst<S>>(&self, m: &[Elem<S>], angle: Elem<S>, dst: D) -> D::Output {
        self.transform(m, rotation_z(angle), dst)
    }

    /// Builds a matrix rotating around the X axis by `angle` radians.
    pub fn rotation_x<D: Dst<S>>(&self, angle: Elem<S>, dst: D) -> D::Output {
        dst.fill(rotation_x(angle))
    }

    pub fn rotate_x<D: Dst<S>>(&self, m: &[Elem<S>], angle: Elem<S>, dst: D) -> D::Output {
        self.transform(m, rotation_x(angle), dst)
    }

    /// Builds a matrix rotating around the Y axis by `angle` radians.
    pub fn rotation_y<D: Dst<S>>(&self, angle: Elem<S>, dst: D) -> D::Output {
        dst.fill(rotation_y(angle))
    }

    pub fn rotate_y<D: Dst<S>>(&self, m: &[Elem<S>], angle: Elem<S>, dst: D) -> D::Output {
        self.transform(m, rotation_y(angle), dst)
    }

    /// Builds a matrix rotating around the Z axis by `angle` radians.
    ///
    /// This is the same matrix as [`MatrixApi::rotation`].
    pub fn rotation_z<D: Dst<S>>(&self, angle: Elem<S>, dst: D) -> D::Output {
        self.rotation(angle, dst)
    }

    pub fn rotate_z<D: Dst<S>>(&self, m: &[Elem<S>], angle: Elem<S>, dst: D) -> D::Output {
        self.rotate(m, angle, dst)
    }

    /// Builds a matrix scaling 2D points by `v`.
    pub fn scaling<D: Dst<S>>(&self, v: &[Elem<S>], dst: D) -> D::Output {
        let [x, y] = load::<_, 2>(v);
        dst.fill(scale_columns(&self.identity, [x, y, S::Scalar::ONE]))
    }

    /// Scales the first two basis vectors of `m` by `v`.
    pub fn scale<D: Dst<S>>(&self, m: &[Elem<S>], v: &[Elem<S>], dst: D) -> D::Output {
        let [x, y] = load::<_, 2>(v);
        let m = elements::<_, 3, 12>(m);
        dst.fill(scale_columns(&m, [x, y, S::Scalar::ONE]))
    }

    pub fn uniform_scaling<D: Dst<S>>(&self, s: Elem<S>, dst: D) -> D::Output {
        self.scaling(&[s, s], dst)
    }

    pub fn uniform_scale<D: Dst<S>>(&self, m: &[Elem<S>], s: Elem<S>, dst: D) -> D::Output {
        self.scale(m, &[s, s], dst)
    }

    /// Builds a matrix scaling 3D points by `v`.
    pub fn scaling_3d<D: Dst<S>>(&self, v: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(scale_columns(&self.identity, load::<_, 3>(v)))
    }

    /// Scales all three basis vectors of `m` by `v`.
    pub fn scale_3d<D: Dst<S>>(&self, m: &[Elem<S>], v: &[Elem<S>], dst: D) -> D::Output {
        let m = elements::<_, 3, 12>(m);
        dst.fill(scale_columns(&m, load::<_, 3>(v)))
    }

    pub fn uniform_scaling_3d<D: Dst<S>>(&self, s: Elem<S>, dst: D) -> D::Output {
        dst.fill(scale_columns(&self.identity, [s; 3]))
    }

    pub fn uniform_scale_3d<D: Dst<S>>(&self, m: &[Elem<S>], s: Elem<S>, dst: D) -> D::Output {
        let m = elements::<_, 3, 12>(m);
        dst.fill(scale_columns(&m, [s; 3]))
    }

    /// Computes `m * t`.
    fn transform<D: Dst<S>>(&self, m: &[Elem<S>], t: [Elem<S>; 12], dst: D) -> D::Output {
        let m = elements::<_, 3, 12>(m);
        dst.fill(multiply::<_, 3, 12>(&m, &t))
    }
}

fn rotation_x<T: Scalar>(angle: T) -> [T; 12] {
    let (s, c) = (angle.sin(), angle.cos());
    let (o, l) = (T::ZERO, T::ONE);
    #[rustfmt::skip]
    let m = [
        l, o,  o, o,
        o, c,  s, o,
        o, -s, c, o,
    ];
    m
}

fn rotation_y<T: Scalar>(angle: T) -> [T; 12] {
    let (s, c) = (angle.sin(), angle.cos());
    let (o, l) = (T::ZERO, T::ONE);
    #[rustfmt::skip]
    let m = [
        c, o, -s, o,
        o, l, o,  o,
        s, o, c,  o,
    ];
    m
}

fn rotation_z<T: Scalar>(angle: T) -> [T; 12] {
    let (s, c) = (angle.sin(), angle.cos());
    let (o, l) = (T::ZERO, T::ONE);
    #[rustfmt::skip]
    let m = [
        c,  s, o, o,
        -s, c, o, o,
        o,  o, l, o,
    ];
    m
}
