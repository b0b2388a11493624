use crate::{
    dst::load,
    storage::Elem,
    vector::{cross, dot, normalize},
    Dst, One, Scalar, Sqrt, Storage, Trig, Zero,
};

use super::{elements, multiply, rotation_from_quat, scale_columns, MatrixApi};

impl<S: Storage> MatrixApi<S, 4, 16> {
    /// Writes a matrix with the given 16 elements, given column by column.
    pub fn set<D: Dst<S>>(&self, values: [Elem<S>; 16], dst: D) -> D::Output {
        dst.fill(values)
    }

    /// Builds a 4x4 matrix from the 3x3 matrix `m3`, with no translation.
    pub fn from_mat3<D: Dst<S>>(&self, m3: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(extend(elements::<_, 3, 12>(m3)))
    }

    /// Builds the rotation matrix of the unit quaternion `q`.
    pub fn from_quat<D: Dst<S>>(&self, q: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(extend(rotation_from_quat(load(q))))
    }

    /// Computes the inverse of `m`.
    ///
    /// The determinant is not checked: inverting a singular matrix produces infinite or NaN
    /// elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// let m4 = mat4d();
    /// let m = m4.translate(&m4.rotation_y(0.5, New), &[1.0, 2.0, 3.0], New);
    /// let inv = m4.inverse(&m, New);
    /// assert!(m4.equals_approximately(&m4.multiply(&m, &inv, New), &m4.identity(New)));
    /// ```
    #[doc(alias = "invert")]
    pub fn inverse<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        let c = Cofactors::new(&load(m));
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] = c.a;
        let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = c.b;
        let inv = S::Scalar::ONE / c.determinant();

        #[rustfmt::skip]
        let inverse = [
            (a11 * b11 - a12 * b10 + a13 * b09) * inv,
            (a02 * b10 - a01 * b11 - a03 * b09) * inv,
            (a31 * b05 - a32 * b04 + a33 * b03) * inv,
            (a22 * b04 - a21 * b05 - a23 * b03) * inv,
            (a12 * b08 - a10 * b11 - a13 * b07) * inv,
            (a00 * b11 - a02 * b08 + a03 * b07) * inv,
            (a32 * b02 - a30 * b05 - a33 * b01) * inv,
            (a20 * b05 - a22 * b02 + a23 * b01) * inv,
            (a10 * b10 - a11 * b08 + a13 * b06) * inv,
            (a01 * b08 - a00 * b10 - a03 * b06) * inv,
            (a30 * b04 - a31 * b02 + a33 * b00) * inv,
            (a21 * b02 - a20 * b04 - a23 * b00) * inv,
            (a11 * b07 - a10 * b09 - a12 * b06) * inv,
            (a00 * b09 - a01 * b07 + a02 * b06) * inv,
            (a31 * b01 - a30 * b03 - a32 * b00) * inv,
            (a20 * b03 - a21 * b01 + a22 * b00) * inv,
        ];
        dst.fill(inverse)
    }

    pub fn determinant(&self, m: &[Elem<S>]) -> Elem<S> {
        Cofactors::new(&load(m)).determinant()
    }

    /// Extracts the translation of `m`.
    pub fn get_translation<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        dst.fill([m[12], m[13], m[14]])
    }

    /// Copies `m`, replacing its translation with `v`.
    pub fn set_translation<D: Dst<S>>(
        &self,
        m: &[Elem<S>],
        v: &[Elem<S>],
        dst: D,
    ) -> D::Output {
        let mut out = load::<_, 16>(m);
        out[12..15].copy_from_slice(&v[..3]);
        dst.fill(out)
    }

    /// Extracts basis vector `axis` (0 = x, 1 = y, 2 = z) of `m`.
    pub fn get_axis<D: Dst<S>>(&self, m: &[Elem<S>], axis: usize, dst: D) -> D::Output {
        let off = axis * 4;
        dst.fill([m[off], m[off + 1], m[off + 2]])
    }

    /// Copies `m`, replacing basis vector `axis` with `v`.
    pub fn set_axis<D: Dst<S>>(
        &self,
        m: &[Elem<S>],
        v: &[Elem<S>],
        axis: usize,
        dst: D,
    ) -> D::Output {
        let off = axis * 4;
        let mut out = load::<_, 16>(m);
        out[off..off + 3].copy_from_slice(&v[..3]);
        dst.fill(out)
    }

    /// Computes the scale factor along each axis of `m`.
    pub fn get_scaling<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        let m = load::<_, 16>(m);
        dst.fill([0, 4, 8].map(|off| {
            (m[off] * m[off] + m[off + 1] * m[off + 1] + m[off + 2] * m[off + 2]).sqrt()
        }))
    }

    /// Builds a perspective projection matrix.
    ///
    /// `fov_y` is the vertical field of view in radians, `aspect` is the width divided by the
    /// height of the viewport. Depth is mapped to the `0..=1` range of WebGPU clip space: `near`
    /// to 0, `far` to 1. `far` may be [`f32::INFINITY`], producing the limit of the projection as
    /// `far` grows without bound.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// let p = mat4().perspective(1.0, 1.5, 0.1, f32::INFINITY, New);
    /// assert_eq!(p[10], -1.0);
    /// assert_eq!(p[14], -0.1);
    /// ```
    pub fn perspective<D: Dst<S>>(
        &self,
        fov_y: Elem<S>,
        aspect: Elem<S>,
        near: Elem<S>,
        far: Elem<S>,
        dst: D,
    ) -> D::Output {
        let f = (S::Scalar::PI * S::Scalar::HALF - S::Scalar::HALF * fov_y).tan();
        let (z, zw) = if far.is_finite() {
            let range_inv = S::Scalar::ONE / (near - far);
            (far * range_inv, far * near * range_inv)
        } else {
            (-S::Scalar::ONE, -near)
        };
        dst.fill(projection(f / aspect, f, [S::Scalar::ZERO; 2], z, zw))
    }

    /// Builds a perspective projection matrix mapping `near` to depth 1 and `far` to depth 0.
    ///
    /// `far` may be [`f32::INFINITY`].
    pub fn perspective_reverse_z<D: Dst<S>>(
        &self,
        fov_y: Elem<S>,
        aspect: Elem<S>,
        near: Elem<S>,
        far: Elem<S>,
        dst: D,
    ) -> D::Output {
        let f = S::Scalar::ONE / (fov_y * S::Scalar::HALF).tan();
        let (z, zw) = reverse_z(near, far);
        dst.fill(projection(f / aspect, f, [S::Scalar::ZERO; 2], z, zw))
    }

    /// Builds an orthographic projection matrix mapping the given box to WebGPU clip space.
    ///
    /// Depth is mapped to `0..=1`, with `near` at 0.
    #[allow(clippy::too_many_arguments)]
    pub fn ortho<D: Dst<S>>(
        &self,
        left: Elem<S>,
        right: Elem<S>,
        bottom: Elem<S>,
        top: Elem<S>,
        near: Elem<S>,
        far: Elem<S>,
        dst: D,
    ) -> D::Output {
        let (zero, one, two) = (S::Scalar::ZERO, S::Scalar::ONE, S::Scalar::TWO);

        #[rustfmt::skip]
        let m = [
            two / (right - left), zero, zero, zero,
            zero, two / (top - bottom), zero, zero,
            zero, zero, one / (near - far), zero,
            (right + left) / (left - right), (top + bottom) / (bottom - top), near / (near - far), one,
        ];
        dst.fill(m)
    }

    /// Builds a perspective projection matrix from the bounds of the near plane.
    ///
    /// Depth is mapped to `0..=1`, with `near` at 0.
    #[allow(clippy::too_many_arguments)]
    pub fn frustum<D: Dst<S>>(
        &self,
        left: Elem<S>,
        right: Elem<S>,
        bottom: Elem<S>,
        top: Elem<S>,
        near: Elem<S>,
        far: Elem<S>,
        dst: D,
    ) -> D::Output {
        let dx = right - left;
        let dy = top - bottom;
        let dz = near - far;
        let near2 = near * S::Scalar::TWO;
        let shear = [(left + right) / dx, (top + bottom) / dy];
        dst.fill(projection(near2 / dx, near2 / dy, shear, far / dz, near * far / dz))
    }

    /// Like [`MatrixApi::frustum`], but maps `near` to depth 1 and `far` to depth 0.
    ///
    /// `far` may be [`f32::INFINITY`].
    #[allow(clippy::too_many_arguments)]
    pub fn frustum_reverse_z<D: Dst<S>>(
        &self,
        left: Elem<S>,
        right: Elem<S>,
        bottom: Elem<S>,
        top: Elem<S>,
        near: Elem<S>,
        far: Elem<S>,
        dst: D,
    ) -> D::Output {
        let dx = right - left;
        let dy = top - bottom;
        let near2 = near * S::Scalar::TWO;
        let shear = [(left + right) / dx, (top + bottom) / dy];
        let (z, zw) = reverse_z(near, far);
        dst.fill(projection(near2 / dx, near2 / dy, shear, z, zw))
    }

    /// Builds a matrix that places an object at `position`, with its Z axis pointing towards
    /// `target`.
    pub fn aim<D: Dst<S>>(
        &self,
        position: &[Elem<S>],
        target: &[Elem<S>],
        up: &[Elem<S>],
        dst: D,
    ) -> D::Output {
        let position = load::<_, 3>(position);
        let [x, y, z] = basis(sub(load(target), position), load(up));
        dst.fill(object_to_world(x, y, z, position))
    }

    /// Builds a matrix that places a camera at `eye`, looking at `target`.
    ///
    /// Cameras look down their negative Z axis, so the Z axis points away from `target`. This is
    /// the inverse of [`MatrixApi::look_at`].
    pub fn camera_aim<D: Dst<S>>(
        &self,
        eye: &[Elem<S>],
        target: &[Elem<S>],
        up: &[Elem<S>],
        dst: D,
    ) -> D::Output {
        let eye = load::<_, 3>(eye);
        let [x, y, z] = basis(sub(eye, load(target)), load(up));
        dst.fill(object_to_world(x, y, z, eye))
    }

    /// Builds a view matrix for a camera at `eye`, looking at `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// let (m4, v3) = (mat4(), vec3());
    /// let view = m4.look_at(&[0.0, 0.0, 5.0], &[0.0, 0.0, 0.0], &[0.0, 1.0, 0.0], New);
    /// let p = v3.transform_mat4(&[0.0, 0.0, 0.0], &view, New);
    /// assert_eq!(&*p, &[0.0, 0.0, -5.0]);
    /// ```
    pub fn look_at<D: Dst<S>>(
        &self,
        eye: &[Elem<S>],
        target: &[Elem<S>],
        up: &[Elem<S>],
        dst: D,
    ) -> D::Output {
        let eye = load::<_, 3>(eye);
        let [x, y, z] = basis(sub(eye, load(target)), load(up));
        let (zero, one) = (S::Scalar::ZERO, S::Scalar::ONE);

        #[rustfmt::skip]
        let m = [
            x[0], y[0], z[0], zero,
            x[1], y[1], z[1], zero,
            x[2], y[2], z[2], zero,
            -dot(&x, &eye), -dot(&y, &eye), -dot(&z, &eye), one,
        ];
        dst.fill(m)
    }

    /// Builds a matrix translating by `v`.
    pub fn translation<D: Dst<S>>(&self, v: &[Elem<S>], dst: D) -> D::Output {
        let mut out = self.identity;
        out[12..15].copy_from_slice(&v[..3]);
        dst.fill(out)
    }

    /// Translates `m` by `v`.
    pub fn translate<D: Dst<S>>(&self, m: &[Elem<S>], v: &[Elem<S>], dst: D) -> D::Output {
        let [x, y, z] = load::<_, 3>(v);
        let mut out = load::<_, 16>(m);
        for r in 0..4 {
            out[12 + r] = out[r] * x + out[4 + r] * y + out[8 + r] * z + out[12 + r];
        }
        dst.fill(out)
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
    pub fn rotation_z<D: Dst<S>>(&self, angle: Elem<S>, dst: D) -> D::Output {
        dst.fill(rotation_z(angle))
    }

    pub fn rotate_z<D: Dst<S>>(&self, m: &[Elem<S>], angle: Elem<S>, dst: D) -> D::Output {
        self.transform(m, rotation_z(angle), dst)
    }

    /// Builds a matrix rotating around `axis` by `angle` radians.
    ///
    /// `axis` does not have to be normalized.
    #[doc(alias = "rotation")]
    pub fn axis_rotation<D: Dst<S>>(&self, axis: &[Elem<S>], angle: Elem<S>, dst: D) -> D::Output {
        dst.fill(axis_rotation(load(axis), angle))
    }

    #[doc(alias = "rotate")]
    pub fn axis_rotate<D: Dst<S>>(
        &self,
        m: &[Elem<S>],
        axis: &[Elem<S>],
        angle: Elem<S>,
        dst: D,
    ) -> D::Output {
        self.transform(m, axis_rotation(load(axis), angle), dst)
    }

    /// Builds a matrix scaling by `v`.
    pub fn scaling<D: Dst<S>>(&self, v: &[Elem<S>], dst: D) -> D::Output {
        let [x, y, z] = load::<_, 3>(v);
        dst.fill(scale_columns(&self.identity, [x, y, z, S::Scalar::ONE]))
    }

    /// Scales the basis vectors of `m` by `v`.
    pub fn scale<D: Dst<S>>(&self, m: &[Elem<S>], v: &[Elem<S>], dst: D) -> D::Output {
        let [x, y, z] = load::<_, 3>(v);
        dst.fill(scale_columns(&load::<_, 16>(m), [x, y, z, S::Scalar::ONE]))
    }

    pub fn uniform_scaling<D: Dst<S>>(&self, s: Elem<S>, dst: D) -> D::Output {
        self.scaling(&[s; 3], dst)
    }

    pub fn uniform_scale<D: Dst<S>>(&self, m: &[Elem<S>], s: Elem<S>, dst: D) -> D::Output {
        self.scale(m, &[s; 3], dst)
    }

    /// Computes `m * t`.
    fn transform<D: Dst<S>>(&self, m: &[Elem<S>], t: [Elem<S>; 16], dst: D) -> D::Output {
        dst.fill(multiply::<_, 4, 16>(&load(m), &t))
    }
}

/// The 2x2 sub-determinants shared by the determinant and the inverse of a 4x4 matrix.
struct Cofactors<T> {
    a: [T; 16],
    b: [T; 12],
}

impl<T: Scalar> Cofactors<T> {
    fn new(m: &[T; 16]) -> Self {
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] = *m;
        Self {
            a: *m,
            b: [
                a00 * a11 - a01 * a10,
                a00 * a12 - a02 * a10,
                a00 * a13 - a03 * a10,
                a01 * a12 - a02 * a11,
                a01 * a13 - a03 * a11,
                a02 * a13 - a03 * a12,
                a20 * a31 - a21 * a30,
                a20 * a32 - a22 * a30,
                a20 * a33 - a23 * a30,
                a21 * a32 - a22 * a31,
                a21 * a33 - a23 * a31,
                a22 * a33 - a23 * a32,
            ],
        }
    }

    fn determinant(&self) -> T {
        let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = self.b;
        b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06
    }
}

/// Embeds a padded 3x3 matrix into the upper-left corner of a 4x4 identity matrix.
fn extend<T: Scalar>(m: [T; 12]) -> [T; 16] {
    let mut out = [T::ZERO; 16];
    out[..12].copy_from_slice(&m);
    out[15] = T::ONE;
    out
}

/// Builds a projection matrix: `sx`/`sy` scale X/Y, `shear` offsets them by Z, and `z`/`zw` map
/// view-space depth to clip-space depth. W is taken from `-z`.
fn projection<T: Scalar>(sx: T, sy: T, shear: [T; 2], z: T, zw: T) -> [T; 16] {
    let o = T::ZERO;
    #[rustfmt::skip]
    let m = [
        sx,       o,        o, o,
        o,        sy,       o, o,
        shear[0], shear[1], z, -T::ONE,
        o,        o,        zw, o,
    ];
    m
}

/// Depth terms of a reverse-Z projection; `far` may be infinite.
fn reverse_z<T: Scalar>(near: T, far: T) -> (T, T) {
    if far.is_finite() {
        let range_inv = T::ONE / (far - near);
        (near * range_inv, far * near * range_inv)
    } else {
        (T::ZERO, near)
    }
}

fn sub<T: Scalar>(a: [T; 3], b: [T; 3]) -> [T; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Builds an orthonormal basis whose Z axis points along `forward`.
fn basis<T: Scalar>(forward: [T; 3], up: [T; 3]) -> [[T; 3]; 3] {
    let z = normalize(forward);
    let x = normalize(cross(up, z));
    let y = normalize(cross(z, x));
    [x, y, z]
}

fn object_to_world<T: Scalar>(x: [T; 3], y: [T; 3], z: [T; 3], origin: [T; 3]) -> [T; 16] {
    let (o, l) = (T::ZERO, T::ONE);
    #[rustfmt::skip]
    let m = [
        x[0],      x[1],      x[2],      o,
        y[0],      y[1],      y[2],      o,
        z[0],      z[1],      z[2],      o,
        origin[0], origin[1], origin[2], l,
    ];
    m
}

fn rotation_x<T: Scalar>(angle: T) -> [T; 16] {
    let (s, c) = (angle.sin(), angle.cos());
    let (o, l) = (T::ZERO, T::ONE);
    #[rustfmt::skip]
    let m = [
        l, o,  o, o,
        o, c,  s, o,
        o, -s, c, o,
        o, o,  o, l,
    ];
    m
}

fn rotation_y<T: Scalar>(angle: T) -> [T; 16] {
    let (s, c) = (angle.sin(), angle.cos());
    let (o, l) = (T::ZERO, T::ONE);
    #[rustfmt::skip]
    let m = [
        c, o, -s, o,
        o, l, o,  o,
        s, o, c,  o,
        o, o, o,  l,
    ];
    m
}

fn rotation_z<T: Scalar>(angle: T) -> [T; 16] {
    let (s, c) = (angle.sin(), angle.cos());
    let (o, l) = (T::ZERO, T::ONE);
    #[rustfmt::skip]
    let m = [
        c,  s, o, o,
        -s, c, o, o,
        o,  o, l, o,
        o,  o, o, l,
    ];
    m
}

fn axis_rotation<T: Scalar>(axis: [T; 3], angle: T) -> [T; 16] {
    let [x, y, z] = normalize(axis);
    let (xx, yy, zz) = (x * x, y * y, z * z);
    let (s, c) = (angle.sin(), angle.cos());
    let one_minus_cos = T::ONE - c;
    let (o, l) = (T::ZERO, T::ONE);

    #[rustfmt::skip]
    let m = [
        xx + (l - xx) * c,
        x * y * one_minus_cos + z * s,
        x * z * one_minus_cos - y * s,
        o,

        x * y * one_minus_cos - z * s,
        yy + (l - yy) * c,
        y * z * one_minus_cos + x * s,
        o,

        x * z * one_minus_cos + y * s,
        y * z * one_minus_cos - x * s,
        zz + (l - zz) * c,
        o,

        o, o, o, l,
    ];
    m
}
