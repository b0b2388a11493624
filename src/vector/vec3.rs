use crate::{dst::load, storage::Elem, Dst, One, Scalar, Sqrt, Storage, Trig, Zero};

use super::{cross, VectorApi};

impl<S: Storage> VectorApi<S, 3> {
    /// Allocates the vector `[x, y, z]`.
    pub fn from_values(&self, x: Elem<S>, y: Elem<S>, z: Elem<S>) -> S::Container {
        S::from_array([x, y, z])
    }

    /// Writes `[x, y, z]`.
    pub fn set<D: Dst<S>>(&self, x: Elem<S>, y: Elem<S>, z: Elem<S>, dst: D) -> D::Output {
        dst.fill([x, y, z])
    }

    /// Computes the cross product `a × b`.
    pub fn cross<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(cross(load(a), load(b)))
    }

    /// Writes a vector of length `scale` pointing in a uniformly random direction.
    ///
    /// Uses the thread-local generator of [`fastrand`].
    pub fn random<D: Dst<S>>(&self, scale: Elem<S>, dst: D) -> D::Output {
        self.random_from(fastrand::f64, scale, dst)
    }

    /// Like [`VectorApi::random`], but draws from `rng`.
    pub fn random_with<D: Dst<S>>(
        &self,
        rng: &mut fastrand::Rng,
        scale: Elem<S>,
        dst: D,
    ) -> D::Output {
        self.random_from(|| rng.f64(), scale, dst)
    }

    fn random_from<D: Dst<S>>(
        &self,
        mut next: impl FnMut() -> f64,
        scale: Elem<S>,
        dst: D,
    ) -> D::Output {
        let angle = S::Scalar::from_f64(next() * std::f64::consts::TAU);
        let z = S::Scalar::from_f64(next() * 2.0 - 1.0);
        let z_scale = (S::Scalar::ONE - z * z).sqrt() * scale;
        dst.fill([angle.cos() * z_scale, angle.sin() * z_scale, z * scale])
    }

    /// Transforms the point `v` (with w = 1) by the 4x4 matrix `m`, dividing by the resulting w.
    ///
    /// A resulting w of 0 (or NaN) is treated as 1, so affine matrices never divide by zero.
    pub fn transform_mat4<D: Dst<S>>(&self, v: &[Elem<S>], m: &[Elem<S>], dst: D) -> D::Output {
        let [x, y, z] = load::<_, 3>(v);
        let m: [_; 16] = load(m);
        let mut w = m[3] * x + m[7] * y + m[11] * z + m[15];
        if w == S::Scalar::ZERO || w.is_nan() {
            w = S::Scalar::ONE;
        }
        dst.fill([
            (m[0] * x + m[4] * y + m[8] * z + m[12]) / w,
            (m[1] * x + m[5] * y + m[9] * z + m[13]) / w,
            (m[2] * x + m[6] * y + m[10] * z + m[14]) / w,
        ])
    }

    /// Transforms the direction `v` by the upper-left 3x3 part of the 4x4 matrix `m`.
    ///
    /// Translation and projection are ignored.
    pub fn transform_mat4_upper3x3<D: Dst<S>>(
        &self,
        v: &[Elem<S>],
        m: &[Elem<S>],
        dst: D,
    ) -> D::Output {
        let [x, y, z] = load::<_, 3>(v);
        let m: [_; 16] = load(m);
        dst.fill(upper3x3(&m[..12], x, y, z))
    }

    /// Transforms `v` by the 3x3 matrix `m`.
    pub fn transform_mat3<D: Dst<S>>(&self, v: &[Elem<S>], m: &[Elem<S>], dst: D) -> D::Output {
        let [x, y, z] = load::<_, 3>(v);
        let m: [_; 12] = load(m);
        dst.fill(upper3x3(&m, x, y, z))
    }

    /// Rotates `v` by the quaternion `q`.
    pub fn transform_quat<D: Dst<S>>(&self, v: &[Elem<S>], q: &[Elem<S>], dst: D) -> D::Output {
        let [x, y, z] = load::<_, 3>(v);
        let [qx, qy, qz, qw] = load::<_, 4>(q);
        let two = S::Scalar::TWO;
        let w2 = qw * two;

        let uv_x = qy * z - qz * y;
        let uv_y = qz * x - qx * z;
        let uv_z = qx * y - qy * x;

        dst.fill([
            x + uv_x * w2 + (qy * uv_z - qz * uv_y) * two,
            y + uv_y * w2 + (qz * uv_x - qx * uv_z) * two,
            z + uv_z * w2 + (qx * uv_y - qy * uv_x) * two,
        ])
    }

    /// Extracts the translation of the 4x4 matrix `m`.
    pub fn get_translation<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        dst.fill([m[12], m[13], m[14]])
    }

    /// Extracts basis vector `axis` (0 = x, 1 = y, 2 = z) of the 4x4 matrix `m`.
    pub fn get_axis<D: Dst<S>>(&self, m: &[Elem<S>], axis: usize, dst: D) -> D::Output {
        let off = axis * 4;
        dst.fill([m[off], m[off + 1], m[off + 2]])
    }

    /// Computes the scale factor along each axis of the 4x4 matrix `m`.
    pub fn get_scaling<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        let m: [_; 16] = load(m);
        dst.fill([0, 4, 8].map(|off| {
            (m[off] * m[off] + m[off + 1] * m[off + 1] + m[off + 2] * m[off + 2]).sqrt()
        }))
    }

    /// Rotates the point `a` around the X axis through `origin` by `rad` radians.
    pub fn rotate_x<D: Dst<S>>(
        &self,
        a: &[Elem<S>],
        origin: &[Elem<S>],
        rad: Elem<S>,
        dst: D,
    ) -> D::Output {
        self.rotate_around(a, origin, dst, |[x, y, z]| {
            let (s, c) = (rad.sin(), rad.cos());
            [x, y * c - z * s, y * s + z * c]
        })
    }

    /// Rotates the point `a` around the Y axis through `origin` by `rad` radians.
    pub fn rotate_y<D: Dst<S>>(
        &self,
        a: &[Elem<S>],
        origin: &[Elem<S>],
        rad: Elem<S>,
        dst: D,
    ) -> D::Output {
        self.rotate_around(a, origin, dst, |[x, y, z]| {
            let (s, c) = (rad.sin(), rad.cos());
            [z * s + x * c, y, z * c - x * s]
        })
    }

    /// Rotates the point `a` around the Z axis through `origin` by `rad` radians.
    pub fn rotate_z<D: Dst<S>>(
        &self,
        a: &[Elem<S>],
        origin: &[Elem<S>],
        rad: Elem<S>,
        dst: D,
    ) -> D::Output {
        self.rotate_around(a, origin, dst, |[x, y, z]| {
            let (s, c) = (rad.sin(), rad.cos());
            [x * c - y * s, x * s + y * c, z]
        })
    }

    fn rotate_around<D: Dst<S>>(
        &self,
        a: &[Elem<S>],
        origin: &[Elem<S>],
        dst: D,
        rotate: impl FnOnce([Elem<S>; 3]) -> [Elem<S>; 3],
    ) -> D::Output {
        let a = load::<_, 3>(a);
        let o = load::<_, 3>(origin);
        let r = rotate([a[0] - o[0], a[1] - o[1], a[2] - o[2]]);
        dst.fill([r[0] + o[0], r[1] + o[1], r[2] + o[2]])
    }
}

/// Multiplies `[x, y, z]` by the 3x3 matrix stored in the first 12 (stride 4) slots of `m`.
fn upper3x3<T: Scalar>(m: &[T], x: T, y: T, z: T) -> [T; 3] {
    [
        x * m[0] + y * m[4] + z * m[8],
        x * m[1] + y * m[5] + z * m[9],
        x * m[2] + y * m[6] + z * m[10],
    ]
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use crate::{assert_approx_eq, mat4d, quatd, vec3d, New};

    #[test]
    fn cross() {
        let v3 = vec3d();
        assert_eq!(
            &*v3.cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], New),
            &[0.0, 0.0, 1.0]
        );
        assert_eq!(
            &*v3.cross(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], New),
            &[-3.0, 6.0, -3.0]
        );
    }

    #[test]
    fn transform_mat4_divides_by_w() {
        let v3 = vec3d();
        let m4 = mat4d();
        let t = m4.translation(&[1.0, 2.0, 3.0], New);
        assert_eq!(&*v3.transform_mat4(&[1.0, 1.0, 1.0], &t, New), &[2.0, 3.0, 4.0]);

        let mut m = m4.identity(New);
        m[15] = 2.0;
        assert_eq!(&*v3.transform_mat4(&[2.0, 4.0, 6.0], &m, New), &[1.0, 2.0, 3.0]);

        // w = 0 is treated as 1
        m[15] = 0.0;
        assert_eq!(&*v3.transform_mat4(&[2.0, 4.0, 6.0], &m, New), &[2.0, 4.0, 6.0]);
    }

    #[test]
    fn upper3x3_ignores_translation() {
        let v3 = vec3d();
        let m4 = mat4d();
        let m = m4.translate(&m4.scaling(&[2.0, 3.0, 4.0], New), &[9.0, 9.0, 9.0], New);
        assert_eq!(
            &*v3.transform_mat4_upper3x3(&[1.0, 1.0, 1.0], &m, New),
            &[2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn transform_quat_matches_matrix() {
        let v3 = vec3d();
        let q = quatd().from_axis_angle(&[0.0, 0.0, 1.0], FRAC_PI_2, New);
        assert_approx_eq!(
            v3.transform_quat(&[1.0, 0.0, 0.0], &q, New)[..],
            [0.0, 1.0, 0.0][..]
        );

        let m = mat4d().from_quat(&q, New);
        let v = [0.3, -2.0, 5.0];
        assert_approx_eq!(
            v3.transform_quat(&v, &q, New),
            v3.transform_mat4(&v, &m, New)
        );
    }

    #[test]
    fn matrix_parts() {
        let v3 = vec3d();
        let m4 = mat4d();
        let m = m4.scale(&m4.translation(&[1.0, 2.0, 3.0], New), &[2.0, 3.0, 4.0], New);
        assert_eq!(&*v3.get_translation(&m, New), &[1.0, 2.0, 3.0]);
        assert_eq!(&*v3.get_axis(&m, 1, New), &[0.0, 3.0, 0.0]);
        assert_eq!(&*v3.get_scaling(&m, New), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn rotate_around_origin() {
        let v3 = vec3d();
        let o = [1.0, 1.0, 1.0];
        assert_approx_eq!(
            v3.rotate_x(&[1.0, 2.0, 1.0], &o, FRAC_PI_2, New)[..],
            [1.0, 1.0, 2.0][..]
        );
        assert_approx_eq!(
            v3.rotate_y(&[1.0, 1.0, 2.0], &o, FRAC_PI_2, New)[..],
            [2.0, 1.0, 1.0][..]
        );
        assert_approx_eq!(
            v3.rotate_z(&[2.0, 1.0, 1.0], &o, FRAC_PI_2, New)[..],
            [1.0, 2.0, 1.0][..]
        );
    }

    #[test]
    fn random_has_requested_length() {
        let v3 = vec3d();
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..16 {
            let v = v3.random_with(&mut rng, 3.0, New);
            assert_approx_eq!(v3.length(&v), 3.0);
        }
    }
}
