use crate::{dst::load, storage::Elem, Dst, Scalar, Storage, Trig, Zero};

use super::VectorApi;

impl<S: Storage> VectorApi<S, 2> {
    /// Allocates the vector `[x, y]`.
    pub fn from_values(&self, x: Elem<S>, y: Elem<S>) -> S::Container {
        S::from_array([x, y])
    }

    /// Writes `[x, y]`.
    pub fn set<D: Dst<S>>(&self, x: Elem<S>, y: Elem<S>, dst: D) -> D::Output {
        dst.fill([x, y])
    }

    /// Computes the cross product of `a` and `b`, treating both as lying in the XY plane.
    ///
    /// The result is a **3-component** vector `[0, 0, z]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// let z = vec2().cross(&[1.0, 0.0], &[0.0, 1.0], New);
    /// assert_eq!(&*z, &[0.0, 0.0, 1.0]);
    /// ```
    pub fn cross<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        let [ax, ay] = load::<_, 2>(a);
        let [bx, by] = load::<_, 2>(b);
        let zero = S::Scalar::ZERO;
        dst.fill([zero, zero, ax * by - ay * bx])
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
        dst.fill([angle.cos() * scale, angle.sin() * scale])
    }

    /// Transforms the point `v` by the 3x3 matrix `m`.
    pub fn transform_mat3<D: Dst<S>>(&self, v: &[Elem<S>], m: &[Elem<S>], dst: D) -> D::Output {
        let [x, y] = load::<_, 2>(v);
        let m: [_; 12] = load(m);
        dst.fill([
            m[0] * x + m[4] * y + m[8],
            m[1] * x + m[5] * y + m[9],
        ])
    }

    /// Transforms the point `v` (with z = 0 and w = 1) by the 4x4 matrix `m`.
    pub fn transform_mat4<D: Dst<S>>(&self, v: &[Elem<S>], m: &[Elem<S>], dst: D) -> D::Output {
        let [x, y] = load::<_, 2>(v);
        let m: [_; 16] = load(m);
        dst.fill([
            m[0] * x + m[4] * y + m[12],
            m[1] * x + m[5] * y + m[13],
        ])
    }

    /// Rotates the point `a` around `origin` by `rad` radians (counterclockwise).
    pub fn rotate<D: Dst<S>>(
        &self,
        a: &[Elem<S>],
        origin: &[Elem<S>],
        rad: Elem<S>,
        dst: D,
    ) -> D::Output {
        let [ox, oy] = load::<_, 2>(origin);
        let [px, py] = load::<_, 2>(a);
        let (px, py) = (px - ox, py - oy);
        let (s, c) = (rad.sin(), rad.cos());
        dst.fill([px * c - py * s + ox, px * s + py * c + oy])
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use crate::{assert_approx_eq, vec2, vec2d, New};

    #[test]
    fn cross_is_3d() {
        let v2 = vec2d();
        assert_eq!(&*v2.cross(&[2.0, 3.0], &[4.0, 5.0], New), &[0.0, 0.0, -2.0]);

        let mut out = [7.0; 3];
        v2.cross(&[1.0, 0.0], &[0.0, 1.0], &mut out[..]);
        assert_eq!(out, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn transforms() {
        let v2 = vec2d();
        #[rustfmt::skip]
        let m3 = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 2.0, 0.0, 0.0,
            5.0, 6.0, 1.0, 0.0,
        ];
        assert_eq!(&*v2.transform_mat3(&[1.0, 1.0], &m3, New), &[6.0, 8.0]);

        #[rustfmt::skip]
        let m4 = [
            2.0, 0.0, 0.0, 0.0,
            0.0, 3.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            1.0, 2.0, 3.0, 1.0,
        ];
        assert_eq!(&*v2.transform_mat4(&[1.0, 1.0], &m4, New), &[3.0, 5.0]);
    }

    #[test]
    fn rotate_around_origin() {
        let v2 = vec2d();
        let r = v2.rotate(&[2.0, 1.0], &[1.0, 1.0], FRAC_PI_2, New);
        assert_approx_eq!(r[..], [1.0, 2.0][..]);
        let r = v2.rotate(&[1.0, 0.0], &[0.0, 0.0], -FRAC_PI_2, New);
        assert_approx_eq!(r[..], [0.0, -1.0][..]);
    }

    #[test]
    fn random_has_requested_length() {
        let v2 = vec2d();
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..16 {
            let v = v2.random_with(&mut rng, 2.0, New);
            assert_approx_eq!(v2.length(&v), 2.0);
        }
        assert_approx_eq!(v2.length(&v2.random(1.0, New)), 1.0);

        let v = vec2().random(1.0, New);
        assert_approx_eq!(vec2().length(&v), 1.0).abs(1e-5);
    }
}
