use std::{fmt, str::FromStr};

use crate::{
    dst::{load, update},
    storage::Elem,
    utils::epsilon,
    vector::{cross, dot, normalize},
    Dst, Error, MinMax, One, Scalar, Sqrt, Storage, StorageKind, Trig, Vec4Api, Zero,
};

/// The order in which [`QuatApi::from_euler`] applies its rotations.
///
/// Order `Xyz` produces the product `qx * qy * qz` of the per-axis rotations, so when rotating a
/// vector, the Z rotation is applied first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationOrder {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl RotationOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xyz => "xyz",
            Self::Xzy => "xzy",
            Self::Yxz => "yxz",
            Self::Yzx => "yzx",
            Self::Zxy => "zxy",
            Self::Zyx => "zyx",
        }
    }

    /// Returns the axis indices (0 = X, 1 = Y, 2 = Z) in product order.
    fn axes(self) -> [usize; 3] {
        match self {
            Self::Xyz => [0, 1, 2],
            Self::Xzy => [0, 2, 1],
            Self::Yxz => [1, 0, 2],
            Self::Yzx => [1, 2, 0],
            Self::Zxy => [2, 0, 1],
            Self::Zyx => [2, 1, 0],
        }
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationOrder {
    type Err = Error;

    /// Parses a rotation order like `"xyz"` (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "xyz" => Self::Xyz,
            "xzy" => Self::Xzy,
            "yxz" => Self::Yxz,
            "yzx" => Self::Yzx,
            "zxy" => Self::Zxy,
            "zyx" => Self::Zyx,
            _ => return Err(Error::UnknownRotationOrder(s.to_string())),
        })
    }
}

/// The operation set for quaternions stored according to policy `S`.
///
/// Quaternions are stored as `[x, y, z, w]`, where `w` is the real part. Unit-length quaternions
/// represent rotations in 3D space; operations that expect one do not check the length.
///
/// The component-wise operations (`add`, `lerp`, `dot`, `normalize`, ...) behave exactly like
/// their [`Vec4Api`] counterparts.
pub struct QuatApi<S: Storage> {
    vec4: Vec4Api<S>,
}

impl<S: Storage> QuatApi<S> {
    pub(crate) fn new() -> Self {
        Self {
            vec4: Vec4Api::new(),
        }
    }

    /// Returns the kind of storage this operation set allocates.
    pub fn storage(&self) -> StorageKind {
        self.vec4.storage()
    }

    /// Allocates a quaternion holding `values`, leaving missing components at zero.
    pub fn create(&self, values: &[Elem<S>]) -> S::Container {
        self.vec4.create(values)
    }

    /// Allocates the quaternion `[x, y, z, w]`.
    pub fn from_values(&self, x: Elem<S>, y: Elem<S>, z: Elem<S>, w: Elem<S>) -> S::Container {
        self.vec4.from_values(x, y, z, w)
    }

    /// Writes `[x, y, z, w]`.
    pub fn set<D: Dst<S>>(
        &self,
        x: Elem<S>,
        y: Elem<S>,
        z: Elem<S>,
        w: Elem<S>,
        dst: D,
    ) -> D::Output {
        self.vec4.set(x, y, z, w, dst)
    }

    /// Writes the identity rotation `[0, 0, 0, 1]`.
    pub fn identity<D: Dst<S>>(&self, dst: D) -> D::Output {
        let zero = S::Scalar::ZERO;
        dst.fill([zero, zero, zero, S::Scalar::ONE])
    }

    #[doc(alias = "clone")]
    pub fn copy<D: Dst<S>>(&self, q: &[Elem<S>], dst: D) -> D::Output {
        self.vec4.copy(q, dst)
    }

    /// Builds the rotation of `angle` radians around the unit vector `axis`.
    pub fn from_axis_angle<D: Dst<S>>(&self, axis: &[Elem<S>], angle: Elem<S>, dst: D) -> D::Output {
        dst.fill(from_axis_angle(load(axis), angle))
    }

    /// Decomposes the unit quaternion `q` into a rotation angle and axis.
    ///
    /// Returns the angle in radians, and writes the axis to `dst`. If the rotation is too small to
    /// determine an axis (the sine of half the angle is at most [`epsilon`][crate::epsilon]), the
    /// axis is `[1, 0, 0]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// let q = quatd().from_axis_angle(&[0.0, 1.0, 0.0], 0.5, New);
    /// let (angle, axis) = quatd().to_axis_angle(&q, New);
    /// assert_approx_eq!(angle, 0.5);
    /// assert_approx_eq!(axis[..], [0.0, 1.0, 0.0][..]);
    /// ```
    pub fn to_axis_angle<D: Dst<S>>(&self, q: &[Elem<S>], dst: D) -> (Elem<S>, D::Output) {
        let [x, y, z, w] = load::<_, 4>(q);
        let angle = w.acos() * S::Scalar::TWO;
        let s = (angle * S::Scalar::HALF).sin();
        let axis = if s > S::Scalar::from_f64(epsilon()) {
            [x / s, y / s, z / s]
        } else {
            [S::Scalar::ONE, S::Scalar::ZERO, S::Scalar::ZERO]
        };
        (angle, dst.fill(axis))
    }

    /// Computes the angle of the rotation between the unit quaternions `a` and `b`.
    pub fn angle(&self, a: &[Elem<S>], b: &[Elem<S>]) -> Elem<S> {
        let d = self.dot(a, b);
        let cosine = S::Scalar::TWO * d * d - S::Scalar::ONE;
        cosine.clamp(-S::Scalar::ONE, S::Scalar::ONE).acos()
    }

    /// Computes the Hamilton product `a * b`, the rotation that applies `b` first and then `a`.
    #[doc(alias = "mul")]
    pub fn multiply<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        dst.fill(multiply(load(a), load(b)))
    }

    /// Rotates `q` around the X axis by `angle` radians.
    pub fn rotate_x<D: Dst<S>>(&self, q: &[Elem<S>], angle: Elem<S>, dst: D) -> D::Output {
        dst.fill(multiply(load(q), axis_rotation(0, angle)))
    }

    /// Rotates `q` around the Y axis by `angle` radians.
    pub fn rotate_y<D: Dst<S>>(&self, q: &[Elem<S>], angle: Elem<S>, dst: D) -> D::Output {
        dst.fill(multiply(load(q), axis_rotation(1, angle)))
    }

    /// Rotates `q` around the Z axis by `angle` radians.
    pub fn rotate_z<D: Dst<S>>(&self, q: &[Elem<S>], angle: Elem<S>, dst: D) -> D::Output {
        dst.fill(multiply(load(q), axis_rotation(2, angle)))
    }

    /// Spherically interpolates between the unit quaternions `a` and `b`.
    ///
    /// Interpolation always takes the shorter path. When `a` and `b` are almost parallel (their
    /// dot product is within [`epsilon`][crate::epsilon] of 1), this falls back to linear
    /// interpolation.
    pub fn slerp<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], t: Elem<S>, dst: D) -> D::Output {
        dst.fill(slerp(load(a), load(b), t))
    }

    /// Spherical quadrangle interpolation between `a` and `d`, with control points `b` and `c`.
    pub fn sqlerp<D: Dst<S>>(
        &self,
        a: &[Elem<S>],
        b: &[Elem<S>],
        c: &[Elem<S>],
        d: &[Elem<S>],
        t: Elem<S>,
        dst: D,
    ) -> D::Output {
        let ad = slerp(load(a), load(d), t);
        let bc = slerp(load(b), load(c), t);
        let two = S::Scalar::TWO;
        dst.fill(slerp(ad, bc, two * t * (S::Scalar::ONE - t)))
    }

    /// Computes the inverse of `q`. A zero quaternion is its own inverse.
    #[doc(alias = "invert")]
    pub fn inverse<D: Dst<S>>(&self, q: &[Elem<S>], dst: D) -> D::Output {
        let q = load::<_, 4>(q);
        let len_sq = dot(&q, &q);
        let inv = if len_sq == S::Scalar::ZERO {
            S::Scalar::ZERO
        } else {
            S::Scalar::ONE / len_sq
        };
        let [x, y, z, w] = q;
        dst.fill([-x * inv, -y * inv, -z * inv, w * inv])
    }

    /// Computes the conjugate of `q`, which is its inverse if `q` has unit length.
    pub fn conjugate<D: Dst<S>>(&self, q: &[Elem<S>], dst: D) -> D::Output {
        let [x, y, z, w] = load::<_, 4>(q);
        dst.fill([-x, -y, -z, w])
    }

    /// Extracts the rotation of the 3x3 or 4x4 matrix `m`.
    ///
    /// `m` has to be a pure rotation matrix. Both matrix layouts use a column stride of 4, so
    /// either can be passed.
    pub fn from_mat<D: Dst<S>>(&self, m: &[Elem<S>], dst: D) -> D::Output {
        let m = load::<_, 11>(m);
        let at = |c: usize, r: usize| m[c * 4 + r];
        let half = S::Scalar::HALF;

        let trace = m[0] + m[5] + m[10];
        let mut out = [S::Scalar::ZERO; 4];
        if trace > S::Scalar::ZERO {
            let root = (trace + S::Scalar::ONE).sqrt();
            out[3] = half * root;
            let root = half / root;
            out[0] = (m[6] - m[9]) * root;
            out[1] = (m[8] - m[2]) * root;
            out[2] = (m[1] - m[4]) * root;
        } else {
            let mut i = 0;
            if m[5] > m[0] {
                i = 1;
            }
            if m[10] > at(i, i) {
                i = 2;
            }
            let j = (i + 1) % 3;
            let k = (i + 2) % 3;

            let root = (at(i, i) - at(j, j) - at(k, k) + S::Scalar::ONE).sqrt();
            out[i] = half * root;
            let root = half / root;
            out[3] = (at(j, k) - at(k, j)) * root;
            out[j] = (at(j, i) + at(i, j)) * root;
            out[k] = (at(k, i) + at(i, k)) * root;
        }
        dst.fill(out)
    }

    /// Builds the rotation combining rotations of `x`, `y` and `z` radians around the respective
    /// axes, multiplied in `order`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpumath::*;
    /// let q = quatd();
    /// let order: RotationOrder = "zyx".parse()?;
    /// let a = q.from_euler(0.1, 0.2, 0.3, order, New);
    /// let b = q.rotate_x(&q.rotate_y(&q.rotate_z(&q.identity(New), 0.3, New), 0.2, New), 0.1, New);
    /// assert!(q.equals_approximately(&a, &b));
    /// # Ok::<(), gpumath::Error>(())
    /// ```
    pub fn from_euler<D: Dst<S>>(
        &self,
        x: Elem<S>,
        y: Elem<S>,
        z: Elem<S>,
        order: RotationOrder,
        dst: D,
    ) -> D::Output {
        let angles = [x, y, z];
        let [a, b, c] = order.axes().map(|axis| axis_rotation(axis, angles[axis]));
        dst.fill(multiply(multiply(a, b), c))
    }

    pub fn add<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        self.vec4.add(a, b, dst)
    }

    #[doc(alias = "sub")]
    pub fn subtract<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        self.vec4.subtract(a, b, dst)
    }

    #[doc(alias = "scale")]
    pub fn mul_scalar<D: Dst<S>>(&self, q: &[Elem<S>], k: Elem<S>, dst: D) -> D::Output {
        self.vec4.mul_scalar(q, k, dst)
    }

    pub fn div_scalar<D: Dst<S>>(&self, q: &[Elem<S>], k: Elem<S>, dst: D) -> D::Output {
        self.vec4.div_scalar(q, k, dst)
    }

    /// Negates every component. The result represents the same rotation as `q`.
    pub fn negate<D: Dst<S>>(&self, q: &[Elem<S>], dst: D) -> D::Output {
        self.vec4.negate(q, dst)
    }

    pub fn dot(&self, a: &[Elem<S>], b: &[Elem<S>]) -> Elem<S> {
        self.vec4.dot(a, b)
    }

    /// Linearly interpolates between `a` and `b`. The result is not normalized.
    pub fn lerp<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], t: Elem<S>, dst: D) -> D::Output {
        self.vec4.lerp(a, b, t, dst)
    }

    #[doc(alias = "len")]
    pub fn length(&self, q: &[Elem<S>]) -> Elem<S> {
        self.vec4.length(q)
    }

    #[doc(alias = "len_sq")]
    pub fn length_sq(&self, q: &[Elem<S>]) -> Elem<S> {
        self.vec4.length_sq(q)
    }

    /// Scales `q` to unit length. See [`VectorApi::normalize`][crate::VectorApi::normalize].
    pub fn normalize<D: Dst<S>>(&self, q: &[Elem<S>], dst: D) -> D::Output {
        self.vec4.normalize(q, dst)
    }

    pub fn equals(&self, a: &[Elem<S>], b: &[Elem<S>]) -> bool {
        self.vec4.equals(a, b)
    }

    pub fn equals_approximately(&self, a: &[Elem<S>], b: &[Elem<S>]) -> bool {
        self.vec4.equals_approximately(a, b)
    }

    /// Computes the shortest rotation turning the unit vector `a` into the unit vector `b`.
    ///
    /// If `a` and `b` point in opposite directions, the rotation is a half turn around an
    /// arbitrary axis perpendicular to `a`.
    pub fn rotation_to<D: Dst<S>>(&self, a: &[Elem<S>], b: &[Elem<S>], dst: D) -> D::Output {
        let a = load::<_, 3>(a);
        let b = load::<_, 3>(b);
        let d = dot(&a, &b);
        let (zero, one) = (S::Scalar::ZERO, S::Scalar::ONE);

        if d < S::Scalar::from_f64(-0.999999) {
            let mut axis = cross([one, zero, zero], a);
            if dot(&axis, &axis).sqrt() < S::Scalar::from_f64(0.000001) {
                axis = cross([zero, one, zero], a);
            }
            dst.fill(from_axis_angle(normalize(axis), S::Scalar::PI))
        } else if d > S::Scalar::from_f64(0.999999) {
            self.identity(dst)
        } else {
            let [x, y, z] = cross(a, b);
            dst.fill(normalize([x, y, z, one + d]))
        }
    }

    /// Runs `op` with `q` as both its operand and its destination.
    ///
    /// `op` receives a copy of `q` to read from, and `q` itself to write to.
    pub fn in_place<'d>(
        &self,
        q: &'d mut [Elem<S>],
        op: impl FnOnce(&Self, &[Elem<S>], &mut [Elem<S>]),
    ) -> &'d mut [Elem<S>] {
        update::<_, 4>(q, |src, dst| op(self, src, dst))
    }
}

impl<S: Storage> fmt::Debug for QuatApi<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuatApi")
            .field("storage", &self.storage())
            .finish()
    }
}

fn from_axis_angle<T: Scalar>([x, y, z]: [T; 3], angle: T) -> [T; 4] {
    let half = angle * T::HALF;
    let s = half.sin();
    [s * x, s * y, s * z, half.cos()]
}

/// Rotation of `angle` radians around the coordinate axis with index `axis`.
fn axis_rotation<T: Scalar>(axis: usize, angle: T) -> [T; 4] {
    let half = angle * T::HALF;
    let mut q = [T::ZERO, T::ZERO, T::ZERO, half.cos()];
    q[axis] = half.sin();
    q
}

fn multiply<T: Scalar>([ax, ay, az, aw]: [T; 4], [bx, by, bz, bw]: [T; 4]) -> [T; 4] {
    [
        ax * bw + aw * bx + ay * bz - az * by,
        ay * bw + aw * by + az * bx - ax * bz,
        az * bw + aw * bz + ax * by - ay * bx,
        aw * bw - ax * bx - ay * by - az * bz,
    ]
}

fn slerp<T: Scalar>(a: [T; 4], mut b: [T; 4], t: T) -> [T; 4] {
    let mut cos_omega = dot(&a, &b);
    if cos_omega < T::ZERO {
        cos_omega = -cos_omega;
        b = b.map(|x| -x);
    }

    let (scale0, scale1) = if T::ONE - cos_omega > T::from_f64(epsilon()) {
        let omega = cos_omega.acos();
        let sin_omega = omega.sin();
        (
            ((T::ONE - t) * omega).sin() / sin_omega,
            (t * omega).sin() / sin_omega,
        )
    } else {
        (T::ONE - t, t)
    };

    [0, 1, 2, 3].map(|i| scale0 * a[i] + scale1 * b[i])
}
