use crate::{dst::load, storage::Elem, Dst, Storage};

use super::VectorApi;

impl<S: Storage> VectorApi<S, 4> {
    /// Allocates the vector `[x, y, z, w]`.
    pub fn from_values(&self, x: Elem<S>, y: Elem<S>, z: Elem<S>, w: Elem<S>) -> S::Container {
        S::from_array([x, y, z, w])
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
        dst.fill([x, y, z, w])
    }

    /// Transforms `v` by the 4x4 matrix `m`. No perspective division is performed.
    pub fn transform_mat4<D: Dst<S>>(&self, v: &[Elem<S>], m: &[Elem<S>], dst: D) -> D::Output {
        let [x, y, z, w] = load::<_, 4>(v);
        let m: [_; 16] = load(m);
        dst.fill([
            m[0] * x + m[4] * y + m[8] * z + m[12] * w,
            m[1] * x + m[5] * y + m[9] * z + m[13] * w,
            m[2] * x + m[6] * y + m[10] * z + m[14] * w,
            m[3] * x + m[7] * y + m[11] * z + m[15] * w,
        ])
    }
}
