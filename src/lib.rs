//! Vector, matrix and quaternion math over flat buffers, for feeding GPU pipelines.
//!
//! # Motivation
//!
//! Data uploaded to the GPU is ultimately a flat buffer of floats, laid out the way the shading
//! language expects it. This library operates *directly* on such buffers: a 3D vector is any
//! slice holding 3 elements, a 4x4 matrix is any slice holding 16, and the result of every
//! operation can be written straight into an existing buffer without allocating.
//!
//! # Overview
//!
//! Operations are grouped into *operation sets*, one per type family: [`Vec2Api`], [`Vec3Api`],
//! [`Vec4Api`], [`Mat3Api`], [`Mat4Api`] and [`QuatApi`]. Each operation set is parameterized
//! by a [`Storage`] policy that decides which container newly allocated values use:
//!
//! - [`F32`] allocates `Box<[f32]>` (the short names [`vec3`], [`mat4`], ...).
//! - [`F64`] allocates `Box<[f64]>` (the short names [`vec3d`], [`mat4d`], ...).
//! - [`ArrayStorage`] allocates `Vec<f64>` (the short names [`vec3n`], [`mat4n`], ...).
//!
//! Operation sets are built once per storage policy and cached for the rest of the program (see
//! [`apis`]).
//!
//! ```
//! use gpumath::*;
//!
//! let (m4, v3) = (mat4(), vec3());
//!
//! let mut model = m4.translation(&[0.0, 1.0, 0.0], New);
//! m4.in_place(&mut model, |m4, src, dst| {
//!     m4.rotate_y(src, std::f32::consts::FRAC_PI_2, dst);
//! });
//!
//! let p = v3.transform_mat4(&[1.0, 0.0, 0.0], &model, New);
//! assert!(v3.equals_approximately(&p, &[0.0, 1.0, -1.0]));
//! ```
//!
//! # Conventions
//!
//! - Every operation that produces a vector, matrix or quaternion takes a trailing *destination*
//!   argument: either [`New`] to allocate, or a `&mut [T]` to overwrite. See the [`dst`] module.
//! - Matrices are column-major. 3x3 matrices are padded to 4 elements per column (12 slots).
//! - Angles are in radians.
//! - Numeric operations never fail. Degenerate input yields a documented fallback (like
//!   normalizing a zero vector, which produces zero) or non-finite values (like inverting a
//!   singular matrix).
//!
//! # Configuration
//!
//! - `GPUMATH_EPSILON`: initial tolerance of approximate comparisons (see [`epsilon`]).
//! - `GPUMATH_DEFAULT_STORAGE`: initial [`default_storage`] (`f32`, `f64` or `array`).
//!
//! Both can be changed at runtime, per thread.

pub mod approx;
mod apis;
pub mod dst;
mod error;
mod matrix;
mod quat;
mod storage;
mod traits;
mod utils;
mod vector;

#[cfg(test)]
mod test;

pub use apis::*;
pub use dst::{Dst, New};
pub use error::{Error, Result};
pub use matrix::{Mat3Api, Mat4Api, MatrixApi};
pub use quat::{QuatApi, RotationOrder};
pub use storage::{
    as_bytes, default_storage, scoped_default_storage, set_default_storage, ArrayStorage, Elem,
    Storage, StorageGuard, StorageKind, F32, F64,
};
pub use traits::*;
pub use utils::{
    deg_to_rad, epsilon, euclidean_modulo, inverse_lerp, lerp, rad_to_deg, scoped_epsilon,
    set_epsilon, EpsilonGuard, DEFAULT_EPSILON, NORMALIZE_THRESHOLD,
};
pub use vector::{Vec2Api, Vec3Api, Vec4Api, VectorApi};
