//! Operation sets and the cache handing them out.

use std::fmt;

use crate::{
    default_storage, ArrayStorage, Mat3Api, Mat4Api, MatrixApi, QuatApi, Storage, StorageKind,
    Vec2Api, Vec3Api, Vec4Api, VectorApi, F32, F64,
};

/// The operation sets of all six type families, sharing one storage policy `S`.
///
/// Use [`apis`] (or the short names like [`vec3`] and [`mat4d`]) to get the cached instance.
/// [`Apis::new`] builds an independent one, for code that prefers passing an explicit context
/// around; both behave identically.
pub struct Apis<S: Storage> {
    pub vec2: Vec2Api<S>,
    pub vec3: Vec3Api<S>,
    pub vec4: Vec4Api<S>,
    pub mat3: Mat3Api<S>,
    pub mat4: Mat4Api<S>,
    pub quat: QuatApi<S>,
}

impl<S: Storage> Apis<S> {
    pub fn new() -> Self {
        log::debug!("building operation set for {} storage", S::KIND);
        Self {
            vec2: VectorApi::new(),
            vec3: VectorApi::new(),
            vec4: VectorApi::new(),
            mat3: MatrixApi::new(),
            mat4: MatrixApi::new(),
            quat: QuatApi::new(),
        }
    }

    pub fn storage(&self) -> StorageKind {
        S::KIND
    }
}

impl<S: Storage> Default for Apis<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Storage> fmt::Debug for Apis<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Apis")
            .field("storage", &S::KIND)
            .finish_non_exhaustive()
    }
}

/// Returns the cached operation sets for storage policy `S`.
///
/// The first call for a given policy builds the operation sets; every later call (from any
/// thread) returns a reference to the same instance.
///
/// # Examples
///
/// ```
/// # use gpumath::*;
/// let a = apis::<F64>();
/// let b = apis::<F64>();
/// assert!(std::ptr::eq(a, b));
/// assert!(std::ptr::eq(&a.mat4, mat4d()));
/// ```
pub fn apis<S: Storage>() -> &'static Apis<S> {
    S::apis()
}

macro_rules! facade {
    ($storage:ident, $desc:literal: $($name:ident -> $api:ident . $field:ident),+ $(,)?) => {
        $(
            #[doc = concat!(
                "Returns the cached `", stringify!($field), "` operation set using ", $desc, "."
            )]
            #[inline]
            pub fn $name() -> &'static $api<$storage> {
                &apis::<$storage>().$field
            }
        )+
    };
}

facade!(F32, "[`F32`] storage":
    vec2 -> Vec2Api.vec2,
    vec3 -> Vec3Api.vec3,
    vec4 -> Vec4Api.vec4,
    mat3 -> Mat3Api.mat3,
    mat4 -> Mat4Api.mat4,
    quat -> QuatApi.quat,
);

facade!(F64, "[`F64`] storage":
    vec2d -> Vec2Api.vec2,
    vec3d -> Vec3Api.vec3,
    vec4d -> Vec4Api.vec4,
    mat3d -> Mat3Api.mat3,
    mat4d -> Mat4Api.mat4,
    quatd -> QuatApi.quat,
);

facade!(ArrayStorage, "[`ArrayStorage`]":
    vec2n -> Vec2Api.vec2,
    vec3n -> Vec3Api.vec3,
    vec4n -> Vec4Api.vec4,
    mat3n -> Mat3Api.mat3,
    mat4n -> Mat4Api.mat4,
    quatn -> QuatApi.quat,
);

/// Code that is generic over the storage policy, run by [`with_default_apis`].
pub trait ApisVisitor {
    type Output;

    fn visit<S: Storage>(self, apis: &'static Apis<S>) -> Self::Output;
}

/// Runs `visitor` with the cached operation sets of the calling thread's
/// [default storage][crate::default_storage].
///
/// Changing the default storage switches all six type families at once.
///
/// # Examples
///
/// ```
/// # use gpumath::*;
/// struct Identity;
///
/// impl ApisVisitor for Identity {
///     type Output = (StorageKind, Vec<f64>);
///
///     fn visit<S: Storage>(self, apis: &'static Apis<S>) -> Self::Output {
///         let m = apis.mat3.identity(New);
///         (apis.storage(), m.as_ref().iter().map(|x| x.to_f64()).collect())
///     }
/// }
///
/// let _guard = scoped_default_storage(StorageKind::F64);
/// let (kind, m) = with_default_apis(Identity);
/// assert_eq!(kind, StorageKind::F64);
/// assert_eq!(m.len(), 12);
/// ```
pub fn with_default_apis<V: ApisVisitor>(visitor: V) -> V::Output {
    match default_storage() {
        StorageKind::F32 => visitor.visit(apis::<F32>()),
        StorageKind::F64 => visitor.visit(apis::<F64>()),
        StorageKind::Array => visitor.visit(apis::<ArrayStorage>()),
    }
}

#[cfg(test)]
mod tests {
    use std::{ptr, thread};

    use super::*;
    use crate::{scoped_default_storage, test, New, Scalar};

    #[test]
    fn cached() {
        test::init_logger();

        assert!(ptr::eq(apis::<F32>(), apis::<F32>()));
        assert!(ptr::eq(vec3(), &apis::<F32>().vec3));
        assert!(ptr::eq(quatd(), &apis::<F64>().quat));
        assert!(ptr::eq(mat4n(), &apis::<ArrayStorage>().mat4));

        let here = apis::<F64>() as *const Apis<F64> as usize;
        let there = thread::spawn(|| apis::<F64>() as *const Apis<F64> as usize)
            .join()
            .unwrap();
        assert_eq!(here, there);
    }

    #[test]
    fn uncached_instances_behave_the_same() {
        let fresh = Apis::<F32>::new();
        assert!(!ptr::eq(&fresh, apis::<F32>()));
        let (a, b) = ([1.0, 2.0, 3.0], [3.0, 2.0, 1.0]);
        assert_eq!(fresh.vec3.cross(&a, &b, New), vec3().cross(&a, &b, New));
        assert_eq!(fresh.mat4.identity(New), mat4().identity(New));
    }

    #[test]
    fn storage_kinds() {
        assert_eq!(vec2().storage(), StorageKind::F32);
        assert_eq!(mat3d().storage(), StorageKind::F64);
        assert_eq!(quatn().storage(), StorageKind::Array);
        assert_eq!(apis::<ArrayStorage>().storage(), StorageKind::Array);
        assert_eq!(format!("{:?}", apis::<F64>()), "Apis { storage: F64, .. }");
    }

    struct SumIdentity;

    impl ApisVisitor for SumIdentity {
        type Output = (StorageKind, f64);

        fn visit<S: Storage>(self, apis: &'static Apis<S>) -> Self::Output {
            let m = apis.mat4.identity(New);
            let sum = m.as_ref().iter().map(|x| x.to_f64()).sum();
            (apis.storage(), sum)
        }
    }

    #[test]
    fn default_dispatch() {
        for kind in [StorageKind::F32, StorageKind::F64, StorageKind::Array] {
            let _guard = scoped_default_storage(kind);
            assert_eq!(with_default_apis(SumIdentity), (kind, 4.0));
        }
    }
}
