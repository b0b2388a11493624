//! Storage policies.
//!
//! A [`Storage`] policy decides which container backs the values an operation set allocates:
//!
//! | Policy           | [`StorageKind`]        | Container    | Elements |
//! |------------------|------------------------|--------------|----------|
//! | [`F32`]          | [`StorageKind::F32`]   | `Box<[f32]>` | [`f32`]  |
//! | [`F64`]          | [`StorageKind::F64`]   | `Box<[f64]>` | [`f64`]  |
//! | [`ArrayStorage`] | [`StorageKind::Array`] | `Vec<f64>`   | [`f64`]  |
//!
//! All containers are zero-initialized. Operations only ever *read* their operands as slices, so
//! any container (or plain array) of the right element type and length can be passed to any
//! operation set using that element type, regardless of which policy allocated it.

use std::{cell::Cell, env, fmt, str::FromStr, sync::OnceLock};

use once_cell::sync::Lazy;

use crate::{Apis, Error, Scalar};

/// The element type used by storage policy `S`.
pub type Elem<S> = <S as Storage>::Scalar;

/// Identifies one of the supported [`Storage`] policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// Fixed-size buffers of 32-bit floats ([`F32`]).
    F32,
    /// Fixed-size buffers of 64-bit floats ([`F64`]).
    F64,
    /// Growable, zero-initialized vectors of 64-bit floats ([`ArrayStorage`]).
    Array,
}

impl StorageKind {
    /// The kind used when `GPUMATH_DEFAULT_STORAGE` is not set.
    pub const DEFAULT: Self = Self::F32;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f32" | "float32" => Ok(Self::F32),
            "f64" | "float64" => Ok(Self::F64),
            "array" | "number" => Ok(Self::Array),
            _ => Err(Error::UnknownStorageKind(s.to_string())),
        }
    }
}

/// A storage policy: the container family backing every value an operation set allocates.
///
/// This trait is implemented by [`F32`], [`F64`] and [`ArrayStorage`]. It is not meant to be
/// implemented downstream, since each policy owns a slot in the operation set cache.
pub trait Storage: Sized + Send + Sync + 'static {
    /// The element type of the containers.
    type Scalar: Scalar;

    /// The container type allocated by this policy.
    type Container: AsRef<[Self::Scalar]>
        + AsMut<[Self::Scalar]>
        + Clone
        + fmt::Debug
        + PartialEq
        + Send
        + Sync;

    /// The [`StorageKind`] identifying this policy.
    const KIND: StorageKind;

    /// Allocates a zero-filled container of `len` elements.
    fn alloc(len: usize) -> Self::Container;

    /// Allocates a container holding `values`.
    fn from_array<const N: usize>(values: [Self::Scalar; N]) -> Self::Container {
        let mut out = Self::alloc(N);
        out.as_mut().copy_from_slice(&values);
        out
    }

    /// Returns the cached operation set for this policy, building it on first use.
    fn apis() -> &'static Apis<Self>;
}

/// Storage policy allocating boxed slices of [`f32`].
///
/// This is the policy matching the usual GPU buffer element type.
#[derive(Debug, Clone, Copy)]
pub enum F32 {}

/// Storage policy allocating boxed slices of [`f64`].
#[derive(Debug, Clone, Copy)]
pub enum F64 {}

/// Storage policy allocating [`Vec`]s of [`f64`].
///
/// The containers can be grown by the caller; operations only touch their leading elements.
#[derive(Debug, Clone, Copy)]
pub enum ArrayStorage {}

macro_rules! storage {
    ($policy:ident, $scalar:ty, $container:ty, $kind:ident, |$len:ident| $alloc:expr) => {
        impl Storage for $policy {
            type Scalar = $scalar;
            type Container = $container;

            const KIND: StorageKind = StorageKind::$kind;

            fn alloc($len: usize) -> Self::Container {
                $alloc
            }

            fn apis() -> &'static Apis<Self> {
                static APIS: OnceLock<Apis<$policy>> = OnceLock::new();
                APIS.get_or_init(Apis::new)
            }
        }
    };
}

storage!(F32, f32, Box<[f32]>, F32, |len| vec![0.0; len].into_boxed_slice());
storage!(F64, f64, Box<[f64]>, F64, |len| vec![0.0; len].into_boxed_slice());
storage!(ArrayStorage, f64, Vec<f64>, Array, |len| vec![0.0; len]);

static INITIAL_STORAGE: Lazy<StorageKind> =
    Lazy::new(|| match env::var("GPUMATH_DEFAULT_STORAGE") {
        Ok(v) => v.parse().unwrap_or_else(|e| {
            log::warn!(
                "invalid value set for `GPUMATH_DEFAULT_STORAGE` variable: {e}; using {}",
                StorageKind::DEFAULT
            );
            StorageKind::DEFAULT
        }),
        Err(_) => StorageKind::DEFAULT,
    });

thread_local! {
    static DEFAULT_STORAGE: Cell<StorageKind> = Cell::new(*INITIAL_STORAGE);
}

/// Returns the default storage kind of the calling thread.
///
/// The default storage selects which operation set [`with_default_apis`][crate::with_default_apis]
/// dispatches to. Like the [`epsilon`][crate::epsilon], it is thread-local; new threads start out
/// with the value of the `GPUMATH_DEFAULT_STORAGE` environment variable (`f32`, `f64` or
/// `array`), or [`StorageKind::F32`] if it is unset.
pub fn default_storage() -> StorageKind {
    DEFAULT_STORAGE.with(Cell::get)
}

/// Sets the default storage kind of the calling thread, returning the previous one.
///
/// This switches all six type families at once.
pub fn set_default_storage(kind: StorageKind) -> StorageKind {
    let prev = DEFAULT_STORAGE.with(|cell| cell.replace(kind));
    log::trace!("default storage changed from {prev} to {kind}");
    prev
}

/// Sets the default storage kind of the calling thread until the returned guard is dropped.
#[must_use = "the previous default storage is restored as soon as the guard is dropped"]
pub fn scoped_default_storage(kind: StorageKind) -> StorageGuard {
    StorageGuard {
        prev: set_default_storage(kind),
    }
}

/// Guard returned by [`scoped_default_storage`]; restores the previous default when dropped.
#[derive(Debug)]
pub struct StorageGuard {
    prev: StorageKind,
}

impl Drop for StorageGuard {
    fn drop(&mut self) {
        set_default_storage(self.prev);
    }
}

/// Reinterprets a container's elements as raw bytes, e.g. for uploading them to a GPU buffer.
///
/// # Examples
///
/// ```
/// # use gpumath::*;
/// let m = mat4().identity(New);
/// assert_eq!(as_bytes(&m).len(), 16 * 4);
/// ```
pub fn as_bytes<T: Scalar>(values: &[T]) -> &[u8] {
    bytemuck::cast_slice(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kind() {
        assert_eq!("f32".parse::<StorageKind>(), Ok(StorageKind::F32));
        assert_eq!("Float64".parse::<StorageKind>(), Ok(StorageKind::F64));
        assert_eq!(" array ".parse::<StorageKind>(), Ok(StorageKind::Array));
        assert_eq!(
            "f16".parse::<StorageKind>(),
            Err(Error::UnknownStorageKind("f16".into()))
        );
        for kind in [StorageKind::F32, StorageKind::F64, StorageKind::Array] {
            assert_eq!(kind.to_string().parse::<StorageKind>(), Ok(kind));
        }
    }

    #[test]
    fn alloc_zeroed() {
        assert_eq!(&*F32::alloc(3), &[0.0f32; 3]);
        assert_eq!(&*F64::alloc(16), &[0.0f64; 16]);
        assert_eq!(ArrayStorage::alloc(4), vec![0.0; 4]);
        assert_eq!(F32::from_array([1.0, 2.0]).as_ref(), &[1.0, 2.0]);
    }

    #[test]
    fn kinds() {
        assert_eq!(F32::KIND, StorageKind::F32);
        assert_eq!(F64::KIND, StorageKind::F64);
        assert_eq!(ArrayStorage::KIND, StorageKind::Array);
    }

    #[test]
    fn scoped_default() {
        let before = default_storage();
        {
            let _guard = scoped_default_storage(StorageKind::Array);
            assert_eq!(default_storage(), StorageKind::Array);
            assert_eq!(set_default_storage(StorageKind::F64), StorageKind::Array);
        }
        assert_eq!(default_storage(), before);
    }

    #[test]
    fn bytes() {
        let v = F64::from_array([1.0, 2.0]);
        assert_eq!(as_bytes(&v), bytemuck::cast_slice::<f64, u8>(&[1.0, 2.0]));
        assert_eq!(as_bytes(&ArrayStorage::alloc(3)).len(), 24);
    }
}
