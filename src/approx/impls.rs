use super::ApproxEq;

macro_rules! float_approx_eq {
    ($($ty:ty),+) => {
        $(
            impl ApproxEq for $ty {
                type Tolerance = Self;

                #[inline]
                fn abs_diff_eq(&self, other: &Self, tolerance: Self::Tolerance) -> bool {
                    // `NaN < tolerance` is false, so this also rejects NaN and `inf - inf`.
                    (self - other).abs() < tolerance
                }
            }
        )+
    };
}
float_approx_eq!(f32, f64);

impl<'a, T: ApproxEq<U> + ?Sized, U: ?Sized> ApproxEq<U> for &'a T {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &U, tolerance: Self::Tolerance) -> bool {
        T::abs_diff_eq(self, other, tolerance)
    }
}

/// Slices compare equal if they have the same length and every element pair does.
impl<T: ApproxEq<U>, U> ApproxEq<[U]> for [T] {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &[U], tolerance: Self::Tolerance) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(a, b)| T::abs_diff_eq(a, b, tolerance))
    }
}

impl<T: ApproxEq<U>, U, const N: usize> ApproxEq<[U; N]> for [T; N] {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &[U; N], tolerance: Self::Tolerance) -> bool {
        self.as_slice().abs_diff_eq(other.as_slice(), tolerance)
    }
}

impl<T: ApproxEq<U>, U> ApproxEq<Vec<U>> for Vec<T> {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Vec<U>, tolerance: Self::Tolerance) -> bool {
        self.as_slice().abs_diff_eq(other.as_slice(), tolerance)
    }
}

impl<T: ApproxEq<U>, U> ApproxEq<Box<[U]>> for Box<[T]> {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Box<[U]>, tolerance: Self::Tolerance) -> bool {
        (**self).abs_diff_eq(&**other, tolerance)
    }
}
