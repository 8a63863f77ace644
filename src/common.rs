// Copyright 2026 the Diskspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations and shared tolerances.

#![allow(missing_docs)]

/// Tolerance used for the basis partition-of-unity checks, for deciding
/// that a tangent has vanished, and for the curvature denominator.
pub const DEGENERATE_EPSILON: f64 = 1e-4;

/// Step used for the forward difference of the second derivative.
pub const CURVATURE_STEP: f64 = 1e-4;

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("diskspline requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn floor(self) -> Self => floor;
    fn hypot(self, other: Self) -> Self => hypot;
    fn powf(self, n: Self) -> Self => pow;
}

/// Wrap `x` into the half-open interval `[start, start + period)`.
///
/// A non-positive period leaves `x` at `start`.
pub fn wrap_into(x: f64, start: f64, period: f64) -> f64 {
    if period.is_nan() || period <= 0.0 {
        return start;
    }
    let mut r = (x - start) % period;
    if r < 0.0 {
        r += period;
    }
    // Adding a tiny negative remainder to the period can round up to it.
    if r >= period {
        r = 0.0;
    }
    start + r
}
