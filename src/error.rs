// Copyright 2026 the Diskspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// An error building a spline from its control disks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SplineError {
    /// There are too few control disks to support the requested degree.
    ///
    /// A spline of degree `k` needs at least `k + 1` disks.
    InsufficientDisks {
        /// Number of disks supplied.
        disks: usize,
        /// Requested degree.
        degree: usize,
    },
}

impl fmt::Display for SplineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplineError::InsufficientDisks { disks, degree } => write!(
                f,
                "{disks} control disks cannot support degree {degree} (need at least {})",
                degree + 1
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SplineError {}
