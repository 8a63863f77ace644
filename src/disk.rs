// Copyright 2026 the Diskspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control disks and the values evaluated from them.

use core::fmt;

use crate::{Point, Vec2};

/// A center point plus a radius; the unit of input shape control.
///
/// Disks are also the output of curve evaluation: an interpolated disk is a
/// convex combination of control disks, applied to `center.x`, `center.y`
/// and `radius` independently.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlDisk {
    /// The center of the disk.
    pub center: Point,
    /// The radius of the disk. Expected to be non-negative.
    pub radius: f64,
}

impl ControlDisk {
    /// The disk of radius 0 at the origin.
    ///
    /// This is the degenerate result of evaluating a spline that has too
    /// few control disks for its degree.
    pub const ZERO: ControlDisk = ControlDisk::new(Point::ZERO, 0.0);

    /// Create a new disk.
    #[inline]
    pub const fn new(center: Point, radius: f64) -> ControlDisk {
        ControlDisk { center, radius }
    }

    /// Create a new disk from its three coordinates.
    #[inline]
    pub const fn from_xyr(x: f64, y: f64, radius: f64) -> ControlDisk {
        ControlDisk::new(Point::new(x, y), radius)
    }

    /// Linearly interpolate between two disks.
    #[inline]
    pub fn lerp(self, other: ControlDisk, t: f64) -> ControlDisk {
        ControlDisk {
            center: self.center.lerp(other.center, t),
            radius: self.radius + t * (other.radius - self.radius),
        }
    }

    /// The difference between two disks, as a rate of change.
    #[inline]
    pub fn delta(self, other: ControlDisk) -> DiskDeriv {
        DiskDeriv {
            d: self.center - other.center,
            radius_rate: self.radius - other.radius,
        }
    }

    /// Is every coordinate of this disk finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.center.is_finite() && self.radius.is_finite()
    }

    /// Add `w` times `other` to the running weighted sum in `self`.
    #[inline]
    pub(crate) fn accumulate(&mut self, w: f64, other: ControlDisk) {
        self.center.x += w * other.center.x;
        self.center.y += w * other.center.y;
        self.radius += w * other.radius;
    }
}

impl From<(f64, f64, f64)> for ControlDisk {
    #[inline]
    fn from((x, y, r): (f64, f64, f64)) -> ControlDisk {
        ControlDisk::from_xyr(x, y, r)
    }
}

impl fmt::Display for ControlDisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, r=", self.center)?;
        fmt::Display::fmt(&self.radius, f)
    }
}

/// The derivative of an interpolated disk with respect to the curve parameter.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct DiskDeriv {
    /// Derivative of the center, i.e. the (unnormalized) tangent.
    pub d: Vec2,
    /// Derivative of the radius.
    pub radius_rate: f64,
}

impl DiskDeriv {
    /// The zero derivative.
    pub const ZERO: DiskDeriv = DiskDeriv {
        d: Vec2::ZERO,
        radius_rate: 0.0,
    };

    #[inline]
    pub(crate) fn accumulate(&mut self, w: f64, disk: ControlDisk) {
        self.d.x += w * disk.center.x;
        self.d.y += w * disk.center.y;
        self.radius_rate += w * disk.radius;
    }
}

/// A disk evaluated at parameter `u` along the curve.
///
/// Samples are produced fresh on each query.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// The curve parameter.
    pub u: f64,
    /// The interpolated disk at `u`.
    pub disk: ControlDisk,
}

impl Sample {
    /// Create a new sample.
    #[inline]
    pub const fn new(u: f64, disk: ControlDisk) -> Sample {
        Sample { u, disk }
    }
}
