// Copyright 2026 the Diskspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform knot vectors for open (clamped) and closed (periodic) splines.

use alloc::vec::Vec;
use core::ops::Range;

use crate::SplineError;

/// A non-decreasing sequence of knots for a uniform B-spline.
///
/// Knot vectors are only ever built whole from a disk count, a degree and
/// a closedness flag; a changed disk sequence means a new knot vector.
#[derive(Clone, Debug, PartialEq)]
pub struct KnotVector {
    knots: Vec<f64>,
    degree: usize,
    /// Index `i` of the last non-empty span `knots[i]..knots[i + 1]`.
    last_span: usize,
}

impl KnotVector {
    /// Build the knot vector for `disk_count` control disks.
    ///
    /// For an open curve, with `n = disk_count - 1` and degree `k`, there are
    /// `n + k + 2` knots: `k + 1` zeros, then `1, 2, ..`, then the end value
    /// `n - k + 1` repeated so that both ends of the curve are clamped to the
    /// first and last control disk.
    ///
    /// A closed curve is evaluated over the disks extended by a copy of their
    /// first `k`, so `n = disk_count + k - 1` here, and the knots are simply
    /// `knots[i] = i - k`.
    ///
    /// Returns [`SplineError::InsufficientDisks`] when `disk_count - 1 < degree`.
    pub fn build(disk_count: usize, degree: usize, closed: bool) -> Result<Self, SplineError> {
        if disk_count == 0 || disk_count - 1 < degree {
            return Err(SplineError::InsufficientDisks {
                disks: disk_count,
                degree,
            });
        }
        let k = degree;
        let n = if closed {
            disk_count + k - 1
        } else {
            disk_count - 1
        };
        let len = n + k + 2;
        let knots = (0..len)
            .map(|i| {
                if closed {
                    i as f64 - k as f64
                } else if i <= k {
                    0.0
                } else if i > n {
                    (n - k + 1) as f64
                } else {
                    (i - k) as f64
                }
            })
            .collect::<Vec<_>>();
        let last_span = (0..len - 1)
            .rev()
            .find(|&i| knots[i] < knots[i + 1])
            .unwrap_or(0);
        Ok(KnotVector {
            knots,
            degree,
            last_span,
        })
    }

    /// The knots.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.knots
    }

    /// Number of knots.
    #[inline]
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// Always `false`: a built knot vector has at least `2k + 2` knots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// The degree this knot vector was built for.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of control disks the knots are built over.
    ///
    /// For a closed curve this counts the wrapped-around copies too.
    #[inline]
    pub fn control_count(&self) -> usize {
        self.knots.len() - self.degree - 1
    }

    /// The parameter domain `knots[k]..knots[n + 1]`.
    pub fn domain(&self) -> Range<f64> {
        let n = self.control_count() - 1;
        self.knots[self.degree]..self.knots[n + 1]
    }

    /// The last knot value.
    #[inline]
    pub fn end(&self) -> f64 {
        self.knots[self.knots.len() - 1]
    }

    /// Index of the last span with non-zero length.
    ///
    /// The degree-0 basis function of this span is treated as closed on the
    /// right at the final knot value, so that the curve's end is reachable.
    #[inline]
    pub fn last_span(&self) -> usize {
        self.last_span
    }

    /// Find the span `i` with `knots[i] <= u < knots[i + 1]`.
    ///
    /// At exactly the final knot value this is [`last_span`](Self::last_span).
    /// Returns `None` when `u` lies outside the knots altogether.
    pub fn find_span(&self, u: f64) -> Option<usize> {
        let past = self.knots.partition_point(|&t| t <= u);
        if past == 0 {
            None
        } else if past < self.knots.len() {
            Some(past - 1)
        } else if u == self.end() {
            Some(self.last_span)
        } else {
            None
        }
    }
}

impl core::ops::Index<usize> for KnotVector {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.knots[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_cubic_four_disks() {
        let kv = KnotVector::build(4, 3, false).unwrap();
        assert_eq!(kv.as_slice(), &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(kv.domain(), 0.0..1.0);
        assert_eq!(kv.last_span(), 3);
        assert_eq!(kv.control_count(), 4);
    }

    #[test]
    fn open_cubic_seven_disks() {
        let kv = KnotVector::build(7, 3, false).unwrap();
        assert_eq!(
            kv.as_slice(),
            &[0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 4.0, 4.0, 4.0]
        );
        assert_eq!(kv.len(), 6 + 3 + 2);
        assert_eq!(kv.domain(), 0.0..4.0);
        assert_eq!(kv.last_span(), 6);
    }

    #[test]
    fn open_linear() {
        let kv = KnotVector::build(3, 1, false).unwrap();
        assert_eq!(kv.as_slice(), &[0.0, 0.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn closed_is_uniform() {
        let kv = KnotVector::build(4, 3, true).unwrap();
        // 4 disks + 3 wrapped copies = 7 controls, n = 6.
        assert_eq!(kv.control_count(), 7);
        assert_eq!(kv.len(), 6 + 3 + 2);
        for (i, &t) in kv.as_slice().iter().enumerate() {
            assert_eq!(t, i as f64 - 3.0);
        }
        // The period equals the original disk count.
        assert_eq!(kv.domain(), 0.0..4.0);
    }

    #[test]
    fn too_few_disks() {
        assert_eq!(
            KnotVector::build(3, 3, false),
            Err(SplineError::InsufficientDisks {
                disks: 3,
                degree: 3
            })
        );
        assert!(KnotVector::build(3, 3, true).is_err());
        assert!(KnotVector::build(0, 0, false).is_err());
        assert!(KnotVector::build(1, 0, false).is_ok());
    }

    #[test]
    fn non_decreasing() {
        for disks in 1..12 {
            for degree in 0..disks {
                for closed in [false, true] {
                    let kv = KnotVector::build(disks, degree, closed).unwrap();
                    assert!(kv.as_slice().windows(2).all(|w| w[0] <= w[1]));
                }
            }
        }
    }

    #[test]
    fn span_lookup() {
        let kv = KnotVector::build(7, 3, false).unwrap();
        assert_eq!(kv.find_span(0.0), Some(3));
        assert_eq!(kv.find_span(0.5), Some(3));
        assert_eq!(kv.find_span(1.0), Some(4));
        assert_eq!(kv.find_span(3.999), Some(6));
        assert_eq!(kv.find_span(4.0), Some(6));
        assert_eq!(kv.find_span(4.5), None);
        assert_eq!(kv.find_span(-0.5), None);
    }
}
