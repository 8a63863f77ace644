// Copyright 2026 the Diskspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cox–de Boor basis functions.
//!
//! [`basis`] and [`basis_derivative`] are the textbook recursive
//! definitions, one function at a time. Curve evaluation instead uses
//! [`BasisTable`], which computes every basis function that is non-zero at
//! a parameter in one bottom-up pass, sharing the lower-degree terms.

use smallvec::{smallvec, SmallVec};

use crate::KnotVector;

/// Basis function `N(i, k)` evaluated at `u`.
///
/// The degree-0 functions are indicators of the half-open spans
/// `knots[i] <= u < knots[i + 1]`, except that at exactly the final knot
/// value the last non-empty span counts as closed, so that the right end
/// of the curve is reachable. Terms whose knot span is empty are dropped.
pub fn basis(i: usize, k: usize, u: f64, knots: &KnotVector) -> f64 {
    if i + k + 1 >= knots.len() {
        return 0.0;
    }
    if k == 0 {
        let inside = knots[i] <= u && u < knots[i + 1];
        let closes_end = u == knots.end() && i == knots.last_span();
        return if inside || closes_end { 1.0 } else { 0.0 };
    }
    let mut result = 0.0;
    let d1 = knots[i + k] - knots[i];
    if d1 != 0.0 {
        result += (u - knots[i]) / d1 * basis(i, k - 1, u, knots);
    }
    let d2 = knots[i + k + 1] - knots[i + 1];
    if d2 != 0.0 {
        result += (knots[i + k + 1] - u) / d2 * basis(i + 1, k - 1, u, knots);
    }
    result
}

/// Derivative of [`basis`] with respect to `u`.
pub fn basis_derivative(i: usize, k: usize, u: f64, knots: &KnotVector) -> f64 {
    if k == 0 || i + k + 1 >= knots.len() {
        return 0.0;
    }
    let kf = k as f64;
    let mut result = 0.0;
    let d1 = knots[i + k] - knots[i];
    if d1 != 0.0 {
        result += kf / d1 * basis(i, k - 1, u, knots);
    }
    let d2 = knots[i + k + 1] - knots[i + 1];
    if d2 != 0.0 {
        result -= kf / d2 * basis(i + 1, k - 1, u, knots);
    }
    result
}

/// The basis functions of a knot vector's degree that are non-zero at `u`,
/// together with their derivatives.
///
/// Entry `j` belongs to control index [`first`](Self::first) `+ j`.
#[derive(Clone, Debug)]
pub struct BasisTable {
    first: usize,
    weights: SmallVec<[f64; 8]>,
    derivs: SmallVec<[f64; 8]>,
}

impl BasisTable {
    /// Evaluate all basis functions of degree `knots.degree()` at `u`.
    ///
    /// The table is empty when `u` lies outside the knots.
    pub fn eval(knots: &KnotVector, u: f64) -> BasisTable {
        let k = knots.degree();
        let Some(span) = knots.find_span(u) else {
            return BasisTable {
                first: 0,
                weights: SmallVec::new(),
                derivs: SmallVec::new(),
            };
        };
        let lo = span.saturating_sub(k);
        let width = span - lo + 1;
        let len = knots.len();

        // Degree 0: only the span's own indicator is non-zero.
        let mut n: SmallVec<[f64; 8]> = smallvec![0.0; width];
        n[width - 1] = 1.0;
        let mut derivs: SmallVec<[f64; 8]> = smallvec![0.0; width];

        for p in 1..=k {
            if p == k {
                let kf = k as f64;
                for j in 0..width {
                    let i = lo + j;
                    if i + k + 1 >= len {
                        continue;
                    }
                    let next = n.get(j + 1).copied().unwrap_or(0.0);
                    let d1 = knots[i + k] - knots[i];
                    let d2 = knots[i + k + 1] - knots[i + 1];
                    let mut d = 0.0;
                    if d1 != 0.0 {
                        d += kf / d1 * n[j];
                    }
                    if d2 != 0.0 {
                        d -= kf / d2 * next;
                    }
                    derivs[j] = d;
                }
            }
            // Ascending order reads n[j + 1] before it is overwritten.
            for j in 0..width {
                let i = lo + j;
                if i + p + 1 >= len {
                    n[j] = 0.0;
                    continue;
                }
                let next = n.get(j + 1).copied().unwrap_or(0.0);
                let d1 = knots[i + p] - knots[i];
                let d2 = knots[i + p + 1] - knots[i + 1];
                let mut v = 0.0;
                if d1 != 0.0 {
                    v += (u - knots[i]) / d1 * n[j];
                }
                if d2 != 0.0 {
                    v += (knots[i + p + 1] - u) / d2 * next;
                }
                n[j] = v;
            }
        }
        BasisTable {
            first: lo,
            weights: n,
            derivs,
        }
    }

    /// Control index of the first entry.
    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    /// Returns `true` if no basis function is non-zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The basis values, starting at control index [`first`](Self::first).
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The basis derivatives, starting at control index [`first`](Self::first).
    #[inline]
    pub fn derivs(&self) -> &[f64] {
        &self.derivs
    }

    /// Sum of the basis values; one wherever `u` is inside the domain.
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Sum of the basis derivatives; zero wherever `u` is inside the domain.
    pub fn deriv_sum(&self) -> f64 {
        self.derivs.iter().sum()
    }

    /// Iterate over `(control index, value, derivative)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.weights
            .iter()
            .zip(&self.derivs)
            .enumerate()
            .map(move |(j, (&w, &d))| (self.first + j, w, d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(knots: &KnotVector, steps: usize) -> impl Iterator<Item = f64> {
        let domain = knots.domain();
        (0..=steps).map(move |s| domain.start + (domain.end - domain.start) * s as f64 / steps as f64)
    }

    #[test]
    fn partition_of_unity_open() {
        for degree in 1..=4 {
            let kv = KnotVector::build(9, degree, false).unwrap();
            for u in params(&kv, 97) {
                let sum: f64 = (0..kv.control_count())
                    .map(|i| basis(i, degree, u, &kv))
                    .sum();
                assert!((sum - 1.0).abs() < 1e-9, "degree {degree}, u {u}: {sum}");
                let dsum: f64 = (0..kv.control_count())
                    .map(|i| basis_derivative(i, degree, u, &kv))
                    .sum();
                assert!(dsum.abs() < 1e-9, "degree {degree}, u {u}: {dsum}");
            }
        }
    }

    #[test]
    fn closed_domain_sums_to_one() {
        let kv = KnotVector::build(5, 3, true).unwrap();
        let domain = kv.domain();
        for s in 0..50 {
            let u = domain.start + (domain.end - domain.start) * s as f64 / 50.0;
            let table = BasisTable::eval(&kv, u);
            assert!((table.weight_sum() - 1.0).abs() < 1e-9);
            assert!(table.deriv_sum().abs() < 1e-9);
        }
    }

    #[test]
    fn endpoints_are_clamped() {
        let kv = KnotVector::build(6, 3, false).unwrap();
        let end = kv.domain().end;
        assert_eq!(basis(0, 3, 0.0, &kv), 1.0);
        assert_eq!(basis(5, 3, end, &kv), 1.0);
        for i in 0..5 {
            assert_eq!(basis(i, 3, end, &kv), 0.0);
        }
    }

    #[test]
    fn table_matches_recursion() {
        for (disks, degree, closed) in [(4, 3, false), (8, 3, false), (7, 2, true), (5, 1, false)] {
            let kv = KnotVector::build(disks, degree, closed).unwrap();
            for u in params(&kv, 41) {
                let table = BasisTable::eval(&kv, u);
                for i in 0..kv.control_count() {
                    let (w, d) = table
                        .iter()
                        .find(|&(j, _, _)| j == i)
                        .map_or((0.0, 0.0), |(_, w, d)| (w, d));
                    assert!((w - basis(i, degree, u, &kv)).abs() < 1e-12);
                    assert!((d - basis_derivative(i, degree, u, &kv)).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn table_width_is_degree_plus_one() {
        let kv = KnotVector::build(10, 3, false).unwrap();
        let table = BasisTable::eval(&kv, 2.5);
        assert_eq!(table.weights().len(), 4);
        assert_eq!(table.first(), 2);
        assert!(table.weights().iter().all(|&w| w >= 0.0));
    }

    #[test]
    fn outside_knots_is_empty() {
        let kv = KnotVector::build(5, 2, false).unwrap();
        assert!(BasisTable::eval(&kv, -1.0).is_empty());
        assert!(BasisTable::eval(&kv, 100.0).is_empty());
    }

    #[test]
    fn degree_zero_is_piecewise_constant() {
        let kv = KnotVector::build(3, 0, false).unwrap();
        let table = BasisTable::eval(&kv, 1.5);
        assert_eq!(table.first(), 1);
        assert_eq!(table.weights(), &[1.0]);
        assert_eq!(table.derivs(), &[0.0]);
    }
}
