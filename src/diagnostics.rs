// Copyright 2026 the Diskspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Soft-failure reporting.
//!
//! Nothing in this crate fails hard on degenerate geometry. Instead, each
//! fallback (skipping a term, reusing a normal, treating curvature as zero)
//! is reported to a [`DiagnosticSink`] and evaluation carries on. The sink
//! is an observer only: its behavior never feeds back into the geometry.

use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// A soft failure noticed while evaluating or outlining a spline.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Diagnostic {
    /// Fewer than `degree + 1` control disks; a degenerate result was returned.
    InsufficientDisks {
        /// Number of disks available.
        disks: usize,
        /// Configured degree.
        degree: usize,
    },
    /// Basis weights at `u` did not sum to one.
    BasisSumDrift {
        /// The (domain-adjusted) parameter.
        u: f64,
        /// The actual sum of the weights.
        sum: f64,
    },
    /// Basis derivative weights at `u` did not sum to zero.
    DerivativeSumDrift {
        /// The (domain-adjusted) parameter.
        u: f64,
        /// The actual sum of the derivative weights.
        sum: f64,
    },
    /// The tangent at an outline sample vanished; the previous normal was reused.
    DegenerateTangent {
        /// Index of the sample within the outline.
        index: usize,
    },
    /// The analytic tangent at an open curve's end vanished and was replaced
    /// by the direction between the two boundary control disks.
    EndpointTangentFallback {
        /// The endpoint parameter.
        u: f64,
    },
    /// The tangent at `u` was too short for curvature to be measured; it
    /// was taken to be zero.
    DegenerateCurvature {
        /// The parameter, as passed in.
        u: f64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Diagnostic::InsufficientDisks { disks, degree } => write!(
                f,
                "not enough control disks: have {disks}, degree {degree} needs {}",
                degree + 1
            ),
            Diagnostic::BasisSumDrift { u, sum } => {
                write!(f, "basis weights at u={u} sum to {sum}, expected 1")
            }
            Diagnostic::DerivativeSumDrift { u, sum } => {
                write!(f, "basis derivatives at u={u} sum to {sum}, expected 0")
            }
            Diagnostic::DegenerateTangent { index } => {
                write!(f, "zero-length tangent at sample {index}, reusing previous normal")
            }
            Diagnostic::EndpointTangentFallback { u } => {
                write!(f, "zero-length tangent at endpoint u={u}, using control polygon direction")
            }
            Diagnostic::DegenerateCurvature { u } => {
                write!(f, "tangent too short for curvature at u={u}, using 0")
            }
        }
    }
}

/// Receiver for [`Diagnostic`]s.
pub trait DiagnosticSink {
    /// Record one diagnostic.
    fn report(&self, diagnostic: &Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Forwards diagnostics to the [`log`] facade.
///
/// Endpoint fallbacks and zero curvature fallbacks are expected on many
/// inputs and are logged at `debug`; everything else is a `warn`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::EndpointTangentFallback { .. } | Diagnostic::DegenerateCurvature { .. } => {
                log::debug!("{diagnostic}");
            }
            _ => log::warn!("{diagnostic}"),
        }
    }
}

/// Discards every diagnostic.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Keeps every diagnostic in memory, in the order reported.
#[derive(Debug, Default)]
pub struct CollectSink {
    seen: RefCell<Vec<Diagnostic>>,
}

impl CollectSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.seen.take()
    }

    /// Number of diagnostics collected so far.
    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }

    /// Returns `true` if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.seen.borrow_mut().push(*diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_in_order() {
        let sink = CollectSink::new();
        sink.report(&Diagnostic::DegenerateTangent { index: 2 });
        (&sink).report(&Diagnostic::EndpointTangentFallback { u: 0.0 });
        assert_eq!(sink.len(), 2);
        let seen = sink.take();
        assert_eq!(seen[0], Diagnostic::DegenerateTangent { index: 2 });
        assert!(sink.is_empty());
    }

    #[test]
    fn display() {
        let d = Diagnostic::InsufficientDisks {
            disks: 2,
            degree: 3,
        };
        assert_eq!(
            d.to_string(),
            "not enough control disks: have 2, degree 3 needs 4"
        );
        let d = Diagnostic::BasisSumDrift { u: 0.5, sum: 0.9 };
        assert_eq!(d.to_string(), "basis weights at u=0.5 sum to 0.9, expected 1");
        let d = Diagnostic::DegenerateCurvature { u: 1.5 };
        assert_eq!(d.to_string(), "tangent too short for curvature at u=1.5, using 0");
    }
}
