// Copyright 2026 the Diskspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform B-splines over control disks.

use alloc::vec::Vec;
use core::ops::Range;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;
use crate::common::{wrap_into, CURVATURE_STEP, DEGENERATE_EPSILON};
use crate::{
    build_outline, BasisTable, ControlDisk, Diagnostic, DiagnosticSink, DiskDeriv, KnotVector,
    LogSink, Outline, Sample, Vec2,
};

/// Uniform sampling never uses more than this many points per disk count.
const MAX_AUTO_BASE: usize = 200;
/// Automatic uniform samples per control disk.
const SAMPLES_PER_DISK: usize = 20;
/// Normalized curvature above which a segment is refined.
const REFINE_CURVATURE: f64 = 0.15;
/// Segments shorter than this are never refined.
const REFINE_MIN_LENGTH: f64 = 0.5;
/// Upper bound on samples inserted into one segment.
const REFINE_MAX_EXTRA: usize = 4;

/// The shape of a spline: its degree and whether it wraps around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplineConfig {
    /// Polynomial degree of the basis.
    pub degree: usize,
    /// Closed (periodic) rather than open (clamped).
    pub closed: bool,
}

impl Default for SplineConfig {
    fn default() -> Self {
        SplineConfig {
            degree: 3,
            closed: false,
        }
    }
}

impl SplineConfig {
    /// Builder method for setting the degree.
    #[must_use]
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Builder method for setting closedness.
    #[must_use]
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }
}

/// Sample counts for adaptive sampling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleOpts {
    /// Minimum number of uniformly spaced samples.
    pub base_count: usize,
    /// Cap on the total after refinement.
    pub max_count: usize,
}

impl Default for SampleOpts {
    fn default() -> Self {
        SampleOpts {
            base_count: 100,
            max_count: 500,
        }
    }
}

impl SampleOpts {
    /// Builder method for setting the base count.
    #[must_use]
    pub fn with_base_count(mut self, base_count: usize) -> Self {
        self.base_count = base_count;
        self
    }

    /// Builder method for setting the maximum count.
    #[must_use]
    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }
}

/// A uniform B-spline interpolating both the centers and the radii of a
/// sequence of control disks.
///
/// Open splines are clamped, so they start at the first disk and end at the
/// last. Closed splines are periodic; they are evaluated over the disks with
/// the first `degree` of them appended again at the end, which lets the same
/// basis code serve both cases.
///
/// Every query is a pure function of the disks and the knot vector. Any
/// change to the disks or the configuration rebuilds both from scratch. With
/// fewer than `degree + 1` disks the spline is degenerate: [`knots`] is
/// `None` and queries return zero disks, zero derivatives or empty output,
/// reporting [`Diagnostic::InsufficientDisks`] to the sink.
///
/// [`knots`]: DiskSpline::knots
#[derive(Clone, Debug)]
pub struct DiskSpline<S = LogSink> {
    controls: Vec<ControlDisk>,
    /// The controls, extended by the wrapped-around copies when closed.
    disks: Vec<ControlDisk>,
    config: SplineConfig,
    knots: Option<KnotVector>,
    sink: S,
}

impl DiskSpline<LogSink> {
    /// Create a spline that reports diagnostics through the `log` crate.
    pub fn new(disks: Vec<ControlDisk>, config: SplineConfig) -> Self {
        DiskSpline::with_sink(disks, config, LogSink)
    }
}

impl<S: DiagnosticSink> DiskSpline<S> {
    /// Create a spline with a custom diagnostic sink.
    pub fn with_sink(disks: Vec<ControlDisk>, config: SplineConfig, sink: S) -> Self {
        let mut spline = DiskSpline {
            controls: disks,
            disks: Vec::new(),
            config,
            knots: None,
            sink,
        };
        spline.rebuild();
        spline
    }

    fn rebuild(&mut self) {
        let SplineConfig { degree, closed } = self.config;
        self.knots = KnotVector::build(self.controls.len(), degree, closed).ok();
        self.disks.clear();
        self.disks.extend_from_slice(&self.controls);
        if closed && self.knots.is_some() {
            self.disks.extend_from_slice(&self.controls[..degree]);
        }
    }

    /// Append a disk to the end of the sequence.
    pub fn push_disk(&mut self, disk: ControlDisk) {
        self.controls.push(disk);
        self.rebuild();
    }

    /// Replace the whole disk sequence.
    pub fn set_disks(&mut self, disks: Vec<ControlDisk>) {
        self.controls = disks;
        self.rebuild();
    }

    /// Change the degree.
    pub fn set_degree(&mut self, degree: usize) {
        self.config.degree = degree;
        self.rebuild();
    }

    /// Change closedness.
    pub fn set_closed(&mut self, closed: bool) {
        self.config.closed = closed;
        self.rebuild();
    }

    /// The control disks, as supplied.
    pub fn disks(&self) -> &[ControlDisk] {
        &self.controls
    }

    /// The configuration.
    pub fn config(&self) -> SplineConfig {
        self.config
    }

    /// The diagnostic sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The knot vector, or `None` if there are too few disks for the degree.
    pub fn knots(&self) -> Option<&KnotVector> {
        self.knots.as_ref()
    }

    /// Returns `true` if there are enough disks to evaluate the curve.
    pub fn is_valid(&self) -> bool {
        self.knots.is_some()
    }

    /// The parameter domain `knots[k]..knots[n + 1]`.
    pub fn domain(&self) -> Option<Range<f64>> {
        self.knots.as_ref().map(KnotVector::domain)
    }

    /// Length of the parameter domain; for closed curves, the period.
    ///
    /// Zero for a degenerate spline.
    pub fn period(&self) -> f64 {
        self.domain().map_or(0.0, |d| d.end - d.start)
    }

    fn checked_knots(&self) -> Option<&KnotVector> {
        if self.knots.is_none() {
            self.sink.report(&Diagnostic::InsufficientDisks {
                disks: self.controls.len(),
                degree: self.config.degree,
            });
        }
        self.knots.as_ref()
    }

    /// Evaluate the interpolated disk at parameter `u`.
    ///
    /// Closed curves wrap `u` into the domain. Open curves clamp it, and at
    /// or past the end of the domain return the last control disk exactly.
    pub fn evaluate_at(&self, u: f64) -> ControlDisk {
        let Some(knots) = self.checked_knots() else {
            return ControlDisk::ZERO;
        };
        let domain = knots.domain();
        let u = if self.config.closed {
            wrap_into(u, domain.start, domain.end - domain.start)
        } else if u >= domain.end {
            return self.disks.last().copied().unwrap_or(ControlDisk::ZERO);
        } else {
            u.max(domain.start)
        };
        let table = BasisTable::eval(knots, u);
        let mut disk = ControlDisk::ZERO;
        for (i, w, _) in table.iter() {
            if let Some(&control) = self.disks.get(i) {
                disk.accumulate(w, control);
            }
        }
        let sum = table.weight_sum();
        if (sum - 1.0).abs() > DEGENERATE_EPSILON {
            self.sink.report(&Diagnostic::BasisSumDrift { u, sum });
        }
        disk
    }

    /// Evaluate the derivative of the interpolated disk at parameter `u`.
    ///
    /// At either end of an open curve, a tangent that vanishes analytically
    /// is replaced by the unit direction between the two control disks at
    /// that end, so that the tangent is defined exactly at the endpoints.
    pub fn evaluate_derivative_at(&self, u: f64) -> DiskDeriv {
        let Some(knots) = self.checked_knots() else {
            return DiskDeriv::ZERO;
        };
        let domain = knots.domain();
        let (u, at_start, at_end) = if self.config.closed {
            (
                wrap_into(u, domain.start, domain.end - domain.start),
                false,
                false,
            )
        } else {
            let at_start = u <= domain.start;
            let at_end = u >= domain.end;
            (u.max(domain.start).min(domain.end), at_start, at_end)
        };
        let table = BasisTable::eval(knots, u);
        let mut deriv = DiskDeriv::ZERO;
        for (i, _, d) in table.iter() {
            if let Some(&control) = self.disks.get(i) {
                deriv.accumulate(d, control);
            }
        }
        let sum = table.deriv_sum();
        if sum.abs() > DEGENERATE_EPSILON {
            self.sink.report(&Diagnostic::DerivativeSumDrift { u, sum });
        }

        if (at_start || at_end) && deriv.d.hypot() < DEGENERATE_EPSILON {
            let n = self.disks.len();
            let pair = if at_start {
                self.disks.get(1).zip(self.disks.first())
            } else {
                self.disks.last().zip(n.checked_sub(2).and_then(|i| self.disks.get(i)))
            };
            if let Some((&a, &b)) = pair {
                let direction = a.delta(b).d;
                if direction.hypot() >= DEGENERATE_EPSILON {
                    self.sink
                        .report(&Diagnostic::EndpointTangentFallback { u });
                    deriv.d = direction.normalize();
                }
            }
        }
        deriv
    }

    /// Curvature of the centerline at parameter `u`.
    ///
    /// The second derivative is a forward difference of the first, or a
    /// backward difference where a forward step would leave the domain of
    /// an open curve. Where the tangent is too short for the result to mean
    /// anything, the curvature is taken to be zero and
    /// [`Diagnostic::DegenerateCurvature`] is reported.
    pub fn curvature_at(&self, u: f64) -> f64 {
        let Some(knots) = self.checked_knots() else {
            return 0.0;
        };
        let (lo, hi) = if self.config.closed {
            (u, u + CURVATURE_STEP)
        } else {
            let domain = knots.domain();
            let u = u.max(domain.start).min(domain.end);
            if u + CURVATURE_STEP > domain.end {
                (u - CURVATURE_STEP, u)
            } else {
                (u, u + CURVATURE_STEP)
            }
        };
        let d1 = self.evaluate_derivative_at(u).d;
        let d2 = (self.evaluate_derivative_at(hi).d - self.evaluate_derivative_at(lo).d)
            / CURVATURE_STEP;
        let denom = d1.hypot2().powf(1.5);
        if denom < DEGENERATE_EPSILON {
            self.sink.report(&Diagnostic::DegenerateCurvature { u });
            return 0.0;
        }
        d1.cross(d2).abs() / denom
    }

    /// Sample the curve, denser where it bends more.
    ///
    /// First `max(base_count, min(200, 20 * disk count))` samples are spread
    /// uniformly over the whole domain. Then, while the total is below
    /// `max_count`, up to four samples are inserted between neighbors whose
    /// normalized curvature exceeds 0.15 and whose centers are more than 0.5
    /// apart, in proportion to both. A pair's normalized curvature is the
    /// larger of its two samples' curvatures divided by the largest over
    /// the uniform pass, so a bend is refined on both sides of its peak.
    /// Inserted samples split the pair's parameter interval evenly.
    ///
    /// The result never has more than `max_count` samples unless the uniform
    /// pass alone already exceeds it, in which case the uniform pass is
    /// returned unrefined.
    pub fn sample(&self, base_count: usize, max_count: usize) -> Vec<Sample> {
        let Some(knots) = self.checked_knots() else {
            return Vec::new();
        };
        let domain = knots.domain();
        let auto = (self.controls.len() * SAMPLES_PER_DISK).min(MAX_AUTO_BASE);
        let base = base_count.max(auto).max(2);

        let step = (domain.end - domain.start) / (base - 1) as f64;
        let mut uniform = Vec::with_capacity(base);
        let mut max_curvature = 0.0_f64;
        for j in 0..base {
            let u = if j == base - 1 {
                domain.end
            } else {
                domain.start + step * j as f64
            };
            let curvature = self.curvature_at(u);
            max_curvature = max_curvature.max(curvature);
            uniform.push((Sample::new(u, self.evaluate_at(u)), curvature));
        }

        let mut out = Vec::with_capacity(base);
        let mut count = base;
        for (j, &(a, ka)) in uniform.iter().enumerate() {
            out.push(a);
            let Some(&(b, kb)) = uniform.get(j + 1) else {
                break;
            };
            if count >= max_count {
                continue;
            }
            let normalized = if max_curvature > 0.0 {
                ka.max(kb) / max_curvature
            } else {
                0.0
            };
            let length = a.disk.center.distance(b.disk.center);
            if normalized <= REFINE_CURVATURE || length <= REFINE_MIN_LENGTH {
                continue;
            }
            let wanted = (normalized * 4.0 * length / 10.0).floor() as usize;
            let extra = wanted.min(REFINE_MAX_EXTRA).min(max_count - count);
            for e in 1..=extra {
                let u = a.u + (b.u - a.u) * e as f64 / (extra + 1) as f64;
                out.push(Sample::new(u, self.evaluate_at(u)));
            }
            count += extra;
        }
        out
    }

    /// Sample the curve and build its outline.
    ///
    /// Derivatives are evaluated at each sample's parameter, so the normals
    /// follow the true tangent rather than the sample polyline.
    pub fn outline(&self, opts: &SampleOpts) -> Outline {
        let samples = self.sample(opts.base_count, opts.max_count);
        let derivatives: Vec<Vec2> = samples
            .iter()
            .map(|s| self.evaluate_derivative_at(s.u).d)
            .collect();
        build_outline(&samples, &derivatives, self.config.closed, &self.sink)
    }
}
