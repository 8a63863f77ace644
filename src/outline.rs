// Copyright 2026 the Diskspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Variable-width outlines built from sampled disks.

use alloc::string::String;
use alloc::vec::Vec;

use crate::common::DEGENERATE_EPSILON;
use crate::{Diagnostic, DiagnosticSink, Path, Point, Sample, SvgArc, Vec2};

/// The geometry produced for one spline.
#[derive(Clone, Debug, Default)]
pub struct Outline {
    /// Closed fill path: both offset boundaries, plus round caps on open curves.
    pub fill: Path,
    /// Polyline through the sample centers.
    pub skeleton: Path,
    /// The samples the outline was built from, in order.
    pub samples: Vec<Sample>,
    /// Unit normal at each sample.
    pub normals: Vec<Vec2>,
}

impl Outline {
    /// The fill path as SVG path data.
    pub fn fill_svg(&self) -> String {
        self.fill.to_svg()
    }

    /// The skeleton path as SVG path data.
    pub fn skeleton_svg(&self) -> String {
        self.skeleton.to_svg()
    }

    /// Returns `true` if there were no samples to outline.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Build the outline of a stroke through `samples`.
///
/// `derivatives[i]` is the center derivative (the tangent) at `samples[i]`;
/// a missing entry is treated as a vanished tangent. The normal at each
/// sample is the tangent turned a quarter, and the two boundaries are the
/// centers offset along the normal by plus and minus the radius.
///
/// For an open curve the fill path runs out along the lower boundary and
/// back along the upper one, joined at either end by a half circle (or by
/// a straight segment where the radius is zero). For a closed curve there
/// are no caps; the fill is two closed subpaths, the lower boundary forward
/// and the upper boundary reversed, which bound the band under either fill
/// rule.
pub fn build_outline(
    samples: &[Sample],
    derivatives: &[Vec2],
    closed: bool,
    sink: &impl DiagnosticSink,
) -> Outline {
    let normals = normals(derivatives, samples.len(), sink);
    let mut upper = Vec::with_capacity(samples.len());
    let mut lower = Vec::with_capacity(samples.len());
    for (s, &n) in samples.iter().zip(&normals) {
        let offset = n * s.disk.radius;
        upper.push(s.disk.center + offset);
        lower.push(s.disk.center - offset);
    }

    let mut skeleton = Path::new();
    for (i, s) in samples.iter().enumerate() {
        if i == 0 {
            skeleton.move_to(s.disk.center);
        } else {
            skeleton.line_to(s.disk.center);
        }
    }

    let fill = if samples.is_empty() {
        Path::new()
    } else if closed {
        closed_fill(&upper, &lower)
    } else {
        open_fill(samples, &normals, &upper, &lower)
    };

    Outline {
        fill,
        skeleton,
        samples: samples.to_vec(),
        normals,
    }
}

fn normals(derivatives: &[Vec2], count: usize, sink: &impl DiagnosticSink) -> Vec<Vec2> {
    let mut normals: Vec<Vec2> = Vec::with_capacity(count);
    for i in 0..count {
        let d = derivatives.get(i).copied().unwrap_or(Vec2::ZERO);
        let len = d.hypot();
        let n = if len < DEGENERATE_EPSILON || !len.is_finite() {
            sink.report(&Diagnostic::DegenerateTangent { index: i });
            normals.last().copied().unwrap_or(Vec2::new(1.0, 0.0))
        } else {
            (d / len).turn_90()
        };
        normals.push(n);
    }
    normals
}

/// The tangent direction implied by a normal.
fn tangent_of(normal: Vec2) -> Vec2 {
    Vec2::new(normal.y, -normal.x)
}

fn open_fill(samples: &[Sample], normals: &[Vec2], upper: &[Point], lower: &[Point]) -> Path {
    let last = samples.len() - 1;
    let mut path = Path::new();
    path.move_to(upper[0]);

    // Start cap: from the upper to the lower boundary, bowing backwards.
    let r0 = samples[0].disk.radius;
    if r0 > 0.0 {
        let sweep = tangent_of(normals[0]).cross(lower[0] - upper[0]) < 0.0;
        path.arc_to(SvgArc::semicircle(r0, sweep, lower[0]));
    } else {
        path.line_to(lower[0]);
    }
    for &p in &lower[1..] {
        path.line_to(p);
    }

    // End cap: from the lower back to the upper boundary, bowing forwards.
    let r1 = samples[last].disk.radius;
    if r1 > 0.0 {
        let sweep = tangent_of(normals[last]).cross(upper[last] - lower[last]) > 0.0;
        path.arc_to(SvgArc::semicircle(r1, sweep, upper[last]));
    } else {
        path.line_to(upper[last]);
    }
    for &p in upper[..last].iter().rev() {
        path.line_to(p);
    }
    path.close_path();
    path
}

fn closed_fill(upper: &[Point], lower: &[Point]) -> Path {
    let mut path = Path::new();
    for (i, &p) in lower.iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    for (i, &p) in upper.iter().rev().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CollectSink, ControlDisk, NullSink, PathEl};

    fn straight(n: usize, radius: f64) -> Vec<Sample> {
        (0..n)
            .map(|i| Sample::new(i as f64, ControlDisk::from_xyr(i as f64 * 10.0, 0.0, radius)))
            .collect()
    }

    #[test]
    fn open_with_round_caps() {
        let samples = straight(3, 2.0);
        let derivs = vec![Vec2::new(1.0, 0.0); 3];
        let outline = build_outline(&samples, &derivs, false, &NullSink);
        assert_eq!(outline.normals, vec![Vec2::new(0.0, 1.0); 3]);
        assert_eq!(
            outline.fill_svg(),
            "M0 2 A2 2 0 0 1 0 -2 L10 -2 L20 -2 A2 2 0 0 1 20 2 L10 2 L0 2 Z"
        );
        assert_eq!(outline.skeleton_svg(), "M0 0 L10 0 L20 0");
    }

    /// Midpoint of the half circle from `from` about `center`.
    fn bulge(from: Point, center: Point, sweep: bool) -> Point {
        let turned = (from - center).turn_90();
        center + if sweep { turned } else { -turned }
    }

    #[test]
    fn caps_bow_outwards() {
        let radius = 1.5;
        for dir in [Vec2::new(3.0, 4.0), Vec2::new(-1.0, 0.0), Vec2::new(0.0, -2.0)] {
            let t = dir.normalize();
            let samples: Vec<Sample> = (0..2)
                .map(|i| {
                    let center = (t * (10.0 * i as f64)).to_point();
                    Sample::new(i as f64, ControlDisk::new(center, radius))
                })
                .collect();
            let outline = build_outline(&samples, &[dir; 2], false, &NullSink);
            let els = outline.fill.elements();
            let (Some(upper_first), PathEl::ArcTo(start), Some(lower_last), PathEl::ArcTo(end)) =
                (els[0].end_point(), els[1], els[2].end_point(), els[3])
            else {
                panic!("expected two caps: {els:?}");
            };

            // The start cap bulges behind the first disk.
            let c0 = samples[0].disk.center;
            let behind = (bulge(upper_first, c0, start.sweep) - c0).dot(t);
            assert!((behind + radius).abs() < 1e-9, "{dir:?}: {behind}");

            // The end cap bulges ahead of the last disk.
            let c1 = samples[1].disk.center;
            let ahead = (bulge(lower_last, c1, end.sweep) - c1).dot(t);
            assert!((ahead - radius).abs() < 1e-9, "{dir:?}: {ahead}");
        }
    }

    #[test]
    fn zero_radius_caps_are_lines() {
        let mut samples = straight(3, 1.0);
        samples[0].disk.radius = 0.0;
        samples[2].disk.radius = 0.0;
        let derivs = vec![Vec2::new(1.0, 0.0); 3];
        let outline = build_outline(&samples, &derivs, false, &NullSink);
        assert!(!outline.fill.has_arcs());
        assert_eq!(
            outline.fill_svg(),
            "M0 0 L0 0 L10 -1 L20 0 L20 0 L10 1 L0 0 Z"
        );
    }

    #[test]
    fn closed_has_two_loops_and_no_caps() {
        let samples = straight(4, 1.0);
        let derivs = vec![Vec2::new(1.0, 0.0); 4];
        let outline = build_outline(&samples, &derivs, true, &NullSink);
        assert!(!outline.fill.has_arcs());
        let moves = outline
            .fill
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        let closes = outline
            .fill
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::ClosePath))
            .count();
        assert_eq!((moves, closes), (2, 2));
        assert_eq!(outline.fill.points().next(), Some(Point::new(0.0, -1.0)));
    }

    #[test]
    fn degenerate_tangent_reuses_previous_normal() {
        let samples = straight(3, 1.0);
        let derivs = vec![Vec2::new(0.0, 3.0), Vec2::ZERO, Vec2::new(0.0, 3.0)];
        let sink = CollectSink::new();
        let outline = build_outline(&samples, &derivs, false, &sink);
        assert_eq!(outline.normals[1], outline.normals[0]);
        assert_eq!(outline.normals[0], Vec2::new(-1.0, 0.0));
        assert_eq!(sink.take(), vec![Diagnostic::DegenerateTangent { index: 1 }]);
    }

    #[test]
    fn first_degenerate_tangent_defaults_to_x() {
        let samples = straight(2, 1.0);
        let sink = CollectSink::new();
        // No derivatives at all.
        let outline = build_outline(&samples, &[], false, &sink);
        assert_eq!(outline.normals, vec![Vec2::new(1.0, 0.0); 2]);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn empty_input() {
        let outline = build_outline(&[], &[], false, &NullSink);
        assert!(outline.is_empty());
        assert!(outline.fill.is_empty());
        assert!(outline.skeleton.is_empty());
    }
}
