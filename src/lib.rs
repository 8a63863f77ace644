// Copyright 2026 the Diskspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Variable-width strokes from control disks.
//!
//! A [`DiskSpline`] takes an ordered sequence of [`ControlDisk`]s (a center
//! plus a radius) and interpolates both with a uniform B-spline: a smooth
//! centerline, and a radius that varies smoothly along it. From that it
//! produces adaptively spaced samples, denser where the centerline bends,
//! and an [`Outline`]: a closed fill path made of the two offset boundaries
//! joined by round caps, plus the centerline itself as a polyline.
//!
//! # Examples
//!
//! ```
//! use diskspline::{ControlDisk, DiskSpline, NullSink, SampleOpts, SplineConfig};
//!
//! let disks = vec![
//!     ControlDisk::from_xyr(0.0, 0.0, 1.0),
//!     ControlDisk::from_xyr(10.0, 0.0, 2.0),
//!     ControlDisk::from_xyr(20.0, 0.0, 2.0),
//!     ControlDisk::from_xyr(30.0, 0.0, 1.0),
//! ];
//! let spline = DiskSpline::with_sink(disks, SplineConfig::default(), NullSink);
//!
//! // Open splines start and end exactly on their first and last disk.
//! let end = spline.domain().unwrap().end;
//! assert_eq!(spline.evaluate_at(end), ControlDisk::from_xyr(30.0, 0.0, 1.0));
//!
//! let outline = spline.outline(&SampleOpts::default());
//! assert!(outline.fill_svg().starts_with("M0 1 A1 1 0 0 1 0 -1"));
//! ```
//!
//! Nothing here fails hard on degenerate geometry. Too few disks for the
//! degree, vanishing tangents and similar conditions produce a defined
//! fallback result and a [`Diagnostic`] for the spline's [`DiagnosticSink`];
//! by default these go to the [`log`] facade.
//!
//! # Feature Flags
//!
//! - `std` (enabled by default): Get floating point functions from the standard library.
//! - `libm`: Use floating point implementations from [libm][].
//!   This is useful for `no_std` environments.
//! - `mint`: Enable `From`/`Into` conversion of [`Point`] and [`Vec2`] with [mint][] types.
//! - `serde`: Implement `serde::Deserialize` and `serde::Serialize` on the input and
//!   configuration types.
//! - `schemars`: Derive JSON schemas for the same types using [schemars][].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://docs.rs/libm
//! [mint]: https://docs.rs/mint
//! [schemars]: https://docs.rs/schemars

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![allow(
    clippy::many_single_char_names,
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::exhaustive_enums
)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("diskspline requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

// Only used by the tests.
#[cfg(test)]
use rand as _;

extern crate alloc;

mod basis;
pub mod common;
mod diagnostics;
mod disk;
mod error;
mod knots;
mod outline;
mod path;
mod point;
mod spline;
mod vec2;

pub use crate::basis::*;
pub use crate::diagnostics::*;
pub use crate::disk::*;
pub use crate::error::*;
pub use crate::knots::*;
pub use crate::outline::*;
pub use crate::path::*;
pub use crate::point::*;
pub use crate::spline::*;
pub use crate::vec2::*;
