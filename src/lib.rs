#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Histobrot renderer
//!
//! The Mandelbrot set takes a point on the complex plane and
//! repeatedly multiplies it by itself, measuring how quickly that
//! number goes to infinity.  This "velocity" is the number used to
//! render the image.  Coloring by the raw velocity produces harsh
//! banding wherever velocities cluster, which for the Mandelbrot is
//! nearly everywhere interesting.
//!
//! Histobrot instead colors by *rank*: it counts how many pixels
//! share each velocity, and positions every pixel within its gradient
//! segment by the cumulative number of pixels that escaped before it
//! did.  The gradient spends itself in proportion to how much of the
//! image has been used up, so the coloring stays evenly distributed
//! no matter how the velocities bunch together.  Points that never
//! escape are painted black.
//!
//! The view is described as a stack of zooms, each one a focus point
//! and a magnification applied in the frame established by the zooms
//! before it, folded down to a single center-and-scale before any
//! pixel is computed.

extern crate crossbeam;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod color;
pub mod error;
pub mod escape;
pub mod histogram;
pub mod pixels;
pub mod render;
pub mod view;

pub use color::{default_gradient, ColorStop, Rgb};
pub use error::RenderError;
pub use escape::escape_time;
pub use histogram::{assign_colors, range_totals, Histogram};
pub use pixels::PixelGrid;
pub use render::{render, render_threaded, RenderConfig};
pub use view::{Viewport, Zoom};
