// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The render pipeline: a validated configuration in, a finished
//! PixelGrid out.  Pass one folds the zoom stack into a viewport and
//! fills a flat iteration-count grid, tallying the histogram as it
//! goes; pass two turns counts into colors.  The iteration pass is
//! where all the time goes, and each pixel is independent, so it
//! comes in a single-threaded form and a banded multi-threaded form
//! that produce identical grids.

use crossbeam::thread::ScopedJoinHandle;

use color::ColorStop;
use error::RenderError;
use escape::escape_time;
use histogram::{assign_colors, Histogram};
use pixels::PixelGrid;
use view::{Viewport, Zoom};

/// Everything a render needs: grid dimensions, the zoom stack, the
/// gradient, and the iteration limit.  Construction validates, so a
/// config that exists can be rendered; nothing fails mid-render.
#[derive(Debug)]
pub struct RenderConfig {
    width: usize,
    height: usize,
    zooms: Vec<Zoom>,
    stops: Vec<ColorStop>,
    max_iterations: usize,
}

impl RenderConfig {
    /// Constructor.  Rejects empty grids, a zero iteration limit,
    /// non-positive zoom scales, and any gradient that is not a
    /// strictly increasing run of stops from 0.0 to 1.0 with at
    /// least two entries.
    pub fn new(
        width: usize,
        height: usize,
        zooms: Vec<Zoom>,
        stops: Vec<ColorStop>,
        max_iterations: usize,
    ) -> Result<RenderConfig, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::config("image dimensions must be positive"));
        }
        if max_iterations == 0 {
            return Err(RenderError::config("iteration limit must be positive"));
        }
        if zooms.iter().any(|zoom| !(zoom.scale > 0.0)) {
            return Err(RenderError::config("zoom scales must be positive"));
        }
        if stops.len() < 2 {
            return Err(RenderError::config("gradient needs at least two stops"));
        }
        if stops[0].threshold != 0.0 {
            return Err(RenderError::config("gradient must start at threshold 0.0"));
        }
        if stops[stops.len() - 1].threshold != 1.0 {
            return Err(RenderError::config("gradient must end at threshold 1.0"));
        }
        if stops
            .windows(2)
            .any(|pair| pair[1].threshold <= pair[0].threshold)
        {
            return Err(RenderError::config(
                "gradient thresholds must be strictly increasing",
            ));
        }
        Ok(RenderConfig {
            width,
            height,
            zooms,
            stops,
            max_iterations,
        })
    }

    /// Width of the output grid in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the output grid in pixels.
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Renders the configured view on the calling thread.
pub fn render(config: &RenderConfig) -> PixelGrid {
    let viewport = Viewport::compose(config.width, config.height, &config.zooms);
    let limit = config.max_iterations;

    let mut counts = Vec::with_capacity(config.width * config.height);
    let mut histogram = Histogram::new(limit);
    for (y, x) in iproduct!(0..config.height, 0..config.width) {
        let count = escape_time(viewport.pixel_to_point(x, y), limit);
        histogram.record(count);
        counts.push(count);
    }
    info!(
        "iteration pass done: {} of {} pixels escaped",
        histogram.escaped(),
        counts.len()
    );

    let pixels = assign_colors(&counts, &histogram, &config.stops);
    PixelGrid::from_pixels(config.width, config.height, pixels)
}

/// Renders with the iteration pass spread over the given number of
/// worker threads.  The count grid is split into contiguous row
/// bands, one per worker; each worker tallies a partial histogram
/// over its band, and the partials are merged by element-wise
/// summation once every band is done.  The merge is commutative, so
/// the result is identical to the single-threaded render.
pub fn render_threaded(config: &RenderConfig, threads: usize) -> PixelGrid {
    let threads = threads.max(1);
    let viewport = Viewport::compose(config.width, config.height, &config.zooms);
    let limit = config.max_iterations;
    let width = config.width;

    let rows_per_band = (config.height + threads - 1) / threads;
    let band_len = rows_per_band * width;

    let mut counts = vec![0; width * config.height];
    let histogram = crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<Histogram>> = counts
            .chunks_mut(band_len)
            .enumerate()
            .map(|(band, chunk)| {
                spawner.spawn(move |_| {
                    let mut partial = Histogram::new(limit);
                    for (offset, slot) in chunk.iter_mut().enumerate() {
                        let index = band * band_len + offset;
                        let (x, y) = (index % width, index / width);
                        let count = escape_time(viewport.pixel_to_point(x, y), limit);
                        partial.record(count);
                        *slot = count;
                    }
                    partial
                })
            })
            .collect();

        handles
            .into_iter()
            .fold(Histogram::new(limit), |mut merged, handle| {
                merged.absorb(&handle.join().unwrap());
                merged
            })
    })
    .unwrap();
    info!(
        "iteration pass done on {} threads: {} of {} pixels escaped",
        threads,
        histogram.escaped(),
        counts.len()
    );

    let pixels = assign_colors(&counts, &histogram, &config.stops);
    PixelGrid::from_pixels(config.width, config.height, pixels)
}
