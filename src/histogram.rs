// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Histogram-equalized color assignment.
//!
//! Coloring by raw iteration count wastes most of a gradient: counts
//! cluster heavily at the low end, so nearly every pixel lands in the
//! first sliver of the palette.  This module colors by *rank*
//! instead.  A first pass tallies how many pixels escaped at each
//! iteration count; the second positions each pixel within its
//! gradient segment by the fraction of that segment's pixels that
//! escaped earlier.  Equal amounts of color then cover equal numbers
//! of pixels, whatever shape the count distribution takes.
//!
//! Both passes are pure functions over the finished iteration grid.
//! Nothing here streams or exposes partial results; the histogram is
//! built completely before any color is assigned.

use color::{ColorStop, Rgb};

/// The color for points that never escaped.
const INTERIOR: Rgb = Rgb(0, 0, 0);

/// Frequency table of escape counts: `frequency(n)` is the number of
/// pixels that escaped after exactly `n` completed iterations.
/// Interior pixels, whose count equals the iteration limit, are not
/// recorded.
#[derive(Debug)]
pub struct Histogram {
    freq: Vec<usize>,
}

impl Histogram {
    /// An empty histogram for escape counts in `[0, limit)`.
    pub fn new(limit: usize) -> Histogram {
        Histogram {
            freq: vec![0; limit],
        }
    }

    /// Tallies a whole iteration grid at once.
    pub fn build(counts: &[usize], limit: usize) -> Histogram {
        let mut histogram = Histogram::new(limit);
        for &count in counts {
            histogram.record(count);
        }
        histogram
    }

    /// Tallies one escape count.  Counts at or past the limit belong
    /// to interior pixels and are ignored.
    pub fn record(&mut self, count: usize) {
        if count < self.freq.len() {
            self.freq[count] += 1;
        }
    }

    /// Element-wise merge of another histogram into this one.  The
    /// merge is commutative, so partial histograms built by parallel
    /// workers can be folded in any order.
    pub fn absorb(&mut self, other: &Histogram) {
        for (into, from) in self.freq.iter_mut().zip(&other.freq) {
            *into += from;
        }
    }

    /// The iteration limit this histogram was built for.
    pub fn limit(&self) -> usize {
        self.freq.len()
    }

    /// Pixels recorded with exactly this escape count.
    pub fn frequency(&self, count: usize) -> usize {
        self.freq[count]
    }

    /// Total pixels recorded, which is every pixel that escaped.
    pub fn escaped(&self) -> usize {
        self.freq.iter().sum()
    }
}

/// The gradient segment an escape count belongs to: the first `i`
/// with `stops[i].threshold * limit <= count < stops[i + 1].threshold
/// * limit`.  The comparison happens in floating point, on the same
/// side as the boundary scan in `range_totals`.  The stops must be a
/// well-formed gradient, at least two of them spanning 0.0 to 1.0.
pub fn range_index(count: usize, stops: &[ColorStop], limit: usize) -> usize {
    let position = count as f64;
    let limit = limit as f64;
    for i in 0..stops.len() - 1 {
        if position >= stops[i].threshold * limit && position < stops[i + 1].threshold * limit {
            return i;
        }
    }
    0
}

/// Sums the histogram into one total per gradient segment by walking
/// the iteration axis once, advancing to the next segment as each
/// threshold is passed.
pub fn range_totals(histogram: &Histogram, stops: &[ColorStop]) -> Vec<usize> {
    let limit = histogram.limit() as f64;
    let mut totals = vec![0; stops.len() - 1];
    let mut index = 0;
    for count in 0..histogram.limit() {
        if index + 1 < totals.len() && count as f64 >= stops[index + 1].threshold * limit {
            index += 1;
        }
        totals[index] += histogram.frequency(count);
    }
    totals
}

/// The second pass: maps every escape count in the grid to a color.
///
/// A pixel with count `k` in segment `i` is positioned at `t =
/// (pixels escaping in [segment start, k)) / (pixels in segment i)`
/// and colored by interpolating between the segment's two stops at
/// `t`.  A segment with no pixels at all pins `t` to zero rather
/// than divide by it.  Interior pixels are painted black outright.
///
/// The running sums are taken from one prefix-sum table instead of
/// re-scanning the histogram per pixel; the sums are integers, so
/// the resulting positions are identical either way.
pub fn assign_colors(counts: &[usize], histogram: &Histogram, stops: &[ColorStop]) -> Vec<Rgb> {
    let limit = histogram.limit();
    let totals = range_totals(histogram, stops);

    // cumulative[k] = pixels that escaped before iteration k.
    let mut cumulative = vec![0; limit + 1];
    for count in 0..limit {
        cumulative[count + 1] = cumulative[count] + histogram.frequency(count);
    }

    counts
        .iter()
        .map(|&count| {
            if count >= limit {
                return INTERIOR;
            }
            let index = range_index(count, stops, limit);
            let segment_start = (stops[index].threshold * limit as f64) as usize;
            let escaped_before = cumulative[count] - cumulative[segment_start];
            let t = if totals[index] == 0 {
                0.0
            } else {
                escaped_before as f64 / totals[index] as f64
            };
            stops[index].color + (stops[index + 1].color - stops[index].color) * t
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use color::default_gradient;

    fn two_stop_gray() -> Vec<ColorStop> {
        vec![
            ColorStop::new(0.0, Rgb(0, 0, 0)),
            ColorStop::new(1.0, Rgb(255, 255, 255)),
        ]
    }

    #[test]
    fn interior_counts_are_not_recorded() {
        let histogram = Histogram::build(&[0, 1, 1, 10, 10, 10], 10);
        assert_eq!(histogram.frequency(0), 1);
        assert_eq!(histogram.frequency(1), 2);
        assert_eq!(histogram.escaped(), 3);
    }

    #[test]
    fn absorb_merges_element_wise() {
        let mut left = Histogram::build(&[0, 0, 3], 5);
        let right = Histogram::build(&[0, 3, 4], 5);
        left.absorb(&right);
        assert_eq!(left.frequency(0), 3);
        assert_eq!(left.frequency(3), 2);
        assert_eq!(left.frequency(4), 1);
        assert_eq!(left.escaped(), 6);
    }

    #[test]
    fn totals_cover_every_escaped_pixel() {
        let counts = [0, 1, 2, 250, 299, 300, 450, 700, 999, 1000, 1000];
        let histogram = Histogram::build(&counts, 1000);
        let totals = range_totals(&histogram, &default_gradient());
        assert_eq!(totals.iter().sum::<usize>(), histogram.escaped());
        assert_eq!(totals.len(), 3);
    }

    #[test]
    fn segment_boundaries_agree_with_range_index() {
        let stops = default_gradient();
        let histogram = Histogram::build(&(0..1000).collect::<Vec<_>>(), 1000);
        let totals = range_totals(&histogram, &stops);
        let mut by_index = vec![0; stops.len() - 1];
        for count in 0..1000 {
            by_index[range_index(count, &stops, 1000)] += histogram.frequency(count);
        }
        assert_eq!(totals, by_index);
    }

    #[test]
    fn segment_start_gets_the_stop_color() {
        // Ten counts, split in half; 0.5 * 10 is exact, so count 5
        // opens the second segment with nothing escaped before it.
        let stops = vec![
            ColorStop::new(0.0, Rgb(0, 0, 0)),
            ColorStop::new(0.5, Rgb(255, 0, 0)),
            ColorStop::new(1.0, Rgb(255, 255, 255)),
        ];
        let counts: Vec<usize> = (0..10).collect();
        let histogram = Histogram::build(&counts, 10);
        let colors = assign_colors(&counts, &histogram, &stops);
        assert_eq!(colors[0], Rgb(0, 0, 0));
        assert_eq!(colors[5], Rgb(255, 0, 0));
    }

    #[test]
    fn uniform_histogram_shades_monotonically() {
        let counts: Vec<usize> = (0..64).collect();
        let histogram = Histogram::build(&counts, 64);
        let colors = assign_colors(&counts, &histogram, &two_stop_gray());
        for pair in colors.windows(2) {
            assert!(pair[1].0 >= pair[0].0);
        }
        assert_eq!(colors[0], Rgb(0, 0, 0));
        assert!(colors[63].0 > colors[0].0);
    }

    #[test]
    fn interior_pixels_are_black_regardless_of_gradient() {
        let stops = vec![
            ColorStop::new(0.0, Rgb(200, 200, 200)),
            ColorStop::new(1.0, Rgb(255, 255, 255)),
        ];
        let counts = [4, 4, 4];
        let histogram = Histogram::build(&counts, 4);
        let colors = assign_colors(&counts, &histogram, &stops);
        assert_eq!(colors, vec![INTERIOR; 3]);
    }

    #[test]
    fn empty_segment_resolves_to_its_start_color() {
        // The histogram knows nothing past count 1, so the second
        // segment is empty; a stray count claimed by it must come
        // out as the segment's start color, not a fault.
        let stops = vec![
            ColorStop::new(0.0, Rgb(0, 0, 0)),
            ColorStop::new(0.5, Rgb(255, 0, 0)),
            ColorStop::new(1.0, Rgb(255, 255, 255)),
        ];
        let histogram = Histogram::build(&[0, 0, 1], 10);
        let colors = assign_colors(&[7], &histogram, &stops);
        assert_eq!(colors, vec![Rgb(255, 0, 0)]);
    }
}
