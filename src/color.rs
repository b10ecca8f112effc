//! Eight-bit RGB color with the channel arithmetic the gradient
//! interpolation is built on, and the ColorStop type describing one
//! boundary of a piecewise gradient.

use std::ops::{Add, Mul, Sub};

/// A single color as three 8-bit channels, red, green, blue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Channel sums wrap modulo 256.
impl Add for Rgb {
    type Output = Rgb;

    fn add(self, other: Rgb) -> Rgb {
        Rgb(
            self.0.wrapping_add(other.0),
            self.1.wrapping_add(other.1),
            self.2.wrapping_add(other.2),
        )
    }
}

/// Channel differences wrap modulo 256, so subtracting a brighter
/// color from a darker one is well-defined.
impl Sub for Rgb {
    type Output = Rgb;

    fn sub(self, other: Rgb) -> Rgb {
        Rgb(
            self.0.wrapping_sub(other.0),
            self.1.wrapping_sub(other.1),
            self.2.wrapping_sub(other.2),
        )
    }
}

/// Scales each channel in floating point, then truncates through a
/// wider integer and keeps the low eight bits.  Modulo 256, never
/// clamped.
impl Mul<f64> for Rgb {
    type Output = Rgb;

    fn mul(self, factor: f64) -> Rgb {
        Rgb(
            scale_channel(self.0, factor),
            scale_channel(self.1, factor),
            scale_channel(self.2, factor),
        )
    }
}

fn scale_channel(channel: u8, factor: f64) -> u8 {
    (f64::from(channel) * factor) as i64 as u8
}

/// One boundary of a piecewise gradient: the fraction of the
/// iteration axis where this segment begins, and the color at that
/// boundary.  A gradient is an ordered list of these, thresholds
/// strictly increasing from 0.0 to 1.0.
#[derive(Copy, Clone, Debug)]
pub struct ColorStop {
    /// Position of this stop on the normalized iteration axis, in [0, 1].
    pub threshold: f64,
    /// Color at this position.
    pub color: Rgb,
}

impl ColorStop {
    /// Constructor, for when the struct literal is too noisy.
    pub fn new(threshold: f64, color: Rgb) -> ColorStop {
        ColorStop { threshold, color }
    }
}

/// The stock gradient: black through red and yellow to white, with
/// the warm segments front-loaded where escape velocities crowd.
pub fn default_gradient() -> Vec<ColorStop> {
    vec![
        ColorStop::new(0.0, Rgb(0, 0, 0)),
        ColorStop::new(0.3, Rgb(255, 0, 0)),
        ColorStop::new(0.5, Rgb(255, 255, 0)),
        ColorStop::new(1.0, Rgb(255, 255, 255)),
    ]
}
