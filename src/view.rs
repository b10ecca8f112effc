//! Contains the Zoom and Viewport structs, which describe the
//! relationship between the integral plane of the image and the
//! complex plane where the fractal lives.  A view is built as an
//! ordered stack of zooms; folding the stack produces a single
//! Viewport that maps any pixel to its complex coordinate.

use num::Complex;

/// One zoom step: recenter the view on a focus point given in pixel
/// coordinates, then magnify by multiplying the apparent pixel size
/// by `scale`.  Each zoom is interpreted in the frame already
/// established by the zooms before it, so a stack of these reads
/// like a sequence of "click here, magnify" gestures.
#[derive(Copy, Clone, Debug)]
pub struct Zoom {
    /// The pixel the view recenters on.
    pub focus: (f64, f64),
    /// Multiplier applied to the apparent pixel size.  Must be
    /// positive; values below one magnify.
    pub scale: f64,
}

/// The effective view: the single center-and-scale pair left after
/// folding a zoom stack, plus the grid it applies to.  All pixel
/// mapping goes through this one struct, so every pixel sees the
/// same composed view.
#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    width: usize,
    height: usize,
    /// Composed center of the view.
    pub center: (f64, f64),
    /// Composed size of one pixel.
    pub scale: f64,
}

impl Viewport {
    /// Folds an ordered zoom stack into one effective view for a
    /// grid of the given dimensions.  Later zooms are applied in the
    /// coordinate frame produced by earlier ones, so order matters.
    /// An empty stack yields the identity view: centered on the
    /// grid's midpoint at scale 1.
    pub fn compose(width: usize, height: usize, zooms: &[Zoom]) -> Viewport {
        let half_width = width as f64 * 0.5;
        let half_height = height as f64 * 0.5;
        let mut center = (half_width, half_height);
        let mut scale = 1.0;
        for zoom in zooms {
            center.0 += (zoom.focus.0 - half_width) * scale;
            center.1 += (zoom.focus.1 - half_height) * scale;
            scale *= zoom.scale;
        }
        Viewport {
            width,
            height,
            center,
            scale,
        }
    }

    /// Given the column and row of a pixel on the integral plane,
    /// return the complex number at the equivalent location on the
    /// complex plane.
    pub fn pixel_to_point(&self, x: usize, y: usize) -> Complex<f64> {
        Complex::new(
            (x as f64 - self.width as f64 * 0.5) * self.scale + self.center.0,
            (y as f64 - self.height as f64 * 0.5) * self.scale + self.center.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn empty_stack_is_the_identity_view() {
        let view = Viewport::compose(10, 10, &[]);
        assert_eq!(view.center, (5.0, 5.0));
        assert_eq!(view.scale, 1.0);
        assert_eq!(view.pixel_to_point(0, 0), Complex::new(0.0, 0.0));
        assert_eq!(view.pixel_to_point(7, 3), Complex::new(7.0, 3.0));
    }

    #[test]
    fn base_zoom_centers_the_classic_frame() {
        // Focusing on pixel (0,0) at scale 4/width puts the complex
        // origin mid-grid with the real axis spanning four units.
        let base = Zoom {
            focus: (0.0, 0.0),
            scale: 4.0 / 800.0,
        };
        let view = Viewport::compose(800, 600, &[base]);
        assert!(close(view.center.0, 0.0));
        assert!(close(view.center.1, 0.0));
        let left = view.pixel_to_point(0, 300);
        assert!(close(left.re, -2.0));
        assert!(close(left.im, 0.0));
        let middle = view.pixel_to_point(400, 300);
        assert!(close(middle.re, 0.0));
        assert!(close(middle.im, 0.0));
    }

    #[test]
    fn stacked_zooms_compose_in_the_earlier_frame() {
        let zooms = [
            Zoom {
                focus: (0.0, 0.0),
                scale: 4.0 / 800.0,
            },
            Zoom {
                focus: (295.0, 202.0),
                scale: 0.1,
            },
            Zoom {
                focus: (312.0, 304.0),
                scale: 0.1,
            },
        ];
        let view = Viewport::compose(800, 600, &zooms);
        // Folded by hand: the second zoom moves in units of 4/800,
        // the third in units a tenth of that.
        assert!(close(view.center.0, -0.525 + (312.0 - 400.0) * 0.0005));
        assert!(close(view.center.1, -0.49 + (304.0 - 300.0) * 0.0005));
        assert!(close(view.scale, 4.0 / 800.0 * 0.01));
    }

    #[test]
    fn zoom_order_is_significant() {
        let a = Zoom {
            focus: (100.0, 100.0),
            scale: 0.5,
        };
        let b = Zoom {
            focus: (300.0, 150.0),
            scale: 0.25,
        };
        let ab = Viewport::compose(400, 400, &[a, b]);
        let ba = Viewport::compose(400, 400, &[b, a]);
        assert_eq!(ab.scale, ba.scale);
        assert!(!close(ab.center.0, ba.center.0) || !close(ab.center.1, ba.center.1));
    }
}
