//! The escape-time evaluator, the hot loop of the whole renderer.
//! A pure function of its inputs with no shared state, so every
//! pixel can be evaluated on any thread.

use num::Complex;

/// Iterates `z = z * z + c` from zero and returns the number of
/// completed iterations before `|z|` exceeded two, or `limit` if the
/// orbit never escaped.  The test uses the squared magnitude to
/// avoid a square root, and it is strict: an orbit sitting exactly
/// on the circle has not escaped, so `c = 2 + 0i` survives its first
/// step while anything with `|c| > 2` is gone at count zero.
pub fn escape_time(c: Complex<f64>, limit: usize) -> usize {
    let mut z = Complex::new(0.0_f64, 0.0_f64);
    let mut count = 0;
    while count < limit {
        z = z * z + c;
        if z.norm_sqr() > 4.0 {
            break;
        }
        count += 1;
    }
    count
}
