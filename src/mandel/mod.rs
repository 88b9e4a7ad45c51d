//! Mandelbrot iteration counts over a square window of the complex plane.
//!
//! Every pixel is independent, so the rows fan out as parallel tasks with no
//! shared mutable state. Display, file and histogram outputs live outside
//! this crate; the kernel only produces the raw counts.

use rayon::prelude::*;

/// The window of the complex plane to examine and its pixel resolution.
///
/// The window is a square of extent `2 * size` by `2 * size` centered at
/// `(center_real, center_imag)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct View {
    pub center_real: f64,
    pub center_imag: f64,
    pub size: f64,
    pub width: usize,
    pub height: usize,
}

impl Default for View {
    /// The full classic view: a 4 by 4 square around the origin, 800x800
    /// pixels.
    fn default() -> Self {
        Self {
            center_real: 0.0,
            center_imag: 0.0,
            size: 2.0,
            width: 800,
            height: 800,
        }
    }
}

/// Iterations of `z = z^2 + c` until `|z|^2` reaches 4, capped at `max_iter`.
///
/// At least one iteration is always performed, so the result is in
/// `1..=max_iter.max(1)`.
pub fn escape_time(c_real: f64, c_imag: f64, max_iter: u32) -> u32 {
    let mut z_real = 0.0f64;
    let mut z_imag = 0.0f64;
    let mut k = 0u32;
    loop {
        let t = z_real * z_real - z_imag * z_imag + c_real;
        z_imag = 2.0 * z_real * z_imag + c_imag;
        z_real = t;
        k += 1;
        if z_real * z_real + z_imag * z_imag >= 4.0 || k >= max_iter {
            return k;
        }
    }
}

/// Renders the view into row-major iteration counts, one parallel task per
/// row.
pub fn render(view: &View, max_iter: u32) -> Vec<u32> {
    let mut out = vec![0u32; view.width * view.height];
    out.par_chunks_mut(view.width.max(1))
        .enumerate()
        .for_each(|(row, out_row)| render_row(view, max_iter, row, out_row));
    out
}

/// Sequential twin of [`render`].
pub fn render_seq(view: &View, max_iter: u32) -> Vec<u32> {
    let mut out = vec![0u32; view.width * view.height];
    for (row, out_row) in out.chunks_mut(view.width.max(1)).enumerate() {
        render_row(view, max_iter, row, out_row);
    }
    out
}

fn render_row(view: &View, max_iter: u32, row: usize, out_row: &mut [u32]) {
    let scale_real = 2.0 * view.size / view.width as f64;
    let scale_imag = 2.0 * view.size / view.height as f64;
    let real_min = view.center_real - view.size;
    let imag_min = view.center_imag - view.size;

    // height - 1 - row, so larger imaginary parts end up at the top.
    let c_imag = imag_min + (view.height - 1 - row) as f64 * scale_imag;
    for (col, px) in out_row.iter_mut().enumerate() {
        let c_real = real_min + col as f64 * scale_real;
        *px = escape_time(c_real, c_imag, max_iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        assert_eq!(escape_time(0.0, 0.0, 1000), 1000);
    }

    #[test]
    fn far_exterior_escapes_immediately() {
        assert_eq!(escape_time(2.0, 2.0, 1000), 1);
    }

    #[test]
    fn parallel_matches_sequential() {
        let view = View {
            width: 32,
            height: 24,
            ..View::default()
        };
        assert_eq!(render(&view, 64), render_seq(&view, 64));
    }

    #[test]
    fn dimensions_and_orientation() {
        let view = View {
            width: 16,
            height: 16,
            ..View::default()
        };
        let counts = render_seq(&view, 32);
        assert_eq!(counts.len(), 16 * 16);

        // Row 0 holds the top of the window, i.e. the largest imaginary part.
        let scale = 2.0 * view.size / 16.0;
        let top_imag = view.center_imag - view.size + 15.0 * scale;
        let expected = escape_time(view.center_real - view.size, top_imag, 32);
        assert_eq!(counts[0], expected);
    }

    #[test]
    fn empty_view_renders_nothing() {
        let view = View {
            width: 0,
            height: 0,
            ..View::default()
        };
        assert!(render(&view, 16).is_empty());
    }
}
