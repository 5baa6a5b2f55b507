//! Perspective warping - rectifying the selection quad
//!
//! Rasterizes an arbitrary quadrilateral region of a source frame into a
//! fixed-size rectangular output by inverse mapping: the homography is
//! solved from the output rectangle onto the source quad, so every output
//! pixel knows exactly which source location it came from. Sampling is
//! nearest-neighbor - radiograph imagery tolerates the minor aliasing, and
//! it keeps the per-pixel cost at a single lookup.

use crate::error::{WarpError, WarpResult};
use crate::homography::Homography;
use panorex_core::{Frame, FrameMut, Point, Quad};

/// Warp the quad region of `frame` into a new `out_w x out_h` frame.
///
/// The output frame keeps the source's channel count. Output pixels whose
/// inverse-mapped source coordinate rounds outside the source bounds are
/// left at the background fill (all-zero bytes: transparent for RGBA,
/// black for RGB). Given identical inputs the output is byte-identical.
///
/// A degenerate quad does not error here - the solver's pivot guard keeps
/// the arithmetic finite and the result is simply a blank or garbled frame
/// (soft failure). Callers that want to catch it early should check
/// [`Quad::is_degenerate`] before warping.
///
/// # Arguments
///
/// * `frame` - Source capture
/// * `quad` - Region to rectify, normalized corners in TL,TR,BR,BL order
/// * `out_w`, `out_h` - Output dimensions in pixels
///
/// # Errors
///
/// Returns [`WarpError::InvalidOutputSize`] if either output dimension is
/// zero.
pub fn rectify_quad(frame: &Frame, quad: &Quad, out_w: u32, out_h: u32) -> WarpResult<Frame> {
    if out_w == 0 || out_h == 0 {
        return Err(WarpError::InvalidOutputSize {
            width: out_w,
            height: out_h,
        });
    }

    // output-space -> source-space correspondence
    let dst_rect = [
        Point::new(0.0, 0.0),
        Point::new(out_w as f32, 0.0),
        Point::new(out_w as f32, out_h as f32),
        Point::new(0.0, out_h as f32),
    ];
    let src_quad = quad.to_pixels(frame.width(), frame.height());
    let h = Homography::from_correspondences(dst_rect, src_quad);

    let channels = frame.channels() as usize;
    let src_w = frame.width() as i64;
    let src_h = frame.height() as i64;
    let src_data = frame.data();
    let src_stride = frame.width() as usize * channels;

    let mut out = FrameMut::new(out_w, out_h, frame.channels())?;
    for dy in 0..out_h {
        let row = out.row_mut(dy);
        for dx in 0..out_w {
            let (sx, sy) = h.apply(dx as f64, dy as f64);
            let (sx, sy) = (sx.round(), sy.round());
            if !sx.is_finite() || !sy.is_finite() {
                continue;
            }
            let (sx, sy) = (sx as i64, sy as i64);
            if sx < 0 || sx >= src_w || sy < 0 || sy >= src_h {
                // out-of-bounds sample: defined no-op, background stays
                continue;
            }
            let src_off = sy as usize * src_stride + sx as usize * channels;
            let dst_off = dx as usize * channels;
            row[dst_off..dst_off + channels]
                .copy_from_slice(&src_data[src_off..src_off + channels]);
        }
    }

    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use panorex_core::FrameMut;

    /// Frame with a deterministic per-pixel pattern for exact comparisons
    fn pattern_frame(w: u32, h: u32, channels: u32) -> Frame {
        let mut fm = FrameMut::new(w, h, channels).unwrap();
        for y in 0..h {
            for x in 0..w {
                let px = fm.pixel_mut(x, y).unwrap();
                px[0] = (x % 251) as u8;
                px[1] = (y % 251) as u8;
                px[2] = ((x + y) % 251) as u8;
                if channels == 4 {
                    px[3] = 255;
                }
            }
        }
        fm.into()
    }

    #[test]
    fn test_full_frame_identity() {
        let frame = pattern_frame(160, 120, 3);
        let out = rectify_quad(&frame, &Quad::full_frame(), 160, 120).unwrap();
        assert_eq!(out.data(), frame.data());
    }

    #[test]
    fn test_output_dimensions_and_channels() {
        let frame = pattern_frame(100, 100, 4);
        let out = rectify_quad(&frame, &Quad::inset(0.1), 64, 32).unwrap();
        assert_eq!(out.width(), 64);
        assert_eq!(out.height(), 32);
        assert_eq!(out.channels(), 4);
    }

    #[test]
    fn test_zero_output_rejected() {
        let frame = pattern_frame(10, 10, 3);
        assert!(matches!(
            rectify_quad(&frame, &Quad::full_frame(), 0, 10),
            Err(WarpError::InvalidOutputSize { .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_background() {
        // quad pinned at the right edge maps some outputs past the source
        let frame = pattern_frame(50, 50, 4);
        let quad = Quad::new([
            Point::new(0.5, 0.0),
            Point::new(1.5, 0.0), // clamps conceptually outside the frame
            Point::new(1.5, 1.0),
            Point::new(0.5, 1.0),
        ]);
        let out = rectify_quad(&frame, &quad, 50, 50).unwrap();
        // right half of the output sampled outside the source: transparent
        assert_eq!(out.pixel(40, 25), Some(&[0u8, 0, 0, 0][..]));
        // left half came from real pixels
        assert_ne!(out.pixel(5, 25), Some(&[0u8, 0, 0, 0][..]));
    }

    #[test]
    fn test_determinism() {
        let frame = pattern_frame(80, 60, 3);
        let quad = Quad::new([
            Point::new(0.1, 0.05),
            Point::new(0.95, 0.15),
            Point::new(0.9, 0.9),
            Point::new(0.05, 0.85),
        ]);
        let a = rectify_quad(&frame, &quad, 120, 90).unwrap();
        let b = rectify_quad(&frame, &quad, 120, 90).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_degenerate_quad_soft_failure() {
        let frame = pattern_frame(40, 40, 3);
        let quad = Quad::new([
            Point::new(0.5, 0.5),
            Point::new(0.5, 0.5),
            Point::new(0.5, 0.5),
            Point::new(0.5, 0.5),
        ]);
        // must not panic; output may be blank or garbled
        let out = rectify_quad(&frame, &quad, 20, 20).unwrap();
        assert_eq!(out.width(), 20);
    }
}
