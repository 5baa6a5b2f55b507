//! Luminance sampling - downsampled grayscale grid of a captured frame
//!
//! Boundary detection never scans the full-resolution capture. The frame is
//! first reduced to a small luminance grid at a fixed linear scale, which
//! bounds the cost of the full-grid scan that follows regardless of capture
//! resolution.
//!
//! Luminance is computed per pixel as a fixed-point weighted channel sum,
//! `(77*R + 150*G + 29*B) >> 8`, the integer approximation of the
//! perceptual weights 0.30/0.59/0.11.

use crate::error::{DetectError, DetectResult};
use panorex_core::{Error as CoreError, Frame};

/// Default linear scale factor for the luminance grid
pub const DEFAULT_SCALE: f32 = 0.25;

/// Minimum viable grid side length, in pixels
///
/// Below this there is nothing meaningful to detect and the sampler fails
/// fast ("detection unavailable") instead of scanning a handful of pixels.
pub const MIN_GRID_SIDE: u32 = 4;

/// Fixed-point luminance of one RGB pixel
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32) >> 8) as u8
}

/// A downsampled per-pixel luminance grid
///
/// Flat row-major array of 8-bit luminance values plus the grid dimensions.
/// Pure data; produced once per capture by [`LumaGrid::from_frame`] and
/// consumed read-only by the boundary detector.
#[derive(Debug, Clone)]
pub struct LumaGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl LumaGrid {
    /// Build a luminance grid by nearest-sampling a frame at `scale`.
    ///
    /// # Arguments
    ///
    /// * `frame` - Source capture (RGB or RGBA)
    /// * `scale` - Linear scale factor in `(0, 1]`; [`DEFAULT_SCALE`] is the
    ///   usual choice
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidScale`] for a non-finite or
    /// out-of-range scale, and a [`panorex_core::Error::FrameTooSmall`]
    /// wrapped in [`DetectError::Core`] when the scaled grid would be under
    /// [`MIN_GRID_SIDE`] pixels per side.
    pub fn from_frame(frame: &Frame, scale: f32) -> DetectResult<Self> {
        if !scale.is_finite() || scale <= 0.0 || scale > 1.0 {
            return Err(DetectError::InvalidScale(scale));
        }

        let gw = (frame.width() as f32 * scale) as u32;
        let gh = (frame.height() as f32 * scale) as u32;
        if gw < MIN_GRID_SIDE || gh < MIN_GRID_SIDE {
            return Err(CoreError::FrameTooSmall {
                width: frame.width(),
                height: frame.height(),
                min: (MIN_GRID_SIDE as f32 / scale).ceil() as u32,
            }
            .into());
        }

        let mut data = Vec::with_capacity(gw as usize * gh as usize);
        for gy in 0..gh {
            // nearest source row for this grid row
            let sy = (gy as u64 * frame.height() as u64 / gh as u64) as u32;
            let row = frame.row(sy);
            let ch = frame.channels() as usize;
            for gx in 0..gw {
                let sx = (gx as u64 * frame.width() as u64 / gw as u64) as usize;
                let px = &row[sx * ch..sx * ch + 3];
                data.push(luma(px[0], px[1], px[2]));
            }
        }

        Ok(Self {
            width: gw,
            height: gh,
            data,
        })
    }

    /// Build a grid directly from raw luminance values.
    ///
    /// Mainly useful for synthetic grids in tests and calibration.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are zero or `data.len()` does not
    /// match `width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> DetectResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimension { width, height }.into());
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(CoreError::DataSizeMismatch {
                expected,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Grid width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flat row-major luminance values.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Luminance value at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds.
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Global mean luminance.
    pub fn mean(&self) -> f32 {
        let sum: u64 = self.data.iter().map(|&v| v as u64).sum();
        sum as f32 / self.data.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panorex_core::FrameMut;

    #[test]
    fn test_luma_weights() {
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(0, 0, 0), 0);
        // green dominates
        assert!(luma(0, 255, 0) > luma(255, 0, 0));
        assert!(luma(255, 0, 0) > luma(0, 0, 255));
    }

    #[test]
    fn test_from_frame_dimensions() {
        let frame: Frame = FrameMut::new(100, 80, 3).unwrap().into();
        let grid = LumaGrid::from_frame(&frame, 0.25).unwrap();
        assert_eq!(grid.width(), 25);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.data().len(), 25 * 20);
    }

    #[test]
    fn test_from_frame_too_small() {
        let frame: Frame = FrameMut::new(8, 8, 3).unwrap().into();
        let err = LumaGrid::from_frame(&frame, 0.25).unwrap_err();
        assert!(matches!(
            err,
            DetectError::Core(panorex_core::Error::FrameTooSmall { .. })
        ));
    }

    #[test]
    fn test_invalid_scale() {
        let frame: Frame = FrameMut::new(100, 100, 3).unwrap().into();
        assert!(matches!(
            LumaGrid::from_frame(&frame, 0.0),
            Err(DetectError::InvalidScale(_))
        ));
        assert!(matches!(
            LumaGrid::from_frame(&frame, 1.5),
            Err(DetectError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_uniform_mean() {
        let grid = LumaGrid::from_raw(10, 10, vec![42u8; 100]).unwrap();
        assert!((grid.mean() - 42.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rgba_frame_ignores_alpha() {
        let mut fm = FrameMut::new(16, 16, 4).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                fm.set_pixel(x, y, &[200, 200, 200, 7]).unwrap();
            }
        }
        let grid = LumaGrid::from_frame(&fm.into(), 0.25).unwrap();
        assert_eq!(grid.at(0, 0), luma(200, 200, 200));
    }
}
