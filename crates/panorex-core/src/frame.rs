//! Frame - The captured image container
//!
//! A `Frame` is an interleaved RGB or RGBA byte buffer with known
//! dimensions, as handed over by a capture device. Rows are stored
//! top-to-bottom, pixels left-to-right, channels in R,G,B[,A] order.
//!
//! # Ownership model
//!
//! `Frame` uses `Arc` for efficient cloning (shared ownership). Pipeline
//! stages never mutate a frame in place; every transform allocates a new
//! buffer. To fill pixel data during construction, convert to [`FrameMut`]
//! via [`Frame::try_into_mut`] or [`Frame::to_mut`], then convert back with
//! `Into<Frame>`.

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal frame data
#[derive(Debug)]
struct FrameData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel (3 for RGB, 4 for RGBA)
    channels: u32,
    /// Interleaved pixel bytes, row-major
    data: Vec<u8>,
}

/// Immutable image frame with shared ownership
///
/// # Examples
///
/// ```
/// use panorex_core::Frame;
///
/// let frame = Frame::new(640, 480, 3).unwrap();
/// assert_eq!(frame.width(), 640);
/// assert_eq!(frame.height(), 480);
/// assert_eq!(frame.data().len(), 640 * 480 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct Frame {
    inner: Arc<FrameData>,
}

impl Frame {
    /// Create a new zero-initialized frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, and
    /// [`Error::InvalidChannels`] unless `channels` is 3 or 4.
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        Self::validate(width, height, channels)?;
        let data = vec![0u8; width as usize * height as usize * channels as usize];
        Ok(Self {
            inner: Arc::new(FrameData {
                width,
                height,
                channels,
                data,
            }),
        })
    }

    /// Create a frame from raw interleaved bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataSizeMismatch`] if `data.len()` does not equal
    /// `width * height * channels`, plus the validation errors of
    /// [`Frame::new`].
    pub fn from_raw(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        Self::validate(width, height, channels)?;
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            inner: Arc::new(FrameData {
                width,
                height,
                channels,
                data,
            }),
        })
    }

    fn validate(width: u32, height: u32, channels: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if channels != 3 && channels != 4 {
            return Err(Error::InvalidChannels(channels));
        }
        Ok(())
    }

    /// Get the frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the samples per pixel (3 for RGB, 4 for RGBA).
    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.channels
    }

    /// Get raw access to the interleaved pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the byte offset of pixel (x, y), without bounds checking.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.inner.width as usize + x as usize) * self.inner.channels as usize
    }

    /// Get the channel bytes of the pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        let off = self.offset(x, y);
        Some(&self.inner.data[off..off + self.inner.channels as usize])
    }

    /// Get the bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.inner.width as usize * self.inner.channels as usize;
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Get the number of strong references to this frame.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Convert into a mutable frame without copying.
    ///
    /// Succeeds only when this is the sole reference; otherwise the frame
    /// is returned unchanged in the `Err` variant.
    pub fn try_into_mut(self) -> std::result::Result<FrameMut, Frame> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(FrameMut { data }),
            Err(inner) => Err(Frame { inner }),
        }
    }

    /// Get a mutable copy of this frame (copies pixel data if shared).
    pub fn to_mut(&self) -> FrameMut {
        FrameMut {
            data: FrameData {
                width: self.inner.width,
                height: self.inner.height,
                channels: self.inner.channels,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable image frame with exclusive ownership
///
/// Produced by [`Frame::try_into_mut`] / [`Frame::to_mut`] or
/// [`FrameMut::new`]; converted back to an immutable [`Frame`] via `Into`.
#[derive(Debug)]
pub struct FrameMut {
    data: FrameData,
}

impl FrameMut {
    /// Create a new zero-initialized mutable frame.
    ///
    /// # Errors
    ///
    /// Same validation as [`Frame::new`].
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        Frame::validate(width, height, channels)?;
        let data = vec![0u8; width as usize * height as usize * channels as usize];
        Ok(Self {
            data: FrameData {
                width,
                height,
                channels,
                data,
            },
        })
    }

    /// Get the frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.data.width
    }

    /// Get the frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.data.height
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.data.channels
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.data.width as usize + x as usize) * self.data.channels as usize
    }

    /// Get the channel bytes of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.data.width || y >= self.data.height {
            return None;
        }
        let off = self.offset(x, y);
        Some(&self.data.data[off..off + self.data.channels as usize])
    }

    /// Get mutable access to the channel bytes of the pixel at (x, y).
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.data.width || y >= self.data.height {
            return None;
        }
        let off = self.offset(x, y);
        let ch = self.data.channels as usize;
        Some(&mut self.data.data[off..off + ch])
    }

    /// Set the channel bytes of the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] for out-of-range coordinates and
    /// [`Error::DataSizeMismatch`] if `value.len()` differs from the
    /// channel count.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: &[u8]) -> Result<()> {
        if value.len() != self.data.channels as usize {
            return Err(Error::DataSizeMismatch {
                expected: self.data.channels as usize,
                actual: value.len(),
            });
        }
        let (w, h) = (self.data.width, self.data.height);
        match self.pixel_mut(x, y) {
            Some(px) => {
                px.copy_from_slice(value);
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds {
                index: (y as usize * w as usize + x as usize),
                len: w as usize * h as usize,
            }),
        }
    }

    /// Get mutable access to the bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.data.width as usize * self.data.channels as usize;
        let start = y as usize * stride;
        &mut self.data.data[start..start + stride]
    }

    /// Get raw mutable access to the interleaved pixel bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data.data
    }
}

impl From<FrameMut> for Frame {
    fn from(fm: FrameMut) -> Self {
        Frame {
            inner: Arc::new(fm.data),
        }
    }
}
