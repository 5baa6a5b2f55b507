//! Boundary detection - locating the radiograph inside a captured frame
//!
//! A radiograph photographed off a monitor is either a bright region on a
//! dark surround (lightbox, dark room) or a dark region on a bright surround
//! (viewer app with a light page). The detector therefore evaluates both
//! polarity hypotheses against the global mean luminance, takes the tight
//! bounding box of each, scores both, and keeps the better one.
//!
//! Detection is a best-effort convenience: the result only seeds the
//! interactive editor and is never a final answer, so this module is total.
//! When nothing plausible is found it returns a hard-coded centered
//! fallback quad instead of an error.

use crate::luminance::{DEFAULT_SCALE, LumaGrid};
use panorex_core::{Frame, Point, Quad};

/// Which side of the mean luminance counts as foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Target brighter than its surround (luminance above `mean + margin`)
    Light,
    /// Target darker than its surround (luminance below `mean - margin`)
    Dark,
}

/// Tunable detector thresholds
///
/// The defaults are calibrated for 8-bit luminance grids of a few thousand
/// pixels, which is what [`LumaGrid::from_frame`] produces at the default
/// scale.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Margin around the mean separating foreground from background (8-bit)
    pub luma_margin: f32,
    /// Minimum foreground pixel count as a fraction of grid area
    pub min_foreground_frac: f32,
    /// Absolute floor for the foreground count on small grids
    pub min_foreground_floor: usize,
    /// Minimum bounding-box area as a fraction of grid area
    pub min_area_frac: f32,
    /// Maximum bounding-box area as a fraction of grid area
    ///
    /// A box covering essentially the whole grid means no boundary was
    /// actually found.
    pub max_area_frac: f32,
    /// Score multiplier for landscape (wider than tall) boxes
    ///
    /// Panoramic radiographs are always wider than tall.
    pub landscape_bonus: f32,
    /// Symmetric padding added around the winning box, as a fraction of
    /// the grid dimensions
    pub padding_frac: f32,
    /// Per-side inset of the fallback quad when both hypotheses fail
    pub fallback_inset: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            luma_margin: 30.0,
            min_foreground_frac: 0.01,
            min_foreground_floor: 16,
            min_area_frac: 0.03,
            max_area_frac: 0.96,
            landscape_bonus: 1.5,
            padding_frac: 0.02,
            fallback_inset: 0.05,
        }
    }
}

impl DetectorConfig {
    /// Minimum foreground pixel count for a grid of `area` pixels
    fn min_foreground(&self, area: usize) -> usize {
        ((area as f32 * self.min_foreground_frac) as usize).max(self.min_foreground_floor)
    }
}

/// Inclusive bounding box in grid coordinates, plus foreground statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Leftmost foreground column
    pub min_x: u32,
    /// Topmost foreground row
    pub min_y: u32,
    /// Rightmost foreground column (inclusive)
    pub max_x: u32,
    /// Bottommost foreground row (inclusive)
    pub max_y: u32,
    /// Number of foreground pixels inside the grid
    pub foreground_px: usize,
}

impl Candidate {
    /// Box width in grid pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Box height in grid pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Box area as a fraction of the grid area
    pub fn area_frac(&self, grid: &LumaGrid) -> f32 {
        let box_area = self.width() as u64 * self.height() as u64;
        let grid_area = grid.width() as u64 * grid.height() as u64;
        box_area as f32 / grid_area as f32
    }
}

/// Result of a boundary detection pass
///
/// Always carries a usable quad. `polarity` is `None` and `confidence` zero
/// when the hard-coded fallback was used, so callers can distinguish "seeded
/// from detection" from "seeded from the default" without the detector ever
/// failing.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Detected (or fallback) region, normalized, corners in TL,TR,BR,BL order
    pub quad: Quad,
    /// Score of the winning hypothesis; 0 for the fallback
    pub confidence: f32,
    /// Winning polarity; `None` for the fallback
    pub polarity: Option<Polarity>,
    /// Foreground pixel count of the winning hypothesis
    pub foreground_px: usize,
    /// Bounding-box area fraction of the winning hypothesis
    pub area_frac: f32,
}

impl Detection {
    /// The fallback detection: a centered quad inset on every side
    pub fn fallback(config: &DetectorConfig) -> Self {
        Self {
            quad: Quad::inset(config.fallback_inset),
            confidence: 0.0,
            polarity: None,
            foreground_px: 0,
            area_frac: 0.0,
        }
    }

    /// Whether this detection came from the fallback path
    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.polarity.is_none()
    }
}

/// Threshold the grid under one polarity hypothesis and take the tight
/// bounding box of all foreground pixels.
///
/// Returns `None` when no pixel clears the threshold.
pub fn threshold_bbox(grid: &LumaGrid, polarity: Polarity, margin: f32) -> Option<Candidate> {
    let mean = grid.mean();
    let mut cand: Option<Candidate> = None;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let v = grid.at(x, y) as f32;
            let foreground = match polarity {
                Polarity::Light => v > mean + margin,
                Polarity::Dark => v < mean - margin,
            };
            if !foreground {
                continue;
            }
            match &mut cand {
                None => {
                    cand = Some(Candidate {
                        min_x: x,
                        min_y: y,
                        max_x: x,
                        max_y: y,
                        foreground_px: 1,
                    });
                }
                Some(c) => {
                    c.min_x = c.min_x.min(x);
                    c.min_y = c.min_y.min(y);
                    c.max_x = c.max_x.max(x);
                    c.max_y = c.max_y.max(y);
                    c.foreground_px += 1;
                }
            }
        }
    }

    cand
}

/// Score a candidate box; zero means reject.
///
/// A candidate is rejected outright when its foreground count is below the
/// configured minimum (noise-only frames) or its area fraction falls outside
/// the accepted window (nothing found, or the whole frame is foreground and
/// there is no boundary to correct). Survivors score
/// `area_frac * aspect bonus`, rewarding landscape boxes.
pub fn score(candidate: &Candidate, grid: &LumaGrid, config: &DetectorConfig) -> f32 {
    let grid_area = grid.width() as usize * grid.height() as usize;
    if candidate.foreground_px < config.min_foreground(grid_area) {
        return 0.0;
    }
    let area_frac = candidate.area_frac(grid);
    if area_frac < config.min_area_frac || area_frac > config.max_area_frac {
        return 0.0;
    }
    let bonus = if candidate.width() > candidate.height() {
        config.landscape_bonus
    } else {
        1.0
    };
    area_frac * bonus
}

/// Convert a winning candidate into a padded, clamped, normalized quad.
fn candidate_to_quad(candidate: &Candidate, grid: &LumaGrid, config: &DetectorConfig) -> Quad {
    let (gw, gh) = (grid.width() as f32, grid.height() as f32);
    let pad_x = config.padding_frac;
    let pad_y = config.padding_frac;

    // inclusive bbox: the right/bottom edges sit past the last pixel
    let left = (candidate.min_x as f32 / gw - pad_x).clamp(0.0, 1.0);
    let top = (candidate.min_y as f32 / gh - pad_y).clamp(0.0, 1.0);
    let right = ((candidate.max_x + 1) as f32 / gw + pad_x).clamp(0.0, 1.0);
    let bottom = ((candidate.max_y + 1) as f32 / gh + pad_y).clamp(0.0, 1.0);

    Quad::new([
        Point::new(left, top),
        Point::new(right, top),
        Point::new(right, bottom),
        Point::new(left, bottom),
    ])
}

/// Detect the radiograph boundary in a luminance grid.
///
/// Evaluates the light-target and dark-target hypotheses, scores both via
/// [`score`], and returns the better one as a padded normalized quad. When
/// both score zero the hard-coded fallback quad is returned; this function
/// never fails.
pub fn detect_boundary(grid: &LumaGrid, config: &DetectorConfig) -> Detection {
    let mut best: Option<(Candidate, Polarity, f32)> = None;

    for polarity in [Polarity::Light, Polarity::Dark] {
        let Some(candidate) = threshold_bbox(grid, polarity, config.luma_margin) else {
            continue;
        };
        let s = score(&candidate, grid, config);
        if s <= 0.0 {
            continue;
        }
        let better = match &best {
            Some((_, _, best_s)) => s > *best_s,
            None => true,
        };
        if better {
            best = Some((candidate, polarity, s));
        }
    }

    match best {
        Some((candidate, polarity, s)) => Detection {
            quad: candidate_to_quad(&candidate, grid, config),
            confidence: s,
            polarity: Some(polarity),
            foreground_px: candidate.foreground_px,
            area_frac: candidate.area_frac(grid),
        },
        None => Detection::fallback(config),
    }
}

/// Detect the radiograph boundary directly from a captured frame.
///
/// Convenience over [`LumaGrid::from_frame`] at the default scale followed
/// by [`detect_boundary`]. A frame too small to sample yields the fallback
/// detection; detection is never an error to the caller.
pub fn detect_quad(frame: &Frame, config: &DetectorConfig) -> Detection {
    match LumaGrid::from_frame(frame, DEFAULT_SCALE) {
        Ok(grid) => detect_boundary(&grid, config),
        Err(_) => Detection::fallback(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Uniform dark grid with a bright axis-aligned rectangle
    fn bright_rect_grid(
        w: u32,
        h: u32,
        x0: u32,
        y0: u32,
        x1: u32,
        y1: u32,
    ) -> LumaGrid {
        let mut data = vec![20u8; (w * h) as usize];
        for y in y0..y1 {
            for x in x0..x1 {
                data[(y * w + x) as usize] = 230;
            }
        }
        LumaGrid::from_raw(w, h, data).unwrap()
    }

    #[test]
    fn test_threshold_bbox_light() {
        let grid = bright_rect_grid(100, 100, 10, 20, 90, 80);
        let c = threshold_bbox(&grid, Polarity::Light, 30.0).unwrap();
        assert_eq!((c.min_x, c.min_y, c.max_x, c.max_y), (10, 20, 89, 79));
        assert_eq!(c.foreground_px, 80 * 60);
    }

    #[test]
    fn test_threshold_bbox_none_on_flat_grid() {
        let grid = LumaGrid::from_raw(10, 10, vec![128u8; 100]).unwrap();
        assert!(threshold_bbox(&grid, Polarity::Light, 30.0).is_none());
        assert!(threshold_bbox(&grid, Polarity::Dark, 30.0).is_none());
    }

    #[test]
    fn test_score_rejects_tiny_foreground() {
        // 50 foreground pixels in a 10_000-pixel grid is noise
        let grid = bright_rect_grid(100, 100, 40, 40, 50, 45);
        let c = Candidate {
            min_x: 40,
            min_y: 40,
            max_x: 49,
            max_y: 44,
            foreground_px: 50,
        };
        assert_eq!(score(&c, &grid, &DetectorConfig::default()), 0.0);
    }

    #[test]
    fn test_score_rejects_full_frame_box() {
        let grid = bright_rect_grid(100, 100, 0, 0, 100, 100);
        let c = threshold_bbox(&grid, Polarity::Dark, 30.0);
        // all-bright grid: mean is high, dark hypothesis finds nothing
        assert!(c.is_none());
    }

    #[test]
    fn test_landscape_bonus() {
        let config = DetectorConfig::default();
        let landscape_grid = bright_rect_grid(100, 100, 10, 30, 70, 50);
        let portrait_grid = bright_rect_grid(100, 100, 30, 10, 50, 70);
        let lc = threshold_bbox(&landscape_grid, Polarity::Light, config.luma_margin).unwrap();
        let pc = threshold_bbox(&portrait_grid, Polarity::Light, config.luma_margin).unwrap();
        let ls = score(&lc, &landscape_grid, &config);
        let ps = score(&pc, &portrait_grid, &config);
        assert!(ls >= 1.5 * ps, "landscape {ls} vs portrait {ps}");
    }

    #[test]
    fn test_detect_boundary_tightness() {
        // bright rectangle rows 20..80, cols 10..90 on a dark surround
        let grid = bright_rect_grid(100, 100, 10, 20, 90, 80);
        let config = DetectorConfig {
            padding_frac: 0.0,
            ..DetectorConfig::default()
        };
        let det = detect_boundary(&grid, &config);
        assert_eq!(det.polarity, Some(Polarity::Light));
        let tl = det.quad.corner(panorex_core::Corner::TopLeft);
        let br = det.quad.corner(panorex_core::Corner::BottomRight);
        assert!((tl.x - 0.10).abs() <= 0.03, "left {}", tl.x);
        assert!((tl.y - 0.20).abs() <= 0.03, "top {}", tl.y);
        assert!((br.x - 0.90).abs() <= 0.03, "right {}", br.x);
        assert!((br.y - 0.80).abs() <= 0.03, "bottom {}", br.y);
    }

    #[test]
    fn test_detect_boundary_fallback() {
        // sub-threshold foreground: 50 px in a 10_000 px grid
        let grid = bright_rect_grid(100, 100, 40, 40, 50, 45);
        let det = detect_boundary(&grid, &DetectorConfig::default());
        assert!(det.is_fallback());
        assert_eq!(det.confidence, 0.0);
        assert_eq!(det.quad, Quad::inset(0.05));
    }

    #[test]
    fn test_dark_target_hypothesis() {
        let mut data = vec![230u8; 100 * 100];
        for y in 30..70 {
            for x in 15..85 {
                data[y * 100 + x] = 25;
            }
        }
        let grid = LumaGrid::from_raw(100, 100, data).unwrap();
        let det = detect_boundary(&grid, &DetectorConfig::default());
        assert_eq!(det.polarity, Some(Polarity::Dark));
        assert!(!det.is_fallback());
    }

    #[test]
    fn test_padding_expands_box() {
        let grid = bright_rect_grid(100, 100, 10, 20, 90, 80);
        let config = DetectorConfig::default();
        let det = detect_boundary(&grid, &config);
        let tl = det.quad.corner(panorex_core::Corner::TopLeft);
        assert!((tl.x - 0.08).abs() < 1e-5);
        assert!((tl.y - 0.18).abs() < 1e-5);
    }
}
