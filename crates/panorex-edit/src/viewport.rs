//! Viewport - mapping between display and normalized image coordinates
//!
//! The capture is rendered inside a display surface that rarely shares its
//! aspect ratio, so aspect-preserving scaling introduces letterbox or
//! pillarbox bars. Pointer events arrive in display pixels; the selection
//! quad lives in normalized image coordinates. [`Viewport`] is the bridge:
//! the largest centered rectangle inside the container that preserves the
//! image's aspect ratio, with transforms in both directions.

use panorex_core::Point;

/// The rendered image rectangle inside a display surface, in display pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Left edge of the rendered image
    pub x: f32,
    /// Top edge of the rendered image
    pub y: f32,
    /// Rendered image width
    pub width: f32,
    /// Rendered image height
    pub height: f32,
}

impl Viewport {
    /// Compute the largest centered aspect-preserving rectangle.
    ///
    /// # Arguments
    ///
    /// * `container_w`, `container_h` - Display surface size in pixels
    /// * `image_w`, `image_h` - Native image size in pixels
    ///
    /// A wider-than-container image gets letterbox bars (top/bottom), a
    /// taller one gets pillarbox bars (left/right). Degenerate inputs
    /// (any dimension ≤ 0) produce an empty viewport centered at the
    /// origin; its `to_image` still clamps into `[0,1]²`.
    pub fn fit(container_w: f32, container_h: f32, image_w: f32, image_h: f32) -> Self {
        if container_w <= 0.0 || container_h <= 0.0 || image_w <= 0.0 || image_h <= 0.0 {
            return Self::default();
        }

        let scale = (container_w / image_w).min(container_h / image_h);
        let width = image_w * scale;
        let height = image_h * scale;
        Self {
            x: (container_w - width) / 2.0,
            y: (container_h - height) / 2.0,
            width,
            height,
        }
    }

    /// Map a normalized image point to display coordinates.
    pub fn to_screen(&self, p: Point) -> (f32, f32) {
        (self.x + p.x * self.width, self.y + p.y * self.height)
    }

    /// Map display coordinates to a normalized image point.
    ///
    /// Positions over the letterbox/pillarbox bars (or outside the surface
    /// entirely) clamp onto the nearest image edge, so a drag that leaves
    /// the rendered image keeps the corner pinned at the boundary.
    pub fn to_image(&self, screen_x: f32, screen_y: f32) -> Point {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Point::new(0.0, 0.0);
        }
        Point::new(
            (screen_x - self.x) / self.width,
            (screen_y - self.y) / self.height,
        )
        .clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_letterbox() {
        // wide image in a square container: bars top and bottom
        let vp = Viewport::fit(100.0, 100.0, 200.0, 100.0);
        assert_eq!(vp.width, 100.0);
        assert_eq!(vp.height, 50.0);
        assert_eq!(vp.x, 0.0);
        assert_eq!(vp.y, 25.0);
    }

    #[test]
    fn test_fit_pillarbox() {
        // tall image in a square container: bars left and right
        let vp = Viewport::fit(100.0, 100.0, 50.0, 100.0);
        assert_eq!(vp.width, 50.0);
        assert_eq!(vp.height, 100.0);
        assert_eq!(vp.x, 25.0);
        assert_eq!(vp.y, 0.0);
    }

    #[test]
    fn test_fit_exact_aspect() {
        let vp = Viewport::fit(1280.0, 720.0, 1280.0, 720.0);
        assert_eq!(vp, Viewport {
            x: 0.0,
            y: 0.0,
            width: 1280.0,
            height: 720.0
        });
    }

    #[test]
    fn test_round_trip() {
        let vp = Viewport::fit(800.0, 600.0, 1280.0, 720.0);
        let p = Point::new(0.25, 0.75);
        let (sx, sy) = vp.to_screen(p);
        let back = vp.to_image(sx, sy);
        assert!((back.x - p.x).abs() < 1e-5);
        assert!((back.y - p.y).abs() < 1e-5);
    }

    #[test]
    fn test_to_image_clamps_over_bars() {
        let vp = Viewport::fit(100.0, 100.0, 200.0, 100.0);
        // over the top letterbox bar
        let p = vp.to_image(50.0, 5.0);
        assert_eq!(p.y, 0.0);
        // past the right edge of the surface
        let p = vp.to_image(500.0, 50.0);
        assert_eq!(p.x, 1.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let vp = Viewport::fit(0.0, 100.0, 200.0, 100.0);
        assert_eq!(vp, Viewport::default());
        assert_eq!(vp.to_image(10.0, 10.0), Point::new(0.0, 0.0));
    }
}
