//! Point, Corner, Quad - Normalized selection geometry
//!
//! The user's region of interest is an ordered four-corner polygon in
//! normalized image coordinates. Corner order carries positional meaning
//! (top-left, top-right, bottom-right, bottom-left) and is never permuted:
//! both the homography correspondence and any on-screen rendering of the
//! selection depend on which corner is which, not on where it currently sits.

/// A 2D point with floating-point coordinates
///
/// Coordinates are normalized to `[0,1]` relative to an image's width and
/// height, except where a function explicitly documents pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates into `[0,1]`
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

/// One of the four corners of a [`Quad`], in fixed semantic order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Corner {
    /// Top-left corner (index 0)
    TopLeft = 0,
    /// Top-right corner (index 1)
    TopRight = 1,
    /// Bottom-right corner (index 2)
    BottomRight = 2,
    /// Bottom-left corner (index 3)
    BottomLeft = 3,
}

impl Corner {
    /// All corners in storage order (TL, TR, BR, BL)
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// Get the storage index of this corner
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Create a corner from a storage index
    ///
    /// Returns `None` if `index >= 4`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// An ordered four-corner polygon in normalized image coordinates
///
/// Corner order is always `(TopLeft, TopRight, BottomRight, BottomLeft)`.
/// A quad is not required to be convex; the homography solver tolerates any
/// four non-collinear points. Degeneracy (collinear or coincident corners)
/// is advisory via [`Quad::is_degenerate`], never enforced here.
///
/// # Examples
///
/// ```
/// use panorex_core::{Corner, Point, Quad};
///
/// let mut quad = Quad::full_frame();
/// quad.set_corner(Corner::TopLeft, Point::new(0.1, 0.2));
/// assert_eq!(quad.corner(Corner::TopLeft), Point::new(0.1, 0.2));
/// assert_eq!(quad.corner(Corner::TopRight), Point::new(1.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    corners: [Point; 4],
}

impl Default for Quad {
    fn default() -> Self {
        Self::full_frame()
    }
}

impl Quad {
    /// Create a quad from four corners in TL, TR, BR, BL order
    pub fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// The quad covering the entire frame: `[(0,0),(1,0),(1,1),(0,1)]`
    pub fn full_frame() -> Self {
        Self {
            corners: [
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
        }
    }

    /// An axis-aligned quad inset symmetrically from the full frame
    ///
    /// `margin` is the normalized inset applied on every side, clamped so
    /// that the quad keeps positive extent.
    pub fn inset(margin: f32) -> Self {
        let m = margin.clamp(0.0, 0.49);
        Self {
            corners: [
                Point::new(m, m),
                Point::new(1.0 - m, m),
                Point::new(1.0 - m, 1.0 - m),
                Point::new(m, 1.0 - m),
            ],
        }
    }

    /// Get all four corners in TL, TR, BR, BL order
    #[inline]
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// Get a single corner
    #[inline]
    pub fn corner(&self, corner: Corner) -> Point {
        self.corners[corner.index()]
    }

    /// Replace a single corner, clamping it into `[0,1]²`
    ///
    /// The other three corners are untouched; there is no coupling between
    /// corners, so arbitrary (possibly non-convex) shapes are reachable.
    pub fn set_corner(&mut self, corner: Corner, point: Point) {
        self.corners[corner.index()] = point.clamped();
    }

    /// Clamp all corners into `[0,1]²`
    pub fn clamp(&mut self) {
        for p in &mut self.corners {
            *p = p.clamped();
        }
    }

    /// Signed area of the polygon in normalized units (shoelace formula)
    ///
    /// Positive for the TL,TR,BR,BL winding with y pointing down.
    pub fn signed_area(&self) -> f32 {
        let c = &self.corners;
        let mut acc = 0.0f32;
        for i in 0..4 {
            let j = (i + 1) % 4;
            acc += c[i].x * c[j].y - c[j].x * c[i].y;
        }
        acc / 2.0
    }

    /// Absolute area of the polygon in normalized units
    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    /// Check whether the quad is degenerate (near-zero area)
    ///
    /// Three or more collinear corners, or coincident corners, collapse the
    /// area toward zero and make the homography system singular. Callers
    /// that care should check this before solving; the solver itself only
    /// guards against division by near-zero pivots.
    pub fn is_degenerate(&self, eps: f32) -> bool {
        self.area() < eps
    }

    /// Scale the corners into pixel units for a `width x height` image
    pub fn to_pixels(&self, width: u32, height: u32) -> [Point; 4] {
        let (w, h) = (width as f32, height as f32);
        self.corners.map(|p| Point::new(p.x * w, p.y * h))
    }
}
