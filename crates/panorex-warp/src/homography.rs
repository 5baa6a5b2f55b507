//! Homography - projective mapping between two quadrilaterals
//!
//! A projective transform between planes has 8 free coefficients (the 9th
//! entry of the 3x3 matrix is fixed to 1; four point correspondences
//! exactly determine the rest):
//!
//! ```text
//! x' = (h0*x + h1*y + h2) / (h6*x + h7*y + 1)
//! y' = (h3*x + h4*y + h5) / (h6*x + h7*y + 1)
//! ```
//!
//! Each correspondence contributes two linear equations, giving a dense
//! 8x8 system solved by Gaussian elimination with partial pivoting. The
//! solver is pure and allocation-light: same correspondences, same
//! coefficients.

use panorex_core::Point;

/// Pivot magnitude below which an elimination step is skipped
///
/// This is the guard against degenerate (collinear or coincident)
/// correspondences: instead of dividing by a near-zero pivot, the step is
/// skipped and the affected coefficient resolves to zero. The resulting
/// map is meaningless for a truly degenerate quad - a soft failure the
/// caller detects by the garbage warp it produces, not a crash.
const PIVOT_EPS: f64 = 1e-10;

/// Projective transform coefficients (8 values, 9th fixed to 1)
#[derive(Debug, Clone, PartialEq)]
pub struct Homography {
    coeffs: [f64; 8],
}

impl Default for Homography {
    fn default() -> Self {
        Self::identity()
    }
}

impl Homography {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Create from raw coefficients `[h0..h7]`.
    pub fn from_coeffs(coeffs: [f64; 8]) -> Self {
        Self { coeffs }
    }

    /// Get the raw coefficients.
    pub fn coeffs(&self) -> &[f64; 8] {
        &self.coeffs
    }

    /// Solve for the transform mapping `from[i]` onto `to[i]`.
    ///
    /// Both point sets are in the same fixed corner order (TL, TR, BR, BL
    /// when they come from a quad) and in pixel units. Degenerate inputs
    /// do not error; see [`PIVOT_EPS`].
    pub fn from_correspondences(from: [Point; 4], to: [Point; 4]) -> Self {
        // augmented 8x9 system: two rows per correspondence
        let mut m = [[0.0f64; 9]; 8];
        for i in 0..4 {
            let (x, y) = (from[i].x as f64, from[i].y as f64);
            let (xd, yd) = (to[i].x as f64, to[i].y as f64);

            m[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -x * xd, -y * xd, xd];
            m[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -x * yd, -y * yd, yd];
        }

        // forward elimination with partial pivoting
        for col in 0..8 {
            let mut pivot_row = col;
            for row in (col + 1)..8 {
                if m[row][col].abs() > m[pivot_row][col].abs() {
                    pivot_row = row;
                }
            }
            if m[pivot_row][col].abs() < PIVOT_EPS {
                // singular column: skip instead of dividing by near-zero
                continue;
            }
            m.swap(col, pivot_row);

            let pivot = m[col][col];
            for k in col..9 {
                m[col][k] /= pivot;
            }
            for row in 0..8 {
                if row == col {
                    continue;
                }
                let factor = m[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in col..9 {
                    m[row][k] -= factor * m[col][k];
                }
            }
        }

        let mut coeffs = [0.0f64; 8];
        for (i, row) in m.iter().enumerate() {
            // skipped (singular) columns leave a zero diagonal; their
            // coefficient stays 0
            coeffs[i] = if row[i].abs() < PIVOT_EPS { 0.0 } else { row[8] };
        }
        Self { coeffs }
    }

    /// Apply the transform to a point, in pixel units.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let h = &self.coeffs;
        let denom = h[6] * x + h[7] * y + 1.0;
        (
            (h[0] * x + h[1] * y + h[2]) / denom,
            (h[3] * x + h[4] * y + h[5]) / denom,
        )
    }
}
