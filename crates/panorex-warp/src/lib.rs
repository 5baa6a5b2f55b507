//! panorex-warp - Perspective correction
//!
//! This crate turns the user-confirmed selection quad into a flat,
//! rectangular image:
//!
//! - [`Homography`] - 8-coefficient projective transform solved from four
//!   point correspondences by Gaussian elimination with partial pivoting
//! - [`rectify_quad`] - nearest-neighbor inverse-map rasterizer producing
//!   a fresh output frame with background fill for out-of-bounds samples

mod error;
pub mod homography;
pub mod warp;

pub use error::{WarpError, WarpResult};
pub use homography::Homography;
pub use warp::rectify_quad;
