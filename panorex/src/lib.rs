//! Panorex - Perspective-correcting capture for panoramic dental radiographs
//!
//! A user photographs an orthopantomogram (OPG) displayed on a monitor or
//! lightbox; this pipeline extracts a clean, perspective-corrected
//! rectangle of just the radiograph:
//!
//! 1. Boundary detection seeds a four-corner selection over the bright (or
//!    dark) region the radiograph occupies
//! 2. The interactive editor lets a human fine-tune the corners
//! 3. A homography warp rectifies the quadrilateral into a flat output
//!    frame, ready for downstream analysis
//!
//! # Example
//!
//! ```
//! use panorex::{Frame, FrameMut, Quad};
//! use panorex::warp::rectify_quad;
//!
//! let frame: Frame = FrameMut::new(1280, 720, 3).unwrap().into();
//! let corrected = rectify_quad(&frame, &Quad::inset(0.1), 1200, 600).unwrap();
//! assert_eq!(corrected.width(), 1200);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use panorex_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use panorex_detect as detect;
pub use panorex_edit as edit;
pub use panorex_session as session;
pub use panorex_warp as warp;
