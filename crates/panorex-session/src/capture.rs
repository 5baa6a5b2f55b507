//! Capture session lifecycle
//!
//! A capture is a single synchronous pass: snapshot one frame from the
//! device, stop the stream, seed the selection quad from boundary
//! detection, let the user adjust it, and warp on confirmation. Each
//! session owns its own frame, detection, and editor; starting a new
//! capture simply drops the previous session and with it all in-flight
//! state. Device handles never leak into the algorithmic crates - they see
//! nothing but frames.

use crate::error::SessionResult;
use panorex_core::{Frame, Quad};
use panorex_detect::{Detection, DetectorConfig, detect_quad};
use panorex_edit::QuadEditor;
use panorex_warp::rectify_quad;

/// A source of captured frames (the capture device)
///
/// Implementations wrap whatever delivers live video. The session reads a
/// single snapshot at the moment of capture and then stops the stream; the
/// pipeline operates entirely on the snapshot afterwards.
pub trait FrameSource {
    /// Take a snapshot of the current frame.
    fn snapshot(&mut self) -> SessionResult<Frame>;

    /// Release the underlying stream.
    fn stop(&mut self);
}

/// One user-triggered capture, from snapshot to confirmed warp
#[derive(Debug)]
pub struct CaptureSession {
    frame: Frame,
    detection: Detection,
    editor: QuadEditor,
}

impl CaptureSession {
    /// Capture a snapshot and seed the selection from boundary detection.
    ///
    /// Stops the source once the snapshot is taken. Detection is
    /// best-effort: a frame where nothing is found seeds the editor with
    /// the centered fallback quad rather than failing.
    ///
    /// # Errors
    ///
    /// Only the snapshot itself can fail ([`SessionError::Capture`] or
    /// whatever the source reports).
    pub fn capture<S: FrameSource>(source: &mut S, config: &DetectorConfig) -> SessionResult<Self> {
        let frame = source.snapshot()?;
        source.stop();

        let detection = detect_quad(&frame, config);
        tracing::debug!(
            confidence = detection.confidence,
            fallback = detection.is_fallback(),
            "seeded selection from boundary detection"
        );

        let editor = QuadEditor::new(detection.quad);
        Ok(Self {
            frame,
            detection,
            editor,
        })
    }

    /// Create a session directly over an already-captured frame.
    pub fn from_frame(frame: Frame, config: &DetectorConfig) -> Self {
        let detection = detect_quad(&frame, config);
        let editor = QuadEditor::new(detection.quad);
        Self {
            frame,
            detection,
            editor,
        }
    }

    /// The captured snapshot.
    #[inline]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// The detection that seeded the selection.
    #[inline]
    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    /// The interactive editor for the selection quad.
    #[inline]
    pub fn editor(&self) -> &QuadEditor {
        &self.editor
    }

    /// Mutable access to the editor, for forwarding drag events.
    #[inline]
    pub fn editor_mut(&mut self) -> &mut QuadEditor {
        &mut self.editor
    }

    /// The current selection quad.
    #[inline]
    pub fn quad(&self) -> &Quad {
        self.editor.quad()
    }

    /// Confirm the selection and produce the corrected image.
    ///
    /// Warps the current quad into a fresh `out_w x out_h` frame. The
    /// session stays usable afterwards - the user can keep editing and
    /// confirm again.
    pub fn confirm(&self, out_w: u32, out_h: u32) -> SessionResult<Frame> {
        let corrected = rectify_quad(&self.frame, self.editor.quad(), out_w, out_h)?;
        tracing::debug!(out_w, out_h, "confirmed selection, produced corrected frame");
        Ok(corrected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use panorex_core::{Corner, FrameMut, Point};
    use panorex_edit::Viewport;

    struct StaticSource {
        frame: Option<Frame>,
        stopped: bool,
    }

    impl StaticSource {
        fn new(frame: Frame) -> Self {
            Self {
                frame: Some(frame),
                stopped: false,
            }
        }
    }

    impl FrameSource for StaticSource {
        fn snapshot(&mut self) -> SessionResult<Frame> {
            self.frame
                .take()
                .ok_or_else(|| SessionError::Capture("stream exhausted".into()))
        }

        fn stop(&mut self) {
            self.stopped = true;
        }
    }

    fn bright_center_frame() -> Frame {
        let mut fm = FrameMut::new(320, 180, 3).unwrap();
        for y in 45..135 {
            for x in 48..272 {
                fm.set_pixel(x, y, &[230, 230, 230]).unwrap();
            }
        }
        fm.into()
    }

    #[test]
    fn test_capture_stops_source_and_seeds_quad() {
        let mut source = StaticSource::new(bright_center_frame());
        let session = CaptureSession::capture(&mut source, &DetectorConfig::default()).unwrap();

        assert!(source.stopped);
        assert!(!session.detection().is_fallback());
        assert!(session.quad().area() > 0.2);
    }

    #[test]
    fn test_edit_then_confirm() {
        let config = DetectorConfig::default();
        let mut session = CaptureSession::from_frame(bright_center_frame(), &config);

        let vp = Viewport::fit(320.0, 180.0, 320.0, 180.0);
        session.editor_mut().begin_drag(Corner::TopLeft);
        session.editor_mut().drag_to(&vp, 32.0, 18.0);
        session.editor_mut().end_drag();
        assert_eq!(
            session.quad().corner(Corner::TopLeft),
            Point::new(0.1, 0.1)
        );

        let corrected = session.confirm(160, 90).unwrap();
        assert_eq!((corrected.width(), corrected.height()), (160, 90));
    }

    #[test]
    fn test_reset_to_full_frame() {
        let config = DetectorConfig::default();
        let mut session = CaptureSession::from_frame(bright_center_frame(), &config);
        session.editor_mut().reset_to_full_frame();
        assert_eq!(*session.quad(), Quad::full_frame());
    }

    #[test]
    fn test_snapshot_failure_propagates() {
        let mut source = StaticSource {
            frame: None,
            stopped: false,
        };
        let err = CaptureSession::capture(&mut source, &DetectorConfig::default()).unwrap_err();
        assert!(matches!(err, SessionError::Capture(_)));
    }
}
