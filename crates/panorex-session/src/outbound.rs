//! Outbound image encoding
//!
//! Every image leaving the pipeline - corrected crop or fallback full frame
//! alike - goes through the same path: PNG-encode the frame, then wrap it
//! in a base64 data URI with the MIME-type prefix the classification
//! collaborator expects.

use crate::error::{SessionError, SessionResult};
use base64::{Engine, engine::general_purpose};
use image::{ExtendedColorType, ImageFormat};
use panorex_core::Frame;
use std::io::Cursor;

/// PNG-encode a frame.
///
/// # Errors
///
/// Returns [`SessionError::Encode`] if the encoder rejects the buffer.
pub fn encode_frame_png(frame: &Frame) -> SessionResult<Vec<u8>> {
    let color = match frame.channels() {
        4 => ExtendedColorType::Rgba8,
        _ => ExtendedColorType::Rgb8,
    };
    let mut bytes = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut bytes,
        frame.data(),
        frame.width(),
        frame.height(),
        color,
        ImageFormat::Png,
    )
    .map_err(|e| SessionError::Encode(e.to_string()))?;
    Ok(bytes.into_inner())
}

/// Encode a frame as a `data:image/png;base64,...` URI.
pub fn to_data_uri(frame: &Frame) -> SessionResult<String> {
    let png = encode_frame_png(frame)?;
    Ok(format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(&png)
    ))
}
