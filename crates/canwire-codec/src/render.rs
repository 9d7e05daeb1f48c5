//! Formatting of frames back to descriptor text, for display of received
//! traffic. Pure functions; callable from whatever thread a transport
//! delivers frames on.

use std::fmt::Write;

use crate::frame::{Frame, FrameKind};

/// Encode bytes as lowercase hex pairs. The inverse of payload decoding:
/// decoding the output yields the original bytes.
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // Writing to a String cannot fail.
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Render a frame as descriptor text (`1#1a2b3c`, `42##…`, `1#R`).
pub fn render(frame: &Frame) -> String {
    match &frame.kind {
        FrameKind::Remote => format!("{}#R", frame.id),
        FrameKind::Data(bytes) => {
            let hash = if frame.fd { "##" } else { "#" };
            format!("{}{hash}{}", frame.id, encode_hex(bytes))
        }
    }
}
