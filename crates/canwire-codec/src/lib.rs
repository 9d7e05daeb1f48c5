//! Textual descriptor codec for CAN 2.0 and CAN FD frames.
//!
//! This is the core value-add layer of canwire. A descriptor is a compact
//! one-line frame description:
//!
//! - `<id>#<hex-pairs>` — classic CAN 2.0 data frame (0..8 bytes)
//! - `<id>##<hex-pairs>` — CAN FD data frame (0..64 bytes)
//! - `<id>#R` — remote-request frame (no payload)
//!
//! The identifier is decimal; payloads above 0x7FF force the 29-bit
//! extended format. The codec is a pure function pipeline with no I/O and
//! no shared state — safe to call from any thread.

pub mod descriptor;
pub mod error;
pub mod frame;
pub mod render;

pub use descriptor::{decode_payload, parse_frame, split_descriptor, ParsedFrame, PayloadSpec};
pub use error::{CodecError, Result, Warning};
pub use frame::{
    build_frame, Frame, FrameKind, MAX_CLASSIC_PAYLOAD, MAX_EXTENDED_ID, MAX_FD_PAYLOAD,
    MAX_STANDARD_ID,
};
pub use render::{encode_hex, render};
