use bytes::Bytes;

use crate::descriptor::PayloadSpec;
use crate::error::Warning;

/// Maximum payload of a classic CAN 2.0 frame.
pub const MAX_CLASSIC_PAYLOAD: usize = 8;

/// Maximum payload of a CAN FD frame.
pub const MAX_FD_PAYLOAD: usize = 64;

/// Highest 11-bit standard-format identifier.
pub const MAX_STANDARD_ID: u32 = 0x7FF;

/// Highest 29-bit extended-format identifier.
pub const MAX_EXTENDED_ID: u32 = 0x1FFF_FFFF;

/// What a frame carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameKind {
    /// Remote-request frame; carries no bytes.
    Remote,
    /// Data frame with its payload.
    Data(Bytes),
}

/// A validated CAN frame, ready to hand to a transport.
///
/// Constructed fresh from one descriptor and holds no state across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame identifier, already clamped to 29 bits.
    pub id: u32,
    /// Extended (29-bit) frame format.
    pub extended: bool,
    /// CAN FD framing, set by the `##` descriptor prefix.
    pub fd: bool,
    pub kind: FrameKind,
}

impl Frame {
    pub fn is_remote(&self) -> bool {
        matches!(self.kind, FrameKind::Remote)
    }

    /// Payload bytes, or `None` for remote frames.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.kind {
            FrameKind::Remote => None,
            FrameKind::Data(bytes) => Some(bytes.as_ref()),
        }
    }

    /// Number of payload bytes (0 for remote frames).
    pub fn dlc(&self) -> usize {
        self.data().map_or(0, <[u8]>::len)
    }

    /// Upper payload bound for this frame's format.
    pub fn max_payload(&self) -> usize {
        if self.fd {
            MAX_FD_PAYLOAD
        } else {
            MAX_CLASSIC_PAYLOAD
        }
    }
}

/// Assemble a frame from an identifier and a decoded payload spec.
///
/// Pure and total: all failure is pushed earlier into parsing/decoding.
/// Identifiers above 0x7FF select the extended format; identifiers above
/// 29 bits are clamped with a [`Warning::IdentifierClamped`] diagnostic.
/// FD framing comes solely from the payload spec — an oversized classic
/// payload has already been clipped, never promoted to FD.
pub fn build_frame(id: u64, spec: PayloadSpec) -> (Frame, Vec<Warning>) {
    let mut warnings = Vec::new();

    let id = if id > u64::from(MAX_EXTENDED_ID) {
        warnings.push(Warning::IdentifierClamped {
            original: id,
            clamped: MAX_EXTENDED_ID,
        });
        MAX_EXTENDED_ID
    } else {
        id as u32
    };
    let extended = id > MAX_STANDARD_ID;

    let (fd, kind) = match spec {
        PayloadSpec::Remote => (false, FrameKind::Remote),
        PayloadSpec::Data { bytes, fd } => (fd, FrameKind::Data(bytes)),
    };

    (
        Frame {
            id,
            extended,
            fd,
            kind,
        },
        warnings,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_id_stays_standard() {
        let (frame, warnings) = build_frame(
            0x7FF,
            PayloadSpec::Data {
                bytes: Bytes::from_static(&[0x01]),
                fd: false,
            },
        );
        assert_eq!(frame.id, 0x7FF);
        assert!(!frame.extended);
        assert!(warnings.is_empty());
    }

    #[test]
    fn id_above_11_bits_forces_extended() {
        let (frame, warnings) = build_frame(
            2048,
            PayloadSpec::Data {
                bytes: Bytes::from_static(&[0x01]),
                fd: false,
            },
        );
        assert_eq!(frame.id, 2048);
        assert!(frame.extended);
        assert!(warnings.is_empty());
    }

    #[test]
    fn id_above_29_bits_is_clamped() {
        let (frame, warnings) = build_frame(
            0x6_0000_0000,
            PayloadSpec::Data {
                bytes: Bytes::new(),
                fd: false,
            },
        );
        assert_eq!(frame.id, MAX_EXTENDED_ID);
        assert!(frame.extended);
        assert_eq!(
            warnings,
            vec![Warning::IdentifierClamped {
                original: 0x6_0000_0000,
                clamped: MAX_EXTENDED_ID,
            }]
        );
    }

    #[test]
    fn remote_spec_builds_payloadless_frame() {
        let (frame, warnings) = build_frame(1, PayloadSpec::Remote);
        assert!(frame.is_remote());
        assert!(!frame.fd);
        assert_eq!(frame.dlc(), 0);
        assert_eq!(frame.data(), None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn fd_flag_carries_through() {
        let (frame, _) = build_frame(
            5,
            PayloadSpec::Data {
                bytes: Bytes::from_static(&[0xAA, 0xBB]),
                fd: true,
            },
        );
        assert!(frame.fd);
        assert_eq!(frame.max_payload(), MAX_FD_PAYLOAD);
        assert_eq!(frame.dlc(), 2);
    }
}
