use bytes::Bytes;

use crate::error::{CodecError, Result, Warning};
use crate::frame::{build_frame, Frame, MAX_CLASSIC_PAYLOAD, MAX_FD_PAYLOAD};

/// Decoded payload specification, before frame assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSpec {
    /// Remote-request marker (`R` / `r`); no bytes follow.
    Remote,
    /// Data bytes, possibly clipped, with the FD classification from the
    /// `##` prefix. Remote specs are never FD: the `R` branch wins before
    /// the `#` branch is consulted.
    Data { bytes: Bytes, fd: bool },
}

/// Result of parsing one full descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFrame {
    pub frame: Frame,
    /// Non-fatal diagnostics collected along the way, in occurrence order.
    pub warnings: Vec<Warning>,
}

/// Split a descriptor at its first `#` into identifier and payload spec.
///
/// The identifier is base-10. A missing separator or a non-decimal
/// identifier is a [`CodecError::MalformedDescriptor`]; an empty payload
/// spec is [`CodecError::EmptyPayload`].
pub fn split_descriptor(text: &str) -> Result<(u64, &str)> {
    let Some((id_text, payload_text)) = text.split_once('#') else {
        return Err(CodecError::MalformedDescriptor(
            "no '#' separator between identifier and payload".into(),
        ));
    };

    // Digit check first: `u64::from_str` also accepts a leading '+',
    // which the descriptor grammar does not.
    if id_text.is_empty() || !id_text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::MalformedDescriptor(format!(
            "identifier {id_text:?} is not a decimal number"
        )));
    }
    let id = id_text.parse::<u64>().map_err(|_| {
        CodecError::MalformedDescriptor(format!("identifier {id_text:?} is out of range"))
    })?;

    if payload_text.is_empty() {
        return Err(CodecError::EmptyPayload);
    }

    Ok((id, payload_text))
}

/// Classify and decode the payload spec portion of a descriptor.
///
/// A leading `R` or `r` marks a remote-request frame; no further characters
/// are consulted. A leading `#` marks CAN FD framing and is stripped before
/// hex decoding. The remainder must be an even run of hex digits. Payloads
/// beyond the format maximum (8 classic, 64 FD) are clipped with a
/// [`Warning::PayloadTruncated`] diagnostic rather than rejected.
pub fn decode_payload(text: &str) -> Result<(PayloadSpec, Vec<Warning>)> {
    let mut chars = text.chars();
    match chars.next() {
        Some('R' | 'r') => return Ok((PayloadSpec::Remote, Vec::new())),
        Some('#') => {
            let (bytes, warnings) = decode_hex_clipped(chars.as_str(), MAX_FD_PAYLOAD)?;
            return Ok((PayloadSpec::Data { bytes, fd: true }, warnings));
        }
        _ => {}
    }

    let (bytes, warnings) = decode_hex_clipped(text, MAX_CLASSIC_PAYLOAD)?;
    Ok((PayloadSpec::Data { bytes, fd: false }, warnings))
}

/// Decode hex pairs, most-significant nibble first, clipping to `max` bytes.
fn decode_hex_clipped(text: &str, max: usize) -> Result<(Bytes, Vec<Warning>)> {
    let digits: Vec<char> = text.chars().collect();
    if digits.len() % 2 != 0 {
        return Err(CodecError::OddHexLength(digits.len()));
    }

    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let high = pair[0]
            .to_digit(16)
            .ok_or(CodecError::InvalidHexDigit(pair[0]))?;
        let low = pair[1]
            .to_digit(16)
            .ok_or(CodecError::InvalidHexDigit(pair[1]))?;
        bytes.push(((high << 4) | low) as u8);
    }

    let mut warnings = Vec::new();
    if bytes.len() > max {
        warnings.push(Warning::PayloadTruncated {
            original: bytes.len(),
            max,
        });
        bytes.truncate(max);
    }

    Ok((Bytes::from(bytes), warnings))
}

/// Parse a full descriptor into a validated frame.
///
/// This is the whole pipeline: split, classify/decode, assemble. Fatal
/// errors abort with no frame; warnings accompany a still-valid frame.
pub fn parse_frame(text: &str) -> Result<ParsedFrame> {
    let (id, payload_text) = split_descriptor(text)?;
    let (spec, mut warnings) = decode_payload(payload_text)?;
    let (frame, build_warnings) = build_frame(id, spec);
    warnings.extend(build_warnings);
    Ok(ParsedFrame { frame, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameKind, MAX_EXTENDED_ID};

    #[test]
    fn classic_data_frame() {
        let parsed = parse_frame("1#1a2b3c").unwrap();
        assert_eq!(parsed.frame.id, 1);
        assert!(!parsed.frame.extended);
        assert!(!parsed.frame.fd);
        assert_eq!(parsed.frame.data(), Some(&[0x1A, 0x2B, 0x3C][..]));
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn hex_decoding_is_big_endian_nibble_order() {
        let (spec, warnings) = decode_payload("1a2b3c").unwrap();
        assert_eq!(
            spec,
            PayloadSpec::Data {
                bytes: Bytes::from_static(&[0x1A, 0x2B, 0x3C]),
                fd: false,
            }
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn remote_request_both_cases() {
        for descriptor in ["1#R", "1#r"] {
            let parsed = parse_frame(descriptor).unwrap();
            assert_eq!(parsed.frame.id, 1);
            assert_eq!(parsed.frame.kind, FrameKind::Remote);
            assert!(parsed.warnings.is_empty());
        }
    }

    #[test]
    fn remote_marker_ignores_trailing_characters() {
        let (spec, _) = decode_payload("Rxyz").unwrap();
        assert_eq!(spec, PayloadSpec::Remote);
    }

    #[test]
    fn full_eight_byte_classic_payload_has_no_warning() {
        let parsed = parse_frame("2047#aabbccddeeff0011").unwrap();
        assert_eq!(parsed.frame.id, 2047);
        assert!(!parsed.frame.extended, "0x7FF still fits standard format");
        assert_eq!(
            parsed.frame.data(),
            Some(&[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x00, 0x11][..])
        );
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn nine_byte_classic_payload_truncates_to_eight() {
        let parsed = parse_frame("2047#aabbccddeeff001122").unwrap();
        assert_eq!(parsed.frame.dlc(), 8);
        assert_eq!(
            parsed.frame.data(),
            Some(&[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x00, 0x11][..])
        );
        assert_eq!(
            parsed.warnings,
            vec![Warning::PayloadTruncated { original: 9, max: 8 }]
        );
        assert!(!parsed.frame.fd, "clipping never promotes to FD");
    }

    #[test]
    fn id_2048_forces_extended() {
        let parsed = parse_frame("2048#01").unwrap();
        assert_eq!(parsed.frame.id, 2048);
        assert!(parsed.frame.extended);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn oversized_id_is_clamped_with_warning() {
        let parsed = parse_frame("600000000#01").unwrap();
        assert_eq!(parsed.frame.id, MAX_EXTENDED_ID);
        assert!(parsed.frame.extended);
        assert_eq!(
            parsed.warnings,
            vec![Warning::IdentifierClamped {
                original: 600_000_000,
                clamped: MAX_EXTENDED_ID,
            }]
        );
    }

    #[test]
    fn odd_hex_length_is_fatal() {
        assert_eq!(
            parse_frame("1#12345").unwrap_err(),
            CodecError::OddHexLength(5)
        );
    }

    #[test]
    fn invalid_hex_digit_is_fatal() {
        assert_eq!(
            parse_frame("1#1g").unwrap_err(),
            CodecError::InvalidHexDigit('g')
        );
    }

    #[test]
    fn fd_frame_strips_second_hash_and_allows_64_bytes() {
        let descriptor = format!("1##{}", "ab".repeat(64));
        let parsed = parse_frame(&descriptor).unwrap();
        assert!(parsed.frame.fd);
        assert_eq!(parsed.frame.dlc(), 64);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn oversized_fd_payload_truncates_to_64() {
        let descriptor = format!(
            "1##{}",
            "0011223344556677889900112233445566778899".repeat(5)
        );
        let parsed = parse_frame(&descriptor).unwrap();
        assert!(parsed.frame.fd);
        assert_eq!(parsed.frame.dlc(), 64);
        assert_eq!(
            parsed.warnings,
            vec![Warning::PayloadTruncated {
                original: 100,
                max: 64,
            }]
        );
    }

    #[test]
    fn empty_fd_payload_is_valid() {
        let parsed = parse_frame("1##").unwrap();
        assert!(parsed.frame.fd);
        assert_eq!(parsed.frame.dlc(), 0);
    }

    #[test]
    fn missing_separator_is_malformed() {
        assert!(matches!(
            parse_frame("123"),
            Err(CodecError::MalformedDescriptor(_))
        ));
    }

    #[test]
    fn non_numeric_identifier_is_malformed_not_zero() {
        assert!(matches!(
            parse_frame("abc#01"),
            Err(CodecError::MalformedDescriptor(_))
        ));
        assert!(matches!(
            parse_frame("#01"),
            Err(CodecError::MalformedDescriptor(_))
        ));
        assert!(matches!(
            parse_frame("-1#01"),
            Err(CodecError::MalformedDescriptor(_))
        ));
        // A sign prefix is outside the grammar even though u64 parsing
        // would tolerate it.
        assert!(matches!(
            parse_frame("+1#01"),
            Err(CodecError::MalformedDescriptor(_))
        ));
    }

    #[test]
    fn identifier_beyond_u64_is_malformed() {
        assert!(matches!(
            parse_frame("99999999999999999999999#01"),
            Err(CodecError::MalformedDescriptor(_))
        ));
    }

    #[test]
    fn empty_payload_spec_is_fatal() {
        assert_eq!(parse_frame("1#").unwrap_err(), CodecError::EmptyPayload);
    }

    #[test]
    fn split_keeps_later_hashes_in_payload() {
        let (id, payload) = split_descriptor("7#0102#03").unwrap();
        assert_eq!(id, 7);
        assert_eq!(payload, "0102#03");
    }

    #[test]
    fn uppercase_hex_accepted() {
        let parsed = parse_frame("1#DEADBEEF").unwrap();
        assert_eq!(parsed.frame.data(), Some(&[0xDE, 0xAD, 0xBE, 0xEF][..]));
    }
}
