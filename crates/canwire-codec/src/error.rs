/// Fatal errors from descriptor parsing and payload decoding.
///
/// Each variant is terminal for the descriptor it was raised on; no frame
/// is produced and nothing is transmitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The descriptor has no `#` separator, or the identifier before it is
    /// not a decimal number.
    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(String),

    /// Nothing follows the `#` separator.
    #[error("payload section is empty")]
    EmptyPayload,

    /// The hex payload has an odd number of digits.
    #[error("hex payload has odd length ({0} digits)")]
    OddHexLength(usize),

    /// A character in the payload is not a hex digit.
    #[error("invalid hex digit {0:?} in payload")]
    InvalidHexDigit(char),
}

/// Non-fatal diagnostics. A warning accompanies a still-valid frame;
/// the caller decides how to render it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
    /// The decoded payload exceeded the frame format's maximum and was
    /// clipped to fit.
    #[error("payload of {original} bytes exceeds the {max}-byte frame limit; clipping to fit")]
    PayloadTruncated { original: usize, max: usize },

    /// The identifier exceeded 29 bits and was clamped to the extended
    /// format maximum.
    #[error("identifier {original} does not fit the extended frame format; clamped to {clamped:#x}")]
    IdentifierClamped { original: u64, clamped: u32 },
}

pub type Result<T> = std::result::Result<T, CodecError>;
